//! End-to-end tests for the whole pipeline.
//!
//! Fixtures (.c) live in `fixtures/`; their expected trees are inline
//! snapshots of the [`dump`](crate::dump) outline.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::render::{highlight, spans_to_text};
use crate::{
    BlockFamily, DelimiterKeyword, DiagnosticKind, DocumentNode, MarkupKind, NodeKind,
    SourceKind, dump, tree, tree_body,
};

fn fixture(name: &str) -> String {
    let path = format!("{}/src/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

fn parse_fixture(name: &str, kind: SourceKind) -> (Vec<DocumentNode>, Vec<crate::Diagnostic>) {
    let (nodes, diagnostics) = tree(&fixture(name), kind);
    invariants::check(&nodes);
    (nodes, diagnostics)
}

fn leaf_chars(nodes: &[DocumentNode]) -> usize {
    nodes.iter().map(|n| n.leaf_text().chars().count()).sum()
}

// Fixture-based tests

#[test]
fn fixture_line_comments() {
    let (nodes, diagnostics) = parse_fixture("line_comments.c", SourceKind::LineComment);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    insta::assert_snapshot!(dump(&nodes), @r#"
    decl "int clamp(int value, int low, int high)"
      text "Restricts "
      i "value"
      text " to the range\n"
      tt "[low, high]"
      text "."
      br
      param "value"
        text "  The number to clamp."
      returns
        text "  One of:"
      dl
        item "low"
          text "  when value is below it"
        item "high"
          text "  when value is above it"
    class "Stack"
      text "A fixed size stack."
    endclass
    "#);
}

#[test]
fn fixture_block_comments() {
    let (nodes, diagnostics) = parse_fixture("block_comments.c", SourceKind::BlockComment);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    insta::assert_snapshot!(dump(&nodes), @r#"
    module "io"
      text "Input and output helpers."
    decl "size_t read_all(int fd, char *buf)"
      param "fd @b{open@} descriptor"
      throws
        text "  never, see "
        ref "errno"
    endmodule
    "#);
}

#[test]
fn fixture_malformed() {
    let (nodes, diagnostics) = parse_fixture("malformed.c", SourceKind::LineComment);
    insta::assert_snapshot!(dump(&nodes), @r#"
    decl "void broken()"
      ! @tt{ is missing its closing @}
      ! @enddl without an open block
      ! @member is not allowed here
      text "Use @tt{code"
      dl
        ! @param is not allowed here
        ! @endarray closes a @dl block
        text "@param nope"
        item "a"
      text "@member stray"
    "#);

    let lines: Vec<usize> = diagnostics.iter().map(|d| d.location.line).collect();
    assert_eq!(lines, vec![2, 4, 6, 7, 8]);
}

#[test]
fn block_fixture_read_as_line_comments_is_empty() {
    let (nodes, diagnostics) = parse_fixture("block_comments.c", SourceKind::LineComment);
    assert!(nodes.is_empty());
    assert!(diagnostics.is_empty());
}

// Documented behaviors

#[rstest]
#[case::line("//! plain words\n//!   indented more\n//! end", SourceKind::LineComment)]
#[case::block("/*!\nplain words\n  indented more\nend\n*/", SourceKind::BlockComment)]
fn plain_text_is_a_single_run(#[case] source: &str, #[case] kind: SourceKind) {
    let (nodes, diagnostics) = tree(source, kind);
    assert!(diagnostics.is_empty());
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind, NodeKind::TextRun);
    assert_eq!(nodes[0].argument, "plain words\n  indented more\nend");
}

#[test]
fn continuation_equals_single_line() {
    let joined = tree("//! @param reallyLong@\n//! More", SourceKind::LineComment);
    let single = tree("//! @param reallyLongMore", SourceKind::LineComment);
    assert_eq!(joined, single);
    assert_eq!(joined.0[0].argument, "reallyLongMore");
}

#[test]
fn continuation_extends_markup_across_lines() {
    let (nodes, diagnostics) = tree_body("see @tt{a@\nb@} here");
    assert!(diagnostics.is_empty());
    assert_eq!(nodes[1], DocumentNode::new(NodeKind::Inline(MarkupKind::Teletype), "ab", 1));
}

#[test]
fn markup_closes_on_a_later_body_line() {
    let body = "Use @i{multi\nline@} text";
    let (nodes, diagnostics) = tree_body(body);
    invariants::check(&nodes);
    invariants::check_accounting(body, &nodes);
    assert!(diagnostics.is_empty());
    assert_eq!(
        nodes,
        vec![
            DocumentNode::text("Use ", 1),
            DocumentNode::new(NodeKind::Inline(MarkupKind::Italic), "multi\nline", 1),
            DocumentNode::text(" text", 2),
        ]
    );
}

#[test]
fn markup_left_open_across_lines_is_reported_at_its_opener() {
    let (nodes, diagnostics) = tree("//! Use @tt{code\n//! and more", SourceKind::LineComment);
    assert_eq!(nodes, vec![DocumentNode::text("Use @tt{code\nand more", 1)]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].location.line, 1);
}

#[test]
fn sibling_sections_keep_their_bodies() {
    let body = "@param x\n  desc\n@param y\n  desc2";
    let (nodes, diagnostics) = tree_body(body);
    invariants::check(&nodes);
    invariants::check_accounting(body, &nodes);
    assert!(diagnostics.is_empty());

    let mut x = DocumentNode::new(NodeKind::Section(DelimiterKeyword::Param), "x", 1);
    x.children.push(DocumentNode::text("  desc", 2));
    let mut y = DocumentNode::new(NodeKind::Section(DelimiterKeyword::Param), "y", 3);
    y.children.push(DocumentNode::text("  desc2", 4));
    assert_eq!(nodes, vec![x, y]);
}

#[test]
fn balanced_block() {
    let (nodes, diagnostics) = tree_body("@dl\n@item a\n@enddl");
    assert!(diagnostics.is_empty());
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind, NodeKind::Block(BlockFamily::Dl));
    assert_eq!(nodes[0].children.len(), 1);
    assert_eq!(nodes[0].children[0].name(), "item");
    assert_eq!(nodes[0].children[0].argument, "a");
}

#[test]
fn unbalanced_block_is_still_closed() {
    let body = "@dl\n@item a\n@endarray";
    let (nodes, diagnostics) = tree_body(body);
    invariants::check_accounting(body, &nodes);
    let expected = DiagnosticKind::UnbalancedBlock {
        expected: BlockFamily::Dl,
        found: BlockFamily::Array,
    };
    assert_eq!(nodes[0].kind, NodeKind::Block(BlockFamily::Dl));
    assert_eq!(nodes[0].diagnostics[0].kind, expected);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, expected);
}

#[test]
fn end_keyword_argument_is_kept() {
    let body = "@dl\n@item a\n@enddl see above";
    let (nodes, diagnostics) = tree_body(body);
    invariants::check(&nodes);
    invariants::check_accounting(body, &nodes);
    assert!(diagnostics.is_empty());
    assert_eq!(nodes[1], DocumentNode::text("see above", 3));
}

#[test]
fn reference_markup_splits_text() {
    let (nodes, diagnostics) = tree_body("See @ref{foo@} now");
    assert!(diagnostics.is_empty());
    assert_eq!(
        nodes,
        vec![
            DocumentNode::text("See ", 1),
            DocumentNode::new(NodeKind::Inline(MarkupKind::Ref), "foo", 1),
            DocumentNode::text(" now", 1),
        ]
    );
}

#[test]
fn unknown_keyword_is_text() {
    let (nodes, diagnostics) = tree_body("@frobnicate x");
    assert!(diagnostics.is_empty());
    assert_eq!(nodes, vec![DocumentNode::text("@frobnicate x", 1)]);
}

#[test]
fn unterminated_markup_is_text_with_a_diagnostic() {
    let (nodes, diagnostics) = tree_body("Use @tt{code");
    assert_eq!(nodes, vec![DocumentNode::text("Use @tt{code", 1)]);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].kind,
        DiagnosticKind::UnterminatedShortMarkup {
            markup: MarkupKind::Teletype
        }
    );
}

#[rstest]
#[case("@param reallyLong@\nMore")]
#[case("@decl int f()\nDoes @i{f@} and @b{g@}.\n\n@returns\n  Zero.")]
#[case("@mapping\n@member key\n  value @tt{x@}\n@endmapping\ntrailing")]
#[case("Use @tt{code\nand @frobnicate")]
#[case("@dl\n@param misplaced\n@item a\n@endarray")]
#[case("Use @i{multi\nline@} text")]
#[case("@array\n@index 0\n@endarray zero")]
fn leaf_text_is_stable_under_reparse(#[case] body: &str) {
    let (first, _) = tree_body(body);
    invariants::check(&first);

    let rebuilt = spans_to_text(&highlight(&first));
    let (second, _) = tree_body(&rebuilt);
    invariants::check(&second);

    assert_eq!(leaf_chars(&first), leaf_chars(&second), "rebuilt as {rebuilt:?}");
}

// Extraction failures

#[test]
fn unterminated_block_comment_keeps_earlier_runs() {
    let source = "/*! @decl int a() */\nint a();\n/*! @decl int b()\n * never closed";
    let (nodes, diagnostics) = tree(source, SourceKind::BlockComment);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].argument, "int a()");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::UnterminatedComment);
    assert_eq!(diagnostics[0].location.line, 3);
}

#[test]
fn block_source_without_opener_is_empty() {
    let (nodes, diagnostics) = tree("int x; /* ordinary */\n// nothing", SourceKind::BlockComment);
    assert!(nodes.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn blocks_close_at_the_end_of_their_run() {
    let source = "//! @array\n//! @index 0\nint x;\n//! @endarray";
    let (nodes, diagnostics) = tree(source, SourceKind::LineComment);
    invariants::check(&nodes);
    let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::UnterminatedBlock {
                family: BlockFamily::Array
            },
            DiagnosticKind::StrayEndBlock {
                found: BlockFamily::Array
            },
        ]
    );
    assert_eq!(nodes.len(), 1);
}

#[test]
fn scopes_span_runs() {
    let source = "//! @class Foo\nstruct Foo;\n//! @decl void Foo::bar()\nvoid bar();\n//! @endclass";
    let (nodes, diagnostics) = tree(source, SourceKind::LineComment);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let names: Vec<_> = nodes.iter().map(|n| n.name()).collect();
    assert_eq!(names, vec!["class", "decl", "endclass"]);
}

#[test]
fn empty_input() {
    assert_eq!(tree("", SourceKind::LineComment), (vec![], vec![]));
    assert_eq!(tree_body(""), (vec![], vec![]));
}

//! AutoDoc comment parsing.
//!
//! Text flows one way through the pipeline:
//!
//! ```text
//! source ──extract──▶ comment runs ──join──▶ logical lines
//!        ──tokenize──▶ tokens ──assemble──▶ document tree ──render──▶ spans / tagged tree
//! ```
//!
//! Markup problems never fail a parse. They come back as [`Diagnostic`]s next
//! to a best-effort tree.

pub mod assemble;
pub mod cache;
pub mod diagnostic;
pub mod extract;
pub mod render;
pub mod source;
pub mod tokens;
pub mod tree;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use assemble::ScopeAssembler;
pub use cache::ParseCache;
pub use diagnostic::{Diagnostic, DiagnosticKind, Location, Severity};
pub use extract::{CommentRun, ExtractError, LogicalLine};
pub use render::{HighlightClass, HighlightSpan, TaggedNode, dump, highlight, tagged};
pub use source::SourceKind;
pub use tokens::{BlockFamily, DelimiterKeyword, ItemKeyword, MarkupKind, MetaKeyword, Token};
pub use tree::{DocumentNode, NodeKind};

/// What a piece of input text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputShape {
    /// Comment body with markers already removed.
    Body,
    /// Source text whose documentation comments still need extracting.
    Source(SourceKind),
}

/// The result of one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    pub nodes: Vec<DocumentNode>,
    /// Every diagnostic of the parse, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedDoc {
    pub fn into_parts(self) -> (Vec<DocumentNode>, Vec<Diagnostic>) {
        (self.nodes, self.diagnostics)
    }

    pub fn highlight(&self) -> Vec<HighlightSpan> {
        highlight(&self.nodes)
    }

    pub fn tagged(&self) -> Vec<TaggedNode> {
        tagged(&self.nodes)
    }
}

/// Parses `text` according to its shape.
pub fn parse(text: &str, shape: InputShape) -> ParsedDoc {
    match shape {
        InputShape::Body => parse_body(text),
        InputShape::Source(kind) => parse_document(text, kind),
    }
}

/// Extracts the documentation comments of `text` and parses them.
///
/// Runs are assembled one by one into a single forest. A run that fails
/// extraction contributes its diagnostic and nothing else.
pub fn parse_document(text: &str, kind: SourceKind) -> ParsedDoc {
    let mut assembler = ScopeAssembler::new();
    let mut failures = Vec::new();

    for result in extract::extract(text, kind) {
        match result {
            Ok(run) => assembler.push_run(run.index, &extract::join_lines(&run)),
            Err(e) => {
                log::debug!("dropping comment run: {e}");
                failures.push(e.to_diagnostic());
            }
        }
    }

    finish(assembler, failures)
}

/// Parses a comment body that has no markers left.
pub fn parse_body(text: &str) -> ParsedDoc {
    let run = extract::body_run(text);
    let mut assembler = ScopeAssembler::new();
    assembler.push_run(run.index, &extract::join_lines(&run));
    finish(assembler, Vec::new())
}

fn finish(assembler: ScopeAssembler, failures: Vec<Diagnostic>) -> ParsedDoc {
    let (nodes, mut diagnostics) = assembler.finish();
    if !failures.is_empty() {
        diagnostics.extend(failures);
        diagnostics.sort_by_key(|d| d.location);
    }
    ParsedDoc { nodes, diagnostics }
}

/// Source text to document tree in one call.
pub fn tree(text: &str, kind: SourceKind) -> (Vec<DocumentNode>, Vec<Diagnostic>) {
    parse_document(text, kind).into_parts()
}

/// Like [`tree`] for a pre-extracted comment body.
pub fn tree_body(text: &str) -> (Vec<DocumentNode>, Vec<Diagnostic>) {
    parse_body(text).into_parts()
}

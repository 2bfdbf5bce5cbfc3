//! # Extraction
//!
//! Turns raw source text into comment runs: ordered lists of physical lines
//! with their comment markers stripped. Two conventions are supported, chosen
//! per call by [`SourceKind`]:
//!
//! - **Line comments**: consecutive lines starting with `//!` (after
//!   indentation) form one run. Any other line ends it.
//! - **Block comments**: a run spans from `/*!` to the next `*/`. Text after
//!   the opener or before the closer counts only when non-blank.
//!
//! The [`join`] submodule then merges continuation lines into logical lines.

pub mod join;
pub mod markers;

use crate::diagnostic::{Diagnostic, DiagnosticKind, Location};
use crate::source::{PhysicalLine, SourceKind, lines_with_numbers};

pub use join::{LogicalLine, join_lines};
use markers::{BlockMarker, LineMarker};

/// Errors that make a whole comment run unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("unterminated comment opened at line {line}")]
    UnterminatedComment { run: usize, line: usize },
}

impl ExtractError {
    pub fn location(&self) -> Location {
        match self {
            ExtractError::UnterminatedComment { run, line } => Location::new(*run, *line),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ExtractError::UnterminatedComment { .. } => {
                Diagnostic::new(DiagnosticKind::UnterminatedComment, self.location())
            }
        }
    }
}

/// One contiguous documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRun {
    /// Position of this run within the extraction call.
    pub index: usize,
    pub lines: Vec<PhysicalLine>,
}

impl CommentRun {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            lines: Vec::new(),
        }
    }
}

/// Extracts every documentation comment run from `text`.
///
/// An unterminated block comment fails only its own run; the runs before it
/// are still returned.
pub fn extract(text: &str, kind: SourceKind) -> Vec<Result<CommentRun, ExtractError>> {
    match kind {
        SourceKind::LineComment => extract_line_comments(text).into_iter().map(Ok).collect(),
        SourceKind::BlockComment => extract_block_comments(text),
    }
}

/// Wraps an already extracted comment body as a single run.
///
/// This is the call shape of the highlighter, which receives comment text
/// without markers.
pub fn body_run(text: &str) -> CommentRun {
    CommentRun {
        index: 0,
        lines: lines_with_numbers(text).collect(),
    }
}

fn extract_line_comments(text: &str) -> Vec<CommentRun> {
    let mut runs: Vec<CommentRun> = Vec::new();
    let mut current: Option<CommentRun> = None;

    for line in lines_with_numbers(text) {
        match LineMarker::strip(&line.text) {
            Some(body) => current
                .get_or_insert_with(|| CommentRun::new(runs.len()))
                .lines
                .push(PhysicalLine::new(line.number, body)),
            None => runs.extend(current.take()),
        }
    }
    runs.extend(current);
    runs
}

struct OpenBlock {
    run: CommentRun,
    opened_at: usize,
}

fn extract_block_comments(text: &str) -> Vec<Result<CommentRun, ExtractError>> {
    let mut out = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for line in lines_with_numbers(text) {
        let mut rest = line.text.as_str();
        // Text directly after `/*!` is not decorated and only counts when non-blank.
        let mut opener_segment = false;

        loop {
            match open.as_mut() {
                None => {
                    let Some(idx) = rest.find(BlockMarker::OPEN) else {
                        break;
                    };
                    rest = &rest[idx + BlockMarker::OPEN.len()..];
                    open = Some(OpenBlock {
                        run: CommentRun::new(out.len()),
                        opened_at: line.number,
                    });
                    opener_segment = true;
                }
                Some(block) => {
                    let (segment, closed) = match rest.find(BlockMarker::CLOSE) {
                        Some(idx) => (&rest[..idx], Some(idx)),
                        None => (rest, None),
                    };
                    let body = if opener_segment {
                        markers::strip_one_space(segment)
                    } else {
                        BlockMarker::strip_decoration(segment)
                    };
                    let partial = opener_segment || closed.is_some();
                    if !partial || !body.trim().is_empty() {
                        block.run.lines.push(PhysicalLine::new(line.number, body));
                    }

                    match closed {
                        Some(idx) => {
                            rest = &rest[idx + BlockMarker::CLOSE.len()..];
                            opener_segment = false;
                            if let Some(done) = open.take() {
                                out.push(Ok(done.run));
                            }
                        }
                        None => break,
                    }
                }
            }
        }
    }

    if let Some(block) = open {
        log::debug!(
            "block comment opened at line {} is never closed",
            block.opened_at
        );
        out.push(Err(ExtractError::UnterminatedComment {
            run: block.run.index,
            line: block.opened_at,
        }));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(run: &CommentRun) -> Vec<&str> {
        run.lines.iter().map(|l| l.text.as_str()).collect()
    }

    fn ok_runs(text: &str, kind: SourceKind) -> Vec<CommentRun> {
        extract(text, kind)
            .into_iter()
            .map(|r| r.expect("run should extract"))
            .collect()
    }

    #[test]
    fn line_comments_group_consecutive_lines() {
        let src = "//! @decl int foo()\n//!   Does foo.\nint foo();\n//! Second run\n";
        let runs = ok_runs(src, SourceKind::LineComment);
        assert_eq!(runs.len(), 2);
        assert_eq!(texts(&runs[0]), vec!["@decl int foo()", "  Does foo."]);
        assert_eq!(runs[0].lines[0].number, 1);
        assert_eq!(runs[1].index, 1);
        assert_eq!(texts(&runs[1]), vec!["Second run"]);
        assert_eq!(runs[1].lines[0].number, 4);
    }

    #[test]
    fn indented_line_comments_are_recognized() {
        let runs = ok_runs("    //! inside a class\n", SourceKind::LineComment);
        assert_eq!(texts(&runs[0]), vec!["inside a class"]);
    }

    #[test]
    fn plain_comments_end_a_run() {
        let src = "//! a\n// not doc\n//! b\n";
        let runs = ok_runs(src, SourceKind::LineComment);
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn no_markers_yields_nothing() {
        assert!(extract("int x;\n", SourceKind::LineComment).is_empty());
        assert!(extract("int x;\n", SourceKind::BlockComment).is_empty());
    }

    #[test]
    fn block_comment_with_decorated_lines() {
        let src = "/*!\n *! @decl void bar()\n *!\n *! Bars.\n */\nvoid bar();\n";
        let runs = ok_runs(src, SourceKind::BlockComment);
        assert_eq!(runs.len(), 1);
        assert_eq!(texts(&runs[0]), vec!["@decl void bar()", "", "Bars."]);
        assert_eq!(runs[0].lines[0].number, 2);
    }

    #[test]
    fn single_line_block_comment() {
        let runs = ok_runs("/*! Short. */ int y;", SourceKind::BlockComment);
        assert_eq!(texts(&runs[0]), vec!["Short. "]);
    }

    #[test]
    fn text_on_opener_and_closer_lines() {
        let src = "/*! first\n   middle\nlast */";
        let runs = ok_runs(src, SourceKind::BlockComment);
        assert_eq!(texts(&runs[0]), vec!["first", "   middle", "last "]);
    }

    #[test]
    fn two_block_comments_on_one_line() {
        let runs = ok_runs("/*! a */ x; /*! b */", SourceKind::BlockComment);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].index, 1);
        assert_eq!(texts(&runs[1]), vec!["b "]);
    }

    #[test]
    fn unterminated_block_comment_fails_its_run_only() {
        let src = "/*! ok */\n\n/*! never\n closed\n";
        let runs = extract(src, SourceKind::BlockComment);
        assert_eq!(runs.len(), 2);
        assert!(runs[0].is_ok());
        assert_eq!(
            runs[1],
            Err(ExtractError::UnterminatedComment { run: 1, line: 3 })
        );
        let diag = runs[1].as_ref().unwrap_err().to_diagnostic();
        assert_eq!(diag.kind, DiagnosticKind::UnterminatedComment);
        assert_eq!(diag.location, Location::new(1, 3));
    }

    #[test]
    fn body_run_keeps_lines_verbatim() {
        let run = body_run("  indented\n@param x");
        assert_eq!(texts(&run), vec!["  indented", "@param x"]);
    }
}

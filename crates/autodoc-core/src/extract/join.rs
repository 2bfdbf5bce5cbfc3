//! Continuation handling: merges physical lines that end in `@`.
//!
//! A trailing `@` (after trimming trailing whitespace) means "this line goes
//! on". The `@` is dropped and the next line is appended with no separator.
//! The short markup closer `@}` ends in `}` and a trailing `@@` is a literal
//! pair, so neither is ever mistaken for a continuation.

use super::CommentRun;

/// The continuation character.
pub const CONTINUATION: char = '@';

/// One or more physical lines merged through continuations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    /// Line number of the first physical line merged into this one.
    pub origin_line: usize,
    pub origin_comment_run: usize,
}

/// Returns the line without its continuation character, or `None` if the
/// line does not continue.
fn continued(line: &str) -> Option<&str> {
    let body = line.strip_suffix(CONTINUATION)?;
    if body.ends_with(CONTINUATION) {
        return None;
    }
    Some(body)
}

/// Merges the physical lines of one comment run into logical lines.
///
/// A continuation on the last line of a run is dropped; it is not an error.
pub fn join_lines(run: &CommentRun) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut acc: Option<LogicalLine> = None;

    for line in &run.lines {
        let trimmed = line.text.trim_end();
        let (piece, continues) = match continued(trimmed) {
            Some(body) => (body, true),
            None => (trimmed, false),
        };

        let logical = acc.get_or_insert_with(|| LogicalLine {
            text: String::new(),
            origin_line: line.number,
            origin_comment_run: run.index,
        });
        logical.text.push_str(piece);

        if !continues {
            out.extend(acc.take());
        }
    }

    // Dangling continuation at end of run
    out.extend(acc);
    out
}

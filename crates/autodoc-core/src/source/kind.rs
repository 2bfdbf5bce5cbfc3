use std::fmt;

use serde::{Deserialize, Serialize};

/// The comment-marker convention of an input.
///
/// Fixed per extraction call; the two conventions are never mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// `//!` at the start of every documentation line.
    #[default]
    #[serde(rename = "line", alias = "line_comment")]
    LineComment,
    /// `/*! ... */` spanning lines, interior lines optionally decorated with `*!`.
    #[serde(rename = "block", alias = "block_comment")]
    BlockComment,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::LineComment => f.write_str("line"),
            SourceKind::BlockComment => f.write_str("block"),
        }
    }
}

//! Diagnostics produced while extracting and assembling comments.
//!
//! Malformed markup never aborts a parse. Each problem becomes a
//! [`Diagnostic`] attached to the nearest enclosing node and collected into
//! the flat list returned next to the tree, so consumers can report it or
//! keep rendering as if nothing happened.

use std::fmt;

use serde::Serialize;

use crate::tokens::{BlockFamily, MarkupKind, MetaKeyword};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The parser recovered but the tree may not match intent.
    Warning,
    /// Part of the input could not be interpreted at all.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// Where a diagnostic was raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Location {
    /// Index of the comment run within one extraction call.
    pub run: usize,
    /// 1-based source line number.
    pub line: usize,
}

impl Location {
    pub fn new(run: usize, line: usize) -> Self {
        Self { run, line }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.line)
    }
}

/// The kinds of problem the pipeline can recover from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A `/*!` opener with no closing `*/`. The run is dropped.
    UnterminatedComment,
    /// An end keyword closed a block of another family.
    UnbalancedBlock {
        expected: BlockFamily,
        found: BlockFamily,
    },
    /// A block still open when its comment run ended.
    UnterminatedBlock { family: BlockFamily },
    /// A short markup opener with no `@}` on its logical line.
    UnterminatedShortMarkup { markup: MarkupKind },
    /// An end keyword with no block open.
    StrayEndBlock { found: BlockFamily },
    /// A keyword used where the grammar does not allow it.
    MisplacedKeyword { keyword: String },
    /// `@endclass`/`@endmodule` that does not close the innermost scope.
    UnbalancedScope {
        expected: Option<MetaKeyword>,
        found: MetaKeyword,
    },
    /// `@class`/`@module` never closed.
    UnterminatedScope { keyword: MetaKeyword },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnterminatedComment => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnterminatedComment => write!(f, "unterminated comment"),
            DiagnosticKind::UnbalancedBlock { expected, found } => {
                write!(f, "@end{found} closes a @{expected} block")
            }
            DiagnosticKind::UnterminatedBlock { family } => {
                write!(f, "@{family} block is never closed")
            }
            DiagnosticKind::UnterminatedShortMarkup { markup } => {
                write!(f, "@{markup}{{ is missing its closing @}}")
            }
            DiagnosticKind::StrayEndBlock { found } => {
                write!(f, "@end{found} without an open block")
            }
            DiagnosticKind::MisplacedKeyword { keyword } => {
                write!(f, "@{keyword} is not allowed here")
            }
            DiagnosticKind::UnbalancedScope {
                expected: Some(expected),
                found,
            } => write!(f, "@{found} closes a @{expected} scope"),
            DiagnosticKind::UnbalancedScope {
                expected: None,
                found,
            } => write!(f, "@{found} without an open scope"),
            DiagnosticKind::UnterminatedScope { keyword } => {
                write!(f, "@{keyword} scope is never closed")
            }
        }
    }
}

/// A diagnostic emitted during extraction or assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Human-readable description of the issue.
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, location: Location) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            location,
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity(), self.message)
    }
}

//! Comment marker conventions and their stripping rules.

/// `//!` line comments.
pub struct LineMarker;

impl LineMarker {
    pub const MARKER: &'static str = "//!";

    /// Strips leading whitespace, the marker and one following space.
    ///
    /// Returns `None` when the line is not a documentation line.
    pub fn strip(line: &str) -> Option<&str> {
        line.trim_start()
            .strip_prefix(Self::MARKER)
            .map(strip_one_space)
    }
}

/// `/*! ... */` block comments.
pub struct BlockMarker;

impl BlockMarker {
    pub const OPEN: &'static str = "/*!";
    pub const CLOSE: &'static str = "*/";
    /// Per-line decorations accepted on interior lines, longest first.
    pub const DECORATIONS: [&'static str; 2] = ["*!", "*"];

    /// Strips an interior-line decoration and one following space.
    ///
    /// Undecorated lines are returned unchanged so their indentation stays
    /// part of the body text.
    pub fn strip_decoration(line: &str) -> &str {
        let trimmed = line.trim_start();
        for deco in Self::DECORATIONS {
            if let Some(rest) = trimmed.strip_prefix(deco) {
                return strip_one_space(rest);
            }
        }
        line
    }
}

/// Removes exactly one leading space, if present.
pub fn strip_one_space(s: &str) -> &str {
    s.strip_prefix(' ').unwrap_or(s)
}

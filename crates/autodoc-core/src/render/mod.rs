//! Pure consumers of a finished document tree.
//!
//! - [`highlight`]: styled spans for interactive highlighting.
//! - [`tagged`]: a generic tagged tree for documentation generators.
//! - [`dump`]: an indented plain-text outline, for debugging and tests.

pub mod dump;
pub mod highlight;
pub mod tagged;

pub use dump::dump;
pub use highlight::{HighlightClass, HighlightSpan, highlight, spans_to_text};
pub use tagged::{TaggedNode, tagged};

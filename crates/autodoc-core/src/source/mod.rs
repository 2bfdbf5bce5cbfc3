pub mod kind;
pub mod lines;

pub use kind::SourceKind;
pub use lines::{PhysicalLine, lines_with_numbers};

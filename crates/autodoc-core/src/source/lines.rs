/// A single physical line of input with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalLine {
    pub number: usize,
    /// Line text without its line terminator.
    pub text: String,
}

impl PhysicalLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Returns an iterator over the lines of `text` with their line numbers.
///
/// Both `\n` and `\r\n` terminators are stripped. A trailing terminator does
/// not produce an extra empty line.
pub fn lines_with_numbers(text: &str) -> impl Iterator<Item = PhysicalLine> + '_ {
    text.lines()
        .enumerate()
        .map(|(idx, line)| PhysicalLine::new(idx + 1, line))
}

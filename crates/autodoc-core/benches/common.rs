// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_line_comments(size: usize) -> String {
    let base = "//! @decl int clamp(int value, int low, int high)\n//! Restricts @i{value@} to @tt{[low, high]@}.\n//!\n//! @param value\n//!   The number to clamp, which may be @b{negative@}.\n//! @returns\n//! @dl\n//! @item low\n//!   when value is below it\n//! @item high\n//!   when value is above it\n//! @enddl\nint clamp(int value, int low, int high);\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_block_comments(size: usize) -> String {
    let base = "/*!\n * @decl size_t read_all(int fd, char *buf)\n * @param fd an open descriptor, see @ref{open@}\n * @throws\n *   never, a very long line that goes @\n *   on and on\n */\nsize_t read_all(int fd, char *buf);\n\n";
    base.repeat(size)
}

//! Byte-level helpers shared by the scan passes.
//!
//! Every span boundary these return sits on an ASCII byte or at the end of
//! input, so slicing the scanned `&str` with them is always valid.

/// C `isspace` in the "C" locale: space, `\t`, `\n`, `\v`, `\f`, `\r`.
#[must_use]
pub(crate) const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Index of the first `needle` at or after `from`.
#[must_use]
pub(crate) fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&byte| byte == needle)
        .map(|offset| from + offset)
}

/// Index of the first whitespace byte at or after `from`, or the input length.
#[must_use]
pub(crate) fn span_end(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .and_then(|rest| rest.iter().position(|&byte| is_space(byte)))
        .map_or(bytes.len(), |offset| from + offset)
}

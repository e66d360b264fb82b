use cs_core::{EMOTICON_CLOSE, EMOTICON_OPEN, EMOTICON_WINDOW, Emoticon};
use tracing::trace;

use crate::cursor::find_byte;

/// Collects every `(token)` whose token is ASCII alphanumeric and whose
/// closing `)` falls within [`EMOTICON_WINDOW`] characters of the `(`.
///
/// A candidate that hits a non-alphanumeric byte is abandoned and the
/// search resumes at that byte, so a nested `(` starts the next candidate.
/// Bytes already consumed as alphanumerics are not revisited.
#[must_use]
pub fn scan_emoticons(input: &str) -> Vec<Emoticon> {
    let bytes = input.as_bytes();
    let mut emoticons = Vec::new();
    let mut cursor = 0;

    while let Some(open) = find_byte(bytes, EMOTICON_OPEN, cursor) {
        let start = open + 1;
        let limit = bytes.len().min(start + EMOTICON_WINDOW);
        let mut pos = start;
        let mut closed = false;

        while pos < limit {
            let byte = bytes[pos];
            if byte == EMOTICON_CLOSE {
                closed = true;
                break;
            }
            if !byte.is_ascii_alphanumeric() {
                break;
            }
            pos += 1;
        }

        if closed {
            let token = &input[start..pos];
            trace!(offset = open, token, "emoticon");
            emoticons.push(Emoticon::new(token));
            cursor = pos + 1;
        } else {
            cursor = pos;
        }
    }

    emoticons
}

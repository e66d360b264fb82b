use cs_core::{MENTION_MARKER, Mention};
use tracing::trace;

use crate::cursor::{find_byte, span_end};

/// Collects every `@handle`, where the handle runs to the next whitespace.
///
/// A later `@` with no whitespace before it belongs to the current handle,
/// so `@bob@john` is one mention. A bare `@` yields an empty handle.
#[must_use]
pub fn scan_mentions(input: &str) -> Vec<Mention> {
    let bytes = input.as_bytes();
    let mut mentions = Vec::new();
    let mut cursor = 0;

    while let Some(marker) = find_byte(bytes, MENTION_MARKER, cursor) {
        let start = marker + 1;
        let end = span_end(bytes, start);
        let handle = &input[start..end];
        trace!(offset = marker, handle, "mention");
        mentions.push(Mention::new(handle));
        cursor = end;
    }

    mentions
}

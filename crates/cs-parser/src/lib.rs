#![forbid(unsafe_code)]

//! Entity scanner for chat messages.
//!
//! Each entity class has its own independent linear pass over the input;
//! [`parse_with`] runs them and merges the results. No pass can fail, so
//! parsing is total over every string.

mod cursor;
mod emoticons;
mod links;
mod mentions;

use cs_core::{NoopResolver, ParseResult, TitleResolver};
use serde_json::json;
use tracing::debug;

pub use emoticons::scan_emoticons;
pub use links::{scan_link_candidates, scan_links};
pub use mentions::scan_mentions;

/// Parse a message without resolving link titles.
///
/// Mentions and emoticons are extracted as usual; links are always dropped
/// because no title can be found for them.
#[must_use]
pub fn parse(input: &str) -> ParseResult {
    parse_with(input, &NoopResolver)
}

/// Parse a message, resolving each link candidate through `resolver`.
pub fn parse_with<R>(input: &str, resolver: &R) -> ParseResult
where
    R: TitleResolver + ?Sized,
{
    let result = ParseResult {
        mentions: scan_mentions(input),
        emoticons: scan_emoticons(input),
        links: scan_links(input, resolver),
    };

    debug!(
        "Parsed: mentions={}, emoticons={}, links={}",
        result.mentions.len(),
        result.emoticons.len(),
        result.links.len()
    );

    result
}

#[must_use]
pub fn parse_evidence_json(parsed: &ParseResult) -> String {
    json!({
        "mention_count": parsed.mentions.len(),
        "emoticon_count": parsed.emoticons.len(),
        "link_count": parsed.links.len(),
        "empty": parsed.is_empty(),
    })
    .to_string()
}

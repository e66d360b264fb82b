use cs_core::{LINK_SCHEMES, Link, TitleResolver};
use tracing::{debug, trace};

use crate::cursor::span_end;

/// Candidate URLs in pass order: every `http://` span left to right, then
/// every `https://` span left to right.
///
/// A span runs from the scheme to the next whitespace, so a candidate may
/// itself contain another scheme (`http://https://host` is scanned by both
/// passes).
#[must_use]
pub fn scan_link_candidates(input: &str) -> Vec<&str> {
    LINK_SCHEMES
        .iter()
        .flat_map(|scheme| scan_scheme(input, scheme))
        .collect()
}

fn scan_scheme<'a>(input: &'a str, scheme: &str) -> Vec<&'a str> {
    let bytes = input.as_bytes();
    let mut candidates = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find(scheme) {
        let start = cursor + offset;
        let end = span_end(bytes, start);
        trace!(offset = start, scheme, "link candidate");
        candidates.push(&input[start..end]);
        cursor = end;
    }

    candidates
}

/// Resolves each candidate in turn and keeps those with a non-empty title.
///
/// Resolution is synchronous: each lookup finishes before the next starts.
pub fn scan_links<R>(input: &str, resolver: &R) -> Vec<Link>
where
    R: TitleResolver + ?Sized,
{
    scan_link_candidates(input)
        .into_iter()
        .filter_map(|url| {
            let title = resolver.resolve_title(url);
            if title.is_empty() {
                debug!(url, "dropping link without title");
                None
            } else {
                Some(Link::new(url, title))
            }
        })
        .collect()
}

//! Title extraction from raw page bytes.

use cs_core::{TITLE_CLOSE, TITLE_OPEN};

/// Text between the first `<title>` and the first `</title>` after it.
///
/// Markers are matched literally (case-sensitive, no attributes). Returns
/// `None` when either marker is missing or nothing sits between them.
/// Non-UTF-8 bytes inside the title are replaced.
#[must_use]
pub fn extract_title(body: &[u8]) -> Option<String> {
    let open = find_subslice(body, TITLE_OPEN, 0)?;
    let start = open + TITLE_OPEN.len();
    let close = find_subslice(body, TITLE_CLOSE, start)?;
    if close == start {
        return None;
    }
    Some(String::from_utf8_lossy(&body[start..close]).into_owned())
}

fn find_subslice(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

#[cfg(test)]
mod tests {
    use super::extract_title;
    use proptest::prelude::*;

    #[test]
    fn extracts_simple_title() {
        let html = b"<html><head><title>Test Page</title></head><body></body></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Test Page"));
    }

    #[test]
    fn keeps_inner_whitespace_and_entities_verbatim() {
        let html = b"<title> A &amp; B\n</title>";
        assert_eq!(extract_title(html).as_deref(), Some(" A &amp; B\n"));
    }

    #[test]
    fn first_title_wins() {
        let html = b"<title>First</title><title>Second</title>";
        assert_eq!(extract_title(html).as_deref(), Some("First"));
    }

    #[test]
    fn empty_title_is_none() {
        assert_eq!(extract_title(b"<title></title>"), None);
    }

    #[test]
    fn missing_markers_are_none() {
        assert_eq!(extract_title(b""), None);
        assert_eq!(extract_title(b"<html><body>no title</body></html>"), None);
        assert_eq!(extract_title(b"<title>unterminated"), None);
        assert_eq!(extract_title(b"only a close</title>"), None);
    }

    #[test]
    fn close_before_open_is_skipped() {
        assert_eq!(
            extract_title(b"</title><title>Real</title>").as_deref(),
            Some("Real")
        );
        assert_eq!(extract_title(b"</title><title>"), None);
    }

    #[test]
    fn markers_are_case_sensitive() {
        assert_eq!(extract_title(b"<TITLE>Upper</TITLE>"), None);
        assert_eq!(extract_title(b"<title lang=\"en\">Attr</title>"), None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let html = b"<title>caf\xe9</title>";
        assert_eq!(extract_title(html).as_deref(), Some("caf\u{fffd}"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_wrapped_text_is_recovered(title in "[^<]{1,64}", prefix in "[^<]{0,32}", suffix in ".{0,32}") {
            let html = format!("{prefix}<title>{title}</title>{suffix}");
            prop_assert_eq!(extract_title(html.as_bytes()), Some(title));
        }

        #[test]
        fn prop_extraction_is_total(body in proptest::collection::vec(any::<u8>(), 0..512)) {
            if let Some(title) = extract_title(&body) {
                prop_assert!(!title.is_empty());
            }
        }
    }
}

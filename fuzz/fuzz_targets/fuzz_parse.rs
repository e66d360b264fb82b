#![no_main]

use cs_core::{EMOTICON_WINDOW, ParseResult};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Every candidate resolves, so links are kept and their spans checked too.
    let resolver = |url: &str| url.to_string();
    let result = cs_parser::parse_with(input, &resolver);

    for mention in &result.mentions {
        assert!(!mention.handle.bytes().any(|b| b.is_ascii_whitespace()));
    }
    for emoticon in &result.emoticons {
        assert!(emoticon.token.len() < EMOTICON_WINDOW);
        assert!(emoticon.token.bytes().all(|b| b.is_ascii_alphanumeric()));
    }
    for link in &result.links {
        assert!(link.url.starts_with("http://") || link.url.starts_with("https://"));
    }

    let decoded: ParseResult =
        serde_json::from_str(&result.to_json()).expect("record must round-trip");
    assert_eq!(decoded, result);
});

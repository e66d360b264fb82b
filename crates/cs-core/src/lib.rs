#![forbid(unsafe_code)]

mod config;
mod resolver;

pub use config::{ConfigError, ResolverConfig};
pub use resolver::{NoopResolver, StaticResolver, TitleResolver};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Introduces a mention handle.
pub const MENTION_MARKER: u8 = b'@';
/// Opens an emoticon candidate.
pub const EMOTICON_OPEN: u8 = b'(';
/// Closes an emoticon candidate.
pub const EMOTICON_CLOSE: u8 = b')';
/// Number of characters examined after `(`; the closing `)` must fall inside it.
pub const EMOTICON_WINDOW: usize = 15;
/// Link scheme prefixes, in the order their passes run.
pub const LINK_SCHEMES: [&str; 2] = ["http://", "https://"];
pub const TITLE_OPEN: &[u8] = b"<title>";
pub const TITLE_CLOSE: &[u8] = b"</title>";

/// A `@handle` reference. Serializes as the bare handle string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mention {
    pub handle: String,
}

impl Mention {
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
        }
    }
}

/// A `(token)` emoticon. Serializes as the bare token string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emoticon {
    pub token: String,
}

impl Emoticon {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: String,
}

impl Link {
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Entities extracted from one chat message.
///
/// Each sequence keeps left-to-right discovery order and is omitted from
/// the serialized form when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<Mention>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emoticons: Vec<Emoticon>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl ParseResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty() && self.emoticons.is_empty() && self.links.is_empty()
    }

    /// Compact JSON form of the record.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Failure while fetching a page for title resolution.
///
/// Never escapes a parse: resolvers map it to an empty title.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("failed to build HTTP client: {message}")]
    ClientBuild { message: String },
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("failed to read body from {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClientBuild { .. } => "chatscan/fetch/client-build",
            Self::Request { .. } => "chatscan/fetch/request",
            Self::Body { .. } => "chatscan/fetch/body",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Emoticon, FetchError, Link, Mention, ParseResult};

    #[test]
    fn empty_result_serializes_without_keys() {
        assert_eq!(ParseResult::default().to_json(), "{}");
        assert!(ParseResult::default().is_empty());
    }

    #[test]
    fn populated_result_uses_flat_json_shape() {
        let result = ParseResult {
            mentions: vec![Mention::new("bob"), Mention::new("john")],
            emoticons: vec![Emoticon::new("coffee")],
            links: vec![Link::new("http://example.com", "Example")],
        };
        assert_eq!(
            result.to_json(),
            r#"{"mentions":["bob","john"],"emoticons":["coffee"],"links":[{"url":"http://example.com","title":"Example"}]}"#
        );
    }

    #[test]
    fn only_non_empty_sequences_are_emitted() {
        let result = ParseResult {
            emoticons: vec![Emoticon::new("megusta")],
            ..ParseResult::default()
        };
        let json = result.to_json();
        assert_eq!(json, r#"{"emoticons":["megusta"]}"#);
        assert!(!json.contains("mentions"));
        assert!(!json.contains("links"));
    }

    #[test]
    fn empty_handle_is_still_a_mention() {
        let result = ParseResult {
            mentions: vec![Mention::new("")],
            ..ParseResult::default()
        };
        assert!(!result.is_empty());
        assert_eq!(result.to_json(), r#"{"mentions":[""]}"#);
    }

    #[test]
    fn missing_keys_deserialize_as_empty() {
        let result: ParseResult =
            serde_json::from_str(r#"{"mentions":["bob"]}"#).expect("deserialize record");
        assert_eq!(result.mentions, vec![Mention::new("bob")]);
        assert!(result.emoticons.is_empty());
        assert!(result.links.is_empty());
    }

    #[test]
    fn fetch_error_codes_are_stable() {
        let err = FetchError::Request {
            url: "http://example.com".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(err.as_str(), "chatscan/fetch/request");
        assert_eq!(
            err.to_string(),
            "request to http://example.com failed: connection refused"
        );
    }
}

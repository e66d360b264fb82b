//! Title resolution seam between the scanner and the network.

use std::collections::BTreeMap;

/// Resolves the page title for a scanned link.
///
/// Implementations are total: any failure is reported as an empty string,
/// which drops the link from the parse result.
pub trait TitleResolver {
    fn resolve_title(&self, url: &str) -> String;
}

impl<F> TitleResolver for F
where
    F: Fn(&str) -> String,
{
    fn resolve_title(&self, url: &str) -> String {
        self(url)
    }
}

/// Resolves nothing. Parsing with it never yields links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopResolver;

impl TitleResolver for NoopResolver {
    fn resolve_title(&self, _url: &str) -> String {
        String::new()
    }
}

/// Fixed URL -> title table, for offline runs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticResolver {
    titles: BTreeMap<String, String>,
}

impl StaticResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_title(mut self, url: impl Into<String>, title: impl Into<String>) -> Self {
        self.insert(url, title);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(url.into(), title.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl TitleResolver for StaticResolver {
    fn resolve_title(&self, url: &str) -> String {
        self.titles.get(url).cloned().unwrap_or_default()
    }
}

impl<K, V> FromIterator<(K, V)> for StaticResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            titles: iter
                .into_iter()
                .map(|(url, title)| (url.into(), title.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoopResolver, StaticResolver, TitleResolver};

    #[test]
    fn noop_resolver_always_returns_empty() {
        assert_eq!(NoopResolver.resolve_title("http://example.com"), "");
    }

    #[test]
    fn static_resolver_looks_up_exact_url() {
        let resolver = StaticResolver::new().with_title("http://a.test", "A");
        assert_eq!(resolver.resolve_title("http://a.test"), "A");
        assert_eq!(resolver.resolve_title("http://a.test/"), "");
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn static_resolver_collects_from_pairs() {
        let resolver: StaticResolver = [("http://a.test", "A"), ("https://b.test", "B")]
            .into_iter()
            .collect();
        assert_eq!(resolver.resolve_title("https://b.test"), "B");
        assert!(!resolver.is_empty());
    }

    #[test]
    fn closures_resolve_titles() {
        let resolver = |url: &str| format!("title of {url}");
        assert_eq!(resolver.resolve_title("x"), "title of x");
    }
}

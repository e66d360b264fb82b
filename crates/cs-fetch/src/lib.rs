#![forbid(unsafe_code)]

//! Link title resolution over HTTP.
//!
//! [`HttpTitleResolver`] owns one blocking client built from a
//! [`ResolverConfig`] and reuses it for every lookup. Lookups never fail:
//! transport errors and pages without a usable `<title>` resolve to an
//! empty string.

mod title;

use std::io::Read;

use cs_core::{FetchError, ResolverConfig, TitleResolver};
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use tracing::{debug, trace};

pub use title::extract_title;

#[derive(Debug, Clone)]
pub struct HttpTitleResolver {
    client: Client,
    config: ResolverConfig,
}

impl HttpTitleResolver {
    pub fn new(config: &ResolverConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(config.user_agent.clone());
        if !config.follow_redirects {
            builder = builder.redirect(Policy::none());
        }

        let client = builder.build().map_err(|err| FetchError::ClientBuild {
            message: err.to_string(),
        })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Issues one GET and buffers the whole body.
    ///
    /// A non-success status is not an error; its body is returned like any
    /// other.
    pub fn fetch_body(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|err| FetchError::Request {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, %status, "non-success status, reading body anyway");
        }

        let mut body = Vec::new();
        response
            .read_to_end(&mut body)
            .map_err(|err| FetchError::Body {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        trace!(url, bytes = body.len(), "fetched body");
        Ok(body)
    }

    /// Fetches `url` and extracts its title, reporting why none was found.
    pub fn fetch_title(&self, url: &str) -> Result<Option<String>, FetchError> {
        let body = self.fetch_body(url)?;
        Ok(extract_title(&body))
    }
}

impl TitleResolver for HttpTitleResolver {
    fn resolve_title(&self, url: &str) -> String {
        match self.fetch_title(url) {
            Ok(Some(title)) => title,
            Ok(None) => {
                debug!(url, "no title found");
                String::new()
            }
            Err(err) => {
                debug!(url, code = err.as_str(), "title fetch failed: {err}");
                String::new()
            }
        }
    }
}

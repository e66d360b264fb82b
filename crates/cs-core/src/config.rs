//! Link resolver configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for HTTP title resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Skip TLS certificate and host verification. On by default so that
    /// self-signed and misconfigured hosts still yield titles.
    pub accept_invalid_certs: bool,
    /// `User-Agent` header sent with every fetch.
    pub user_agent: String,
    /// Follow redirects with the transport's default policy.
    pub follow_redirects: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            user_agent: concat!("chatscan/", env!("CARGO_PKG_VERSION")).to_string(),
            follow_redirects: true,
        }
    }
}

impl ResolverConfig {
    /// Default configuration with certificate validation turned back on.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            accept_invalid_certs: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|err| ConfigError::Parse {
            path: None,
            message: err.to_string(),
        })
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&source).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.display().to_string()),
                message,
            },
            other => other,
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Read { path: String, message: String },
    #[error("invalid config{}: {message}", path_suffix(.path))]
    Parse {
        path: Option<String>,
        message: String,
    },
}

fn path_suffix(path: &Option<String>) -> String {
    path.as_deref().map(|p| format!(" {p}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ResolverConfig};

    #[test]
    fn default_accepts_invalid_certs() {
        let config = ResolverConfig::default();
        assert!(config.accept_invalid_certs);
        assert!(config.follow_redirects);
        assert!(config.user_agent.starts_with("chatscan/"));
    }

    #[test]
    fn strict_turns_verification_on() {
        let config = ResolverConfig::strict();
        assert!(!config.accept_invalid_certs);
        assert_eq!(config.user_agent, ResolverConfig::default().user_agent);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = ResolverConfig::from_toml_str("accept_invalid_certs = false\n")
            .expect("parse partial config");
        assert!(!config.accept_invalid_certs);
        assert!(config.follow_redirects);
        assert_eq!(config.user_agent, ResolverConfig::default().user_agent);
    }

    #[test]
    fn empty_toml_is_default() {
        let config = ResolverConfig::from_toml_str("").expect("parse empty config");
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ResolverConfig::from_toml_str("accept_invalid_certs = \"maybe\"")
            .expect_err("string is not a bool");
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ResolverConfig::from_toml_file(std::path::Path::new(
            "/nonexistent/chatscan/config.toml",
        ))
        .expect_err("file does not exist");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

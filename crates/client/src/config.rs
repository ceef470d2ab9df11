//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `STOREBOARD_API_URL` - Origin of the dashboard (default: `http://127.0.0.1:3001`)
//! - `STOREBOARD_USER_ID` - User id sent in the identity header (required for mutations)
//! - `STOREBOARD_USER_HEADER` - Identity header name (default: `x-auth-user-id`)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Header the dashboard reads the signed-in user from unless configured otherwise.
pub const DEFAULT_USER_HEADER: &str = "x-auth-user-id";

const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the client talks to and as whom.
#[derive(Clone)]
pub struct ClientConfig {
    /// Dashboard origin, without a trailing slash
    pub api_url: String,
    /// Identity header name
    pub user_header: String,
    /// Signed-in user; anonymous when absent
    pub user_id: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("user_header", &self.user_header)
            .field("user_id", &self.user_id.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ClientConfig {
    /// Build a configuration for `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_url` is not an absolute URL.
    pub fn new(api_url: &str, user_id: Option<SecretString>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_origin("api_url", api_url)?,
            user_header: DEFAULT_USER_HEADER.to_string(),
            user_id,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `STOREBOARD_API_URL` is not an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let api_url = std::env::var("STOREBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let user_id = std::env::var("STOREBOARD_USER_ID")
            .ok()
            .filter(|id| !id.trim().is_empty())
            .map(SecretString::from);
        let user_header = std::env::var("STOREBOARD_USER_HEADER")
            .unwrap_or_else(|_| DEFAULT_USER_HEADER.to_string());

        Ok(Self {
            api_url: parse_origin("STOREBOARD_API_URL", &api_url)?,
            user_header,
            user_id,
        })
    }
}

fn parse_origin(key: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ClientConfig::new("https://admin.example.com/", None).unwrap();
        assert_eq!(config.api_url, "https://admin.example.com");
        assert_eq!(config.user_header, DEFAULT_USER_HEADER);
    }

    #[test]
    fn test_rejects_relative_url() {
        assert!(ClientConfig::new("/api", None).is_err());
    }

    #[test]
    fn test_debug_redacts_user() {
        let config =
            ClientConfig::new("http://localhost:3001", Some(SecretString::from("user_abc"))).unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("user_abc"));
    }
}

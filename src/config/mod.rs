//! Configuration management.
//!
//! Credentials are loaded once, explicitly, before the client is built:
//!
//! ```rust,ignore
//! let config = TrelloConfig::from_env()?;
//! let client = TrelloClient::new(config);
//! ```
//!
//! There is no global instance and no load-on-construct side effect; a
//! missing credential fails fast with an error naming the variable.

use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};

/// Default Trello REST API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "TRELLO_API_KEY";

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "TRELLO_TOKEN";

/// Environment variable overriding the request timeout (milliseconds).
pub const ENV_TIMEOUT_MS: &str = "TRELLO_HTTP_TIMEOUT_MS";

/// Environment variable overriding the connect timeout (milliseconds).
pub const ENV_CONNECT_TIMEOUT_MS: &str = "TRELLO_HTTP_CONNECT_TIMEOUT_MS";

/// Configuration for Trello API access.
///
/// The key/token pair is wrapped in [`SecretString`] so a stray `Debug`
/// print never leaks it. The pair is attached to every outbound request
/// as the `key`/`token` query parameters.
#[derive(Debug, Clone)]
pub struct TrelloConfig {
    /// API key.
    api_key: SecretString,
    /// API token.
    token: SecretString,
    /// Base URL of the Trello REST API.
    base_url: String,
    /// HTTP client timeouts.
    http: HttpConfig,
}

impl TrelloConfig {
    /// Creates a configuration from an explicit key/token pair.
    #[must_use]
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            token: SecretString::from(token.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpConfig::default(),
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is honored if present.
    /// Requires [`ENV_API_KEY`] and [`ENV_TOKEN`]; either being absent or
    /// blank is a fatal startup condition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the missing variable.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = require_credential(ENV_API_KEY, std::env::var(ENV_API_KEY).ok())?;
        let token = require_credential(ENV_TOKEN, std::env::var(ENV_TOKEN).ok())?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            token: SecretString::from(token),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpConfig::from_env(),
        })
    }

    /// Sets the base URL (used by tests to point at a local server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the HTTP timeout configuration.
    #[must_use]
    pub const fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Returns the base URL of the Trello REST API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the HTTP timeout configuration.
    #[must_use]
    pub const fn http(&self) -> HttpConfig {
        self.http
    }

    /// Returns the authentication pair as query parameters.
    #[must_use]
    pub fn auth_params(&self) -> [(&'static str, String); 2] {
        [
            ("key", self.api_key.expose_secret().to_string()),
            ("token", self.token.expose_secret().to_string()),
        ]
    }
}

/// Validates a credential read from the environment.
///
/// Blank values are rejected the same as absent ones; a whitespace-only
/// token is always a misconfiguration, never a usable secret.
fn require_credential(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!(
            "{name} must be set in the environment or a .env file \
             (create credentials at https://trello.com/power-ups/admin)"
        ))),
    }
}

/// HTTP client timeouts for Trello requests.
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl HttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var(ENV_TIMEOUT_MS) {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var(ENV_CONNECT_TIMEOUT_MS) {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_credential_present() {
        let result = require_credential(ENV_API_KEY, Some("abc123".to_string()));
        assert_eq!(result.unwrap(), "abc123");
    }

    #[test]
    fn test_require_credential_missing() {
        let result = require_credential(ENV_TOKEN, None);
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(ENV_TOKEN));
    }

    #[test]
    fn test_require_credential_blank() {
        let result = require_credential(ENV_API_KEY, Some("   ".to_string()));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_auth_params() {
        let config = TrelloConfig::new("test_key", "test_token");
        let params = config.auth_params();
        assert_eq!(params[0], ("key", "test_key".to_string()));
        assert_eq!(params[1], ("token", "test_token".to_string()));
    }

    #[test]
    fn test_default_base_url() {
        let config = TrelloConfig::new("k", "t");
        assert_eq!(config.base_url(), "https://api.trello.com/1");
    }

    #[test]
    fn test_with_base_url() {
        let config = TrelloConfig::new("k", "t").with_base_url("http://127.0.0.1:8080");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let config = TrelloConfig::new("super-secret-key", "super-secret-token");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(!debug.contains("super-secret-token"));
    }

    #[test]
    fn test_http_config_defaults() {
        let http = HttpConfig::default();
        assert_eq!(http.timeout_ms, 30_000);
        assert_eq!(http.connect_timeout_ms, 3_000);
    }
}

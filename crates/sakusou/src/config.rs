//! Configuration for API clients

use http::HeaderMap;
use sakusou_core::KeyCase;
use std::time::Duration;

/// Protocol used when none is configured
pub const DEFAULT_PROTOCOL: &str = "https";

/// Configuration for an API client.
///
/// Holds the host, URL scheme and default key case a [`ClientCore`] is built
/// from, plus headers that every request of the client should carry.
///
/// [`ClientCore`]: crate::client::ClientCore
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host (and optional port) requests are sent to, e.g. `api.example.com`
    pub base_uri: Option<String>,

    /// URL scheme, `https` unless overridden
    pub protocol: String,

    /// Case applied when request bodies are re-keyed
    pub default_key_case: KeyCase,

    /// Headers added to every request, on top of the JSON defaults
    pub default_headers: HeaderMap,

    /// Whole-request timeout; `None` waits for the transport indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_uri: None,
            protocol: DEFAULT_PROTOCOL.to_string(),
            default_key_case: KeyCase::Camel,
            default_headers: HeaderMap::new(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration for a host.
    pub fn with_base_uri(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: Some(base_uri.into()),
            ..Default::default()
        }
    }

    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    /// This will look for:
    /// - `SAKUSOU_BASE_URI` for the target host
    /// - `SAKUSOU_PROTOCOL` for the URL scheme
    /// - `SAKUSOU_KEY_CASE` for the default key case (`camel` / `snake`)
    /// - `SAKUSOU_TIMEOUT` for request timeout (in seconds)
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(base_uri) = env::var("SAKUSOU_BASE_URI") {
            config.base_uri = Some(base_uri);
        }

        if let Ok(protocol) = env::var("SAKUSOU_PROTOCOL") {
            config.protocol = protocol;
        }

        if let Ok(key_case) = env::var("SAKUSOU_KEY_CASE") {
            config.default_key_case = key_case.parse()?;
        }

        if let Ok(timeout_str) = env::var("SAKUSOU_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                crate::error::Error::config(format!(
                    "SAKUSOU_TIMEOUT must be a whole number of seconds, got '{}'",
                    timeout_str
                ))
            })?;
            config.timeout = Some(Duration::from_secs(timeout_secs));
        }

        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.base_uri.is_some() {
            self.base_uri = other.base_uri;
        }
        if other.protocol != DEFAULT_PROTOCOL {
            self.protocol = other.protocol;
        }
        if other.default_key_case != KeyCase::Camel {
            self.default_key_case = other.default_key_case;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }

        self
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host.
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.config.base_uri = Some(base_uri.into());
        self
    }

    /// Set the URL scheme.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.config.protocol = protocol.into();
        self
    }

    /// Set the default key case.
    pub fn default_key_case(mut self, key_case: KeyCase) -> Self {
        self.config.default_key_case = key_case;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid according to HTTP specifications.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.protocol, "https");
        assert_eq!(config.default_key_case, KeyCase::Camel);
        assert!(config.base_uri.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .base_uri("api.example.com")
            .protocol("http")
            .default_key_case(KeyCase::Snake)
            .timeout(Duration::from_secs(30))
            .default_header("x-api-key", "secret")
            .unwrap()
            .build();

        assert_eq!(config.base_uri.as_deref(), Some("api.example.com"));
        assert_eq!(config.protocol, "http");
        assert_eq!(config.default_key_case, KeyCase::Snake);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.default_headers["x-api-key"], "secret");
    }

    #[test]
    fn test_invalid_default_header() {
        let err = ClientConfig::builder()
            .default_header("bad header", "x")
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidHeaderName(name) if name == "bad header"));
    }

    #[test]
    fn test_config_merge() {
        let base = ClientConfig::with_base_uri("one.example.com");
        let over = ClientConfig::builder()
            .protocol("http")
            .default_key_case(KeyCase::Snake)
            .build();

        let merged = base.merge(over);
        assert_eq!(merged.base_uri.as_deref(), Some("one.example.com"));
        assert_eq!(merged.protocol, "http");
        assert_eq!(merged.default_key_case, KeyCase::Snake);
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("SAKUSOU_BASE_URI", Some("env.example.com")),
                ("SAKUSOU_PROTOCOL", Some("http")),
                ("SAKUSOU_KEY_CASE", Some("snake")),
                ("SAKUSOU_TIMEOUT", Some("12")),
            ],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(config.base_uri.as_deref(), Some("env.example.com"));
                assert_eq!(config.protocol, "http");
                assert_eq!(config.default_key_case, KeyCase::Snake);
                assert_eq!(config.timeout, Some(Duration::from_secs(12)));
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_from_env_rejects_bad_values() {
        temp_env::with_vars(
            [
                ("SAKUSOU_KEY_CASE", Some("kebab")),
                ("SAKUSOU_TIMEOUT", None::<&str>),
            ],
            || {
                assert!(ClientConfig::from_env().is_err());
            },
        );

        temp_env::with_vars(
            [
                ("SAKUSOU_KEY_CASE", None::<&str>),
                ("SAKUSOU_TIMEOUT", Some("soon")),
            ],
            || {
                let err = ClientConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("SAKUSOU_TIMEOUT"));
            },
        );
    }
}

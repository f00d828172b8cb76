//! Reqwest transport configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default address of a local console.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";

/// Configuration for the reqwest transport.
#[derive(Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[builder(
    name = "ReqwestConfigBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct ReqwestConfig {
    /// Base URL of the console, without the API path
    #[cfg_attr(
        feature = "config",
        arg(long = "base-url", env = "S3LINK_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[builder(setter(custom), default = "default_base_url()")]
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[builder(default = "DEFAULT_TIMEOUT_SECS")]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[builder(default)]
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Bearer token (personal access token) sent with every request
    #[cfg_attr(feature = "config", arg(long = "token", env = "S3LINK_TOKEN"))]
    #[builder(default)]
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
}

fn default_base_url() -> Url {
    DEFAULT_BASE_URL.parse().expect("Valid default URL")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            http_timeout: default_timeout_secs(),
            user_agent: None,
            token: None,
        }
    }
}

impl std::fmt::Debug for ReqwestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestConfig")
            .field("base_url", &self.base_url.as_str())
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ReqwestConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ReqwestConfigBuilder {
        ReqwestConfigBuilder::default()
    }

    /// Creates a configuration for the console at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Returns the timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("s3link/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        check_base_url(&self.base_url)?;
        if self.token.as_deref().is_some_and(str::is_empty) {
            return Err(Error::configuration().with_message("token cannot be empty"));
        }
        Ok(())
    }
}

impl ReqwestConfigBuilder {
    /// Set the base URL of the console.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.base_url = Some(parse_base_url(url)?);
        Ok(self)
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(timeout) = &self.http_timeout {
            if *timeout == 0 {
                return Err("Timeout must be greater than 0".to_string());
            }
        }

        if let Some(Some(user_agent)) = &self.user_agent {
            if user_agent.is_empty() {
                return Err("User agent cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

fn parse_base_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| {
        Error::configuration()
            .with_message(format!("Invalid base URL '{url}': {e}"))
            .with_source(e)
    })?;
    check_base_url(&parsed)?;
    Ok(parsed)
}

fn check_base_url(url: &Url) -> Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::configuration()
            .with_message(format!("Unsupported base URL scheme '{}'", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::configuration()
            .with_message("Base URL cannot carry a query or fragment"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = ReqwestConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8090/");
        assert_eq!(config.http_timeout, 30);
        assert!(config.user_agent.is_none());
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ReqwestConfig::builder()
            .with_base_url("https://blog.example.com")
            .unwrap()
            .with_http_timeout(120u64)
            .with_user_agent("custom-agent/1.0")
            .with_token("pat_123")
            .build()
            .unwrap();

        assert_eq!(config.base_url.as_str(), "https://blog.example.com/");
        assert_eq!(config.http_timeout, 120);
        assert_eq!(config.user_agent.as_deref(), Some("custom-agent/1.0"));
        assert_eq!(config.token.as_deref(), Some("pat_123"));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = ReqwestConfig::builder().with_http_timeout(0u64).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let error = ReqwestConfig::new("not a url").unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);

        let error = ReqwestConfig::new("ftp://example.com").unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);

        assert!(ReqwestConfig::new("https://example.com/?a=b").is_err());
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = ReqwestConfig::default().with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_effective_user_agent_uses_default_when_none() {
        let config = ReqwestConfig::default();
        assert!(config.effective_user_agent().starts_with("s3link/"));
    }

    #[test]
    fn test_token_is_redacted() {
        let config = ReqwestConfig::default().with_token("secret-token");

        assert!(!format!("{config:?}").contains("secret-token"));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn test_empty_token_is_invalid() {
        let config = ReqwestConfig::default().with_token("");
        assert!(config.validate().is_err());
    }
}

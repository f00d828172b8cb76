//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── transport: ReqwestConfig   # Base URL, token, timeout, user agent
//! └── command: Command           # What to do with the API
//! ```
//!
//! Transport settings can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

use std::process;

use anyhow::Context;
use clap::Parser;
use s3link_client::S3LinkApi;
use s3link_client::reqwest::{ReqwestConfig, ReqwestTransport};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::command::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "s3link")]
#[command(about = "Browse S3 storage policies and link objects as console attachments")]
#[command(version)]
pub struct Cli {
    /// HTTP transport configuration.
    #[clap(flatten)]
    pub transport: ReqwestConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    ///
    /// Logs are written to stderr so that stdout carries only command output.
    pub fn init_tracing() -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .context("failed to create env filter")?;

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
            .context("failed to initialize tracing")?;

        Ok(())
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.transport
            .validate()
            .context("invalid transport configuration")?;
        Ok(())
    }

    /// Creates the API client described by the transport configuration.
    pub fn api(&self) -> anyhow::Result<S3LinkApi> {
        let transport = ReqwestTransport::new(self.transport.clone())
            .context("failed to create HTTP transport")?;
        Ok(transport.into_api())
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            base_url = %self.transport.base_url,
            http_timeout_secs = self.transport.http_timeout,
            user_agent = %self.transport.effective_user_agent(),
            has_token = self.transport.token.is_some(),
            "Transport configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transport_flags() {
        let cli = Cli::try_parse_from([
            "s3link",
            "--base-url",
            "https://blog.example.com/console",
            "--http-timeout",
            "5",
            "--token",
            "pat_123",
            "policies",
        ])
        .unwrap();

        assert_eq!(
            cli.transport.base_url.as_str(),
            "https://blog.example.com/console"
        );
        assert_eq!(cli.transport.http_timeout, 5);
        assert_eq!(cli.transport.token.as_deref(), Some("pat_123"));
        assert!(matches!(cli.command, Command::Policies));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_rejects_unsupported_scheme() {
        let cli = Cli::try_parse_from(["s3link", "--base-url", "ftp://example.com", "plugin"])
            .unwrap();
        assert!(cli.validate().is_err());
    }
}

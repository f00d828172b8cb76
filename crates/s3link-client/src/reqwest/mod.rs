//! Reqwest-based HTTP transport for the S3Link API.
//!
//! This module provides a reqwest-based implementation of the [`Transport`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use s3link_client::reqwest::{ReqwestConfig, ReqwestTransport};
//!
//! let config = ReqwestConfig::new("http://localhost:8090")?;
//! let api = ReqwestTransport::new(config)?.into_api();
//! ```
//!
//! [`Transport`]: crate::Transport

mod client;
mod config;
mod error;

pub use client::ReqwestTransport;
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, ReqwestConfig, ReqwestConfigBuilder};

/// Tracing target for reqwest transport operations.
pub const TRACING_TARGET: &str = "s3link_client::reqwest";

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod api;
mod error;
mod transport;

pub mod types;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[cfg(any(test, feature = "mock"))]
#[cfg_attr(docsrs, doc(cfg(feature = "mock")))]
pub mod mock;

pub use api::{API_PREFIX, LINK_PATH, ListObjectsParams, POLICIES_PATH, S3LinkApi, objects_path};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use transport::{QueryParams, Transport};
pub use types::{
    DeepRequired, LinkReport, LinkRequest, LinkResult, LinkResultItem, LinkedItem, ObjectVo,
    Policy, PolicyMetadata, PolicySpec, RemoteObject, S3ListPage, S3ListResult, StoragePolicy,
};

/// Tracing target for API operations.
pub const TRACING_TARGET_API: &str = "s3link_client::api";

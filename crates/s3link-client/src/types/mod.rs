//! Mirror of the S3Link server DTOs.
//!
//! Wire types declare every field optional, as the server schema does.
//! Each one converts into a fully populated counterpart through
//! [`DeepRequired`], which is how the API layer hands them to callers.

mod link;
mod object;
mod policy;
mod required;

pub use link::{LinkReport, LinkRequest, LinkResult, LinkResultItem, LinkedItem};
pub use object::{ObjectVo, RemoteObject, S3ListPage, S3ListResult};
pub use policy::{Policy, PolicyMetadata, PolicySpec, StoragePolicy};
pub use required::DeepRequired;

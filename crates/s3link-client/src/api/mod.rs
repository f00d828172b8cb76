//! Typed endpoint functions of the S3Link plugin API.
//!
//! Each method maps to exactly one HTTP request. Nothing is retried,
//! cached or aggregated; pagination is driven by the caller.

mod params;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use self::params::ListObjectsParams;
use crate::transport::{QueryParams, Transport};
use crate::types::{
    DeepRequired, LinkReport, LinkRequest, LinkResult, Policy, S3ListPage, S3ListResult,
    StoragePolicy,
};
use crate::{Error, Result, TRACING_TARGET_API};

/// Common prefix of every S3Link endpoint.
pub const API_PREFIX: &str = "/apis/api.plugin.halo.run/v1alpha1/plugins/S3Link";

/// Path of the storage policy listing.
pub const POLICIES_PATH: &str = "/apis/api.plugin.halo.run/v1alpha1/plugins/S3Link/policies/s3";

/// Path of the attachment linking call.
pub const LINK_PATH: &str =
    "/apis/api.plugin.halo.run/v1alpha1/plugins/S3Link/attachments/link";

/// Returns the object listing path for `policy_name`.
pub fn objects_path(policy_name: &str) -> String {
    format!("{API_PREFIX}/objects/{policy_name}")
}

/// Client for the S3Link plugin API.
///
/// Cheap to clone; clones share the transport and nothing else.
///
/// # Examples
///
/// ```rust,ignore
/// use s3link_client::reqwest::{ReqwestConfig, ReqwestTransport};
/// use s3link_client::ListObjectsParams;
///
/// let api = ReqwestTransport::new(ReqwestConfig::default())?.into_api();
///
/// let params = ListObjectsParams::new("s3-minio", 50).with_unlinked(true);
/// let page = api.list_objects(&params).await?;
/// if let Some(next) = params.next_page(&page) {
///     let page = api.list_objects(&next).await?;
/// }
/// ```
#[derive(Clone)]
pub struct S3LinkApi {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for S3LinkApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3LinkApi").finish_non_exhaustive()
    }
}

impl S3LinkApi {
    /// Creates a client over the given transport.
    pub fn new<T>(transport: T) -> Self
    where
        T: Transport + 'static,
    {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Creates a client over an already shared transport.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Lists one page of objects under a policy.
    ///
    /// `pageSize` is always sent; the token, object marker and unlinked
    /// filter only when set.
    pub async fn list_objects(&self, params: &ListObjectsParams) -> Result<S3ListPage> {
        validate_policy_name(&params.policy_name)?;

        tracing::debug!(
            target: TRACING_TARGET_API,
            policy = %params.policy_name,
            page_size = params.page_size,
            has_token = params.continuation_token.is_some(),
            unlinked = ?params.unlinked,
            "Listing objects"
        );

        let path = objects_path(&params.policy_name);
        let value = self.transport.get(&path, &params.to_query()).await?;
        let page = decode::<S3ListResult>(value)?;

        tracing::debug!(
            target: TRACING_TARGET_API,
            policy = %params.policy_name,
            objects = page.objects.len(),
            has_more = page.has_more,
            "Listed objects"
        );

        Ok(page)
    }

    /// Lists one page of objects under a policy, supporting only the
    /// continuation token.
    ///
    /// Never sends `continuationObject` or `unlinked`.
    pub async fn list_objects_basic(
        &self,
        policy_name: &str,
        page_size: u32,
        continuation_token: Option<&str>,
    ) -> Result<S3ListPage> {
        validate_policy_name(policy_name)?;

        tracing::debug!(
            target: TRACING_TARGET_API,
            policy = %policy_name,
            page_size,
            has_token = continuation_token.is_some(),
            "Listing objects (basic)"
        );

        let query = QueryParams::new()
            .with_opt("continuationToken", continuation_token)
            .with("pageSize", page_size);

        let value = self.transport.get(&objects_path(policy_name), &query).await?;
        decode::<S3ListResult>(value)
    }

    /// Lists the storage policies objects can be linked from.
    pub async fn list_policies(&self) -> Result<Vec<StoragePolicy>> {
        tracing::debug!(target: TRACING_TARGET_API, "Listing storage policies");

        let value = self.transport.get(POLICIES_PATH, &QueryParams::new()).await?;
        decode::<Vec<Policy>>(value)
    }

    /// Creates attachment records for the objects named in `request`.
    ///
    /// The request is sent verbatim. Per-object failures are reported in the
    /// returned [`LinkReport`], not as an error.
    pub async fn link_attachments(&self, request: &LinkRequest) -> Result<LinkReport> {
        tracing::debug!(
            target: TRACING_TARGET_API,
            policy = ?request.policy_name,
            objects = request.len(),
            "Linking objects"
        );

        let body = serde_json::to_value(request)?;
        let value = self.transport.post(LINK_PATH, &body).await?;
        let report = decode::<LinkResult>(value)?;

        tracing::debug!(
            target: TRACING_TARGET_API,
            linked = report.succeeded().count(),
            failed = report.failed().count(),
            "Linked objects"
        );

        Ok(report)
    }
}

/// Decodes a response document and enforces its required fields.
fn decode<T>(value: Value) -> Result<T::Required>
where
    T: DeserializeOwned + DeepRequired,
{
    let wire: T = serde_json::from_value(value)?;
    wire.into_required()
}

/// Rejects names that would not form a single path segment.
fn validate_policy_name(policy_name: &str) -> Result<()> {
    if policy_name.is_empty() {
        return Err(Error::invalid_input().with_message("policy name cannot be empty"));
    }

    if policy_name.contains(['/', '?', '#']) || matches!(policy_name, "." | "..") {
        return Err(Error::invalid_input()
            .with_message(format!("policy name '{policy_name}' is not a valid path segment")));
    }

    Ok(())
}

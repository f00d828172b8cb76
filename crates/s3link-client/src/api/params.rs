//! Parameters of the object listing call.

use serde::{Deserialize, Serialize};

use crate::transport::QueryParams;
use crate::types::S3ListPage;

/// Parameters for [`S3LinkApi::list_objects`](super::S3LinkApi::list_objects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsParams {
    /// Name of the storage policy whose bucket is listed.
    pub policy_name: String,
    /// Maximum number of keys the server should return.
    pub page_size: u32,
    /// Token of the page to fetch; absent for the first page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    /// Key of the last object seen, used by the server to resume filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_object: Option<String>,
    /// Only return objects that have no attachment yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlinked: Option<bool>,
}

impl ListObjectsParams {
    /// Creates parameters for the first page of `policy_name`.
    pub fn new(policy_name: impl Into<String>, page_size: u32) -> Self {
        Self {
            policy_name: policy_name.into(),
            page_size,
            continuation_token: None,
            continuation_object: None,
            unlinked: None,
        }
    }

    /// Sets the continuation token.
    #[must_use]
    pub fn with_continuation_token(mut self, token: impl Into<String>) -> Self {
        self.continuation_token = Some(token.into());
        self
    }

    /// Sets the continuation object marker.
    #[must_use]
    pub fn with_continuation_object(mut self, key: impl Into<String>) -> Self {
        self.continuation_object = Some(key.into());
        self
    }

    /// Sets the unlinked-only filter.
    #[must_use]
    pub fn with_unlinked(mut self, unlinked: bool) -> Self {
        self.unlinked = Some(unlinked);
        self
    }

    /// Returns the parameters for the page after `page`, or `None` when
    /// `page` was the last one.
    ///
    /// Filters carry over. This issues no request.
    pub fn next_page(&self, page: &S3ListPage) -> Option<Self> {
        let token = page.continuation()?;
        Some(Self {
            continuation_token: Some(token.to_owned()),
            ..self.clone()
        })
    }

    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("continuationToken", self.continuation_token.as_deref())
            .with_opt("continuationObject", self.continuation_object.as_deref())
            .with("pageSize", self.page_size)
            .with_opt("unlinked", self.unlinked)
    }
}

//! Attachment linking types.

use serde::{Deserialize, Serialize};

use super::required::{DeepRequired, field_path, require};
use crate::Result;

/// Request to create attachment records for remote objects.
///
/// Sent to the server exactly as constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_keys: Option<Vec<String>>,
}

impl LinkRequest {
    /// Creates a request linking `object_keys` under `policy_name`.
    pub fn new<I, S>(policy_name: impl Into<String>, object_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            policy_name: Some(policy_name.into()),
            object_keys: Some(object_keys.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of keys in the request.
    pub fn len(&self) -> usize {
        self.object_keys.as_ref().map_or(0, Vec::len)
    }

    /// Returns true if the request names no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Server answer to a [`LinkRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LinkResultItem>>,
}

/// Outcome for a single object key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResultItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    /// Failure reason reported by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Fully populated form of [`LinkResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    pub items: Vec<LinkedItem>,
}

impl LinkReport {
    /// Items the server linked.
    pub fn succeeded(&self) -> impl Iterator<Item = &LinkedItem> {
        self.items.iter().filter(|item| item.success)
    }

    /// Items the server refused, with their reasons.
    pub fn failed(&self) -> impl Iterator<Item = &LinkedItem> {
        self.items.iter().filter(|item| !item.success)
    }

    /// Returns true if every item was linked.
    pub fn is_complete(&self) -> bool {
        self.items.iter().all(|item| item.success)
    }
}

/// Fully populated form of [`LinkResultItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedItem {
    pub object_key: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeepRequired for LinkResultItem {
    type Required = LinkedItem;

    fn require_at(self, path: &str) -> Result<LinkedItem> {
        Ok(LinkedItem {
            object_key: require(self.object_key, path, "objectKey")?,
            success: require(self.success, path, "success")?,
            message: self.message,
        })
    }
}

impl DeepRequired for LinkResult {
    type Required = LinkReport;

    fn require_at(self, path: &str) -> Result<LinkReport> {
        let items = require(self.items, path, "items")?;
        let items = items.require_at(&field_path(path, "items"))?;
        Ok(LinkReport { items })
    }
}

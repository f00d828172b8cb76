//! Storage policy types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::required::{DeepRequired, field_path, require};
use crate::Result;

/// A configured storage backend, as stored by the host platform.
///
/// The client only relies on the policy name; every other field is carried
/// through untouched, unknown ones included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PolicyMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<PolicySpec>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Policy {
    /// Returns the policy name, if present.
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref()?.name.as_deref()
    }
}

/// Object metadata of a [`Policy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Specification of a [`Policy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fully populated form of [`Policy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePolicy {
    /// Unique policy name, used as the path segment of listing calls.
    pub name: String,
    /// Human-readable name, falling back to `name`.
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
}

impl DeepRequired for Policy {
    type Required = StoragePolicy;

    fn require_at(self, path: &str) -> Result<StoragePolicy> {
        let metadata = require(self.metadata, path, "metadata")?;
        let name = require(metadata.name, &field_path(path, "metadata"), "name")?;

        let spec = self.spec.unwrap_or_default();
        let display_name = spec.display_name.unwrap_or_else(|| name.clone());

        Ok(StoragePolicy {
            name,
            display_name,
            template_name: spec.template_name,
        })
    }
}

//! Object listing types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::required::{DeepRequired, field_path, require};
use crate::Result;

/// Metadata of a single remote object, as returned by a listing call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectVo {
    /// Full object key inside the bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, rename = "eTag", skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    /// Object size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last path segment of the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Media type, when the server could determine one.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Whether an attachment record already points at this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_linked: Option<bool>,
}

/// One page of a paginated object listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ListResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<ObjectVo>>,
    /// Whether another page follows this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    /// Token that produced this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_token: Option<String>,
    /// Token to pass back to fetch the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

/// Fully populated form of [`ObjectVo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    pub key: String,
    #[serde(rename = "eTag", skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
    pub size: u64,
    pub display_name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub is_linked: bool,
}

impl DeepRequired for ObjectVo {
    type Required = RemoteObject;

    fn require_at(self, path: &str) -> Result<RemoteObject> {
        let key = require(self.key, path, "key")?;
        let size = require(self.size, path, "size")?;
        let display_name = self
            .display_name
            .unwrap_or_else(|| key.rsplit('/').next().unwrap_or_default().to_owned());

        Ok(RemoteObject {
            key,
            e_tag: self.e_tag,
            last_modified: self.last_modified,
            size,
            display_name,
            media_type: self.media_type,
            // The server only sets the flag on linked objects.
            is_linked: self.is_linked.unwrap_or(false),
        })
    }
}

/// Fully populated form of [`S3ListResult`].
///
/// Tokens stay optional: the first page has no current token and the last
/// page has no next token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ListPage {
    pub objects: Vec<RemoteObject>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl S3ListPage {
    /// Returns the objects not yet linked to an attachment.
    pub fn unlinked(&self) -> impl Iterator<Item = &RemoteObject> {
        self.objects.iter().filter(|object| !object.is_linked)
    }

    /// Returns the token for the next page, if there is one.
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_token.as_deref()
        } else {
            None
        }
    }
}

impl DeepRequired for S3ListResult {
    type Required = S3ListPage;

    fn require_at(self, path: &str) -> Result<S3ListPage> {
        let objects = require(self.objects, path, "objects")?;
        let objects = objects.require_at(&field_path(path, "objects"))?;
        let has_more = require(self.has_more, path, "hasMore")?;

        Ok(S3ListPage {
            objects,
            has_more,
            current_token: self.current_token,
            next_token: self.next_token,
        })
    }
}

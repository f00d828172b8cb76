//! Request transport abstraction.
//!
//! The API layer builds paths, query parameters and bodies; a [`Transport`]
//! moves them over the wire and hands back the decoded JSON document.

use serde_json::Value;

use crate::Result;

/// Ordered query parameters of a request.
///
/// Absent optional parameters are never recorded, so they never reach the
/// wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((name.into(), value.to_string()));
        self
    }

    /// Appends a parameter only when `value` is present.
    #[must_use]
    pub fn with_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Returns the first value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if a parameter named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(key, _)| key.as_str())
    }

    /// Returns the parameters as name/value pairs.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Core trait for moving S3Link API requests over the wire.
///
/// Implementations own authentication, timeouts and status handling; a
/// non-success answer must be reported as an [`Error`](crate::Error) carrying
/// the status. Errors are returned to API callers as-is.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET request to `path` with the given query parameters.
    async fn get(&self, path: &str, query: &QueryParams) -> Result<Value>;

    /// Issues a POST request to `path` with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value>;
}

//! In-memory transport for testing code built on [`S3LinkApi`].
//!
//! [`S3LinkApi`]: crate::S3LinkApi

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value};

use crate::Result;
use crate::transport::{QueryParams, Transport};

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    /// A GET request with its query parameters.
    Get { path: String, query: QueryParams },
    /// A POST request with its JSON body.
    Post { path: String, body: Value },
}

impl RecordedRequest {
    /// Returns the request path.
    pub fn path(&self) -> &str {
        match self {
            Self::Get { path, .. } | Self::Post { path, .. } => path.as_str(),
        }
    }
}

type Handler = dyn Fn(&RecordedRequest) -> Result<Value> + Send + Sync;

/// Transport that records every request and answers from a handler.
///
/// Clones share the same request log, so a test can keep one handle and
/// give another to the client under test.
#[derive(Clone)]
pub struct MockTransport {
    handler: Arc<Handler>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("requests", &self.requests().len())
            .finish_non_exhaustive()
    }
}

impl MockTransport {
    /// Creates a transport answering every request with `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a transport answering every request with `value`.
    pub fn json(value: Value) -> Self {
        Self::new(move |_| Ok(value.clone()))
    }

    /// Creates a transport failing every request with the error built by
    /// `error`.
    pub fn failing<F>(error: F) -> Self
    where
        F: Fn() -> crate::Error + Send + Sync + 'static,
    {
        Self::new(move |_| Err(error()))
    }

    /// Creates a transport echoing POST bodies, and GET query parameters as
    /// a JSON object of strings.
    pub fn echo() -> Self {
        Self::new(|request| {
            Ok(match request {
                RecordedRequest::Post { body, .. } => body.clone(),
                RecordedRequest::Get { query, .. } => Value::Object(
                    query
                        .as_pairs()
                        .iter()
                        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                        .collect::<Map<_, _>>(),
                ),
            })
        })
    }

    /// Returns a snapshot of the requests seen so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, request: RecordedRequest) -> Result<Value> {
        let response = (self.handler)(&request);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        response
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &QueryParams) -> Result<Value> {
        self.record(RecordedRequest::Get {
            path: path.to_owned(),
            query: query.clone(),
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.record(RecordedRequest::Post {
            path: path.to_owned(),
            body: body.clone(),
        })
    }
}

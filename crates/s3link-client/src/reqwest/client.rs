//! Reqwest-based transport for the S3Link API.

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

use super::{ReqwestConfig, TRACING_TARGET};
use crate::transport::{QueryParams, Transport};
use crate::{Error, Result, S3LinkApi};

/// Maximum number of characters of an error body kept in an [`Error`].
const ERROR_BODY_LIMIT: usize = 1024;

/// Inner client that holds the HTTP client and configuration.
struct ReqwestTransportInner {
    http: Client,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP transport talking to a console instance.
///
/// # Examples
///
/// ```rust,ignore
/// use s3link_client::reqwest::{ReqwestConfig, ReqwestTransport};
///
/// let config = ReqwestConfig::new("https://blog.example.com")?.with_token(token);
/// let api = ReqwestTransport::new(config)?.into_api();
/// let policies = api.list_policies().await?;
/// ```
#[derive(Clone)]
pub struct ReqwestTransport {
    inner: Arc<ReqwestTransportInner>,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Creates a new transport with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ReqwestConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            timeout_ms = timeout.as_millis(),
            "Creating reqwest transport"
        );

        config.validate()?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(|e| {
                Error::configuration()
                    .with_message("Failed to create HTTP client")
                    .with_source(e)
            })?;

        let inner = ReqwestTransportInner { http, config };
        let transport = Self {
            inner: Arc::new(inner),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            "Reqwest transport created successfully"
        );

        Ok(transport)
    }

    /// Gets the transport configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Converts this transport into an [`S3LinkApi`].
    pub fn into_api(self) -> S3LinkApi {
        S3LinkApi::new(self)
    }

    /// Resolves an API path against the base URL, keeping any base path.
    fn url(&self, path: &str) -> Result<Url> {
        let base = self.inner.config.base_url.as_str().trim_end_matches('/');
        let url = format!("{base}{path}");

        Url::parse(&url).map_err(|e| {
            Error::invalid_input()
                .with_message(format!("Invalid request URL '{url}': {e}"))
                .with_source(e)
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.inner.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and decodes a successful JSON answer.
    async fn execute(
        &self,
        method: &'static str,
        url: Url,
        request: RequestBuilder,
    ) -> Result<Value> {
        let started_at = Instant::now();

        let response = self.authorize(request).send().await.map_err(|e| {
            tracing::warn!(
                target: TRACING_TARGET,
                method,
                url = %url,
                error = %e,
                "Request failed"
            );
            Error::from(e)
        })?;

        let status = response.status().as_u16();
        let elapsed_ms = started_at.elapsed().as_millis();

        tracing::debug!(
            target: TRACING_TARGET,
            method,
            url = %url,
            status,
            elapsed_ms,
            "Request completed"
        );

        if !response.status().is_success() {
            let body = error_body(response).await;
            tracing::warn!(
                target: TRACING_TARGET,
                method,
                url = %url,
                status,
                "Server rejected request"
            );
            return Err(Error::from_status(status, body));
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Reads at most [`ERROR_BODY_LIMIT`] characters of an error answer.
async fn error_body(response: Response) -> String {
    response
        .text()
        .await
        .map(|body| body.chars().take(ERROR_BODY_LIMIT).collect())
        .unwrap_or_default()
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str, query: &QueryParams) -> Result<Value> {
        let url = self.url(path)?;

        let mut request = self.inner.http.get(url.clone());
        if !query.is_empty() {
            request = request.query(query.as_pairs());
        }

        self.execute("GET", url, request).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = self.url(path)?;
        let request = self.inner.http.post(url.clone()).json(body);

        self.execute("POST", url, request).await
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::extract::{Path, RawQuery};
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use serde_json::json;

    use super::*;
    use crate::api::{LINK_PATH, POLICIES_PATH};
    use crate::{ErrorKind, LinkRequest, ListObjectsParams};

    /// Serves `router` on an ephemeral local port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn transport(base_url: &str) -> ReqwestTransport {
        ReqwestTransport::new(ReqwestConfig::new(base_url).unwrap()).unwrap()
    }

    /// Answers listings with the raw query echoed as `currentToken`.
    async fn list_objects(
        Path(policy): Path<String>,
        RawQuery(query): RawQuery,
    ) -> impl IntoResponse {
        axum::Json(json!({
            "objects": [{ "key": format!("{policy}/a.png"), "size": 1 }],
            "hasMore": false,
            "currentToken": query.unwrap_or_default()
        }))
    }

    async fn link(axum::Json(body): axum::Json<Value>) -> impl IntoResponse {
        let items: Vec<Value> = body["objectKeys"]
            .as_array()
            .into_iter()
            .flatten()
            .map(|key| json!({ "objectKey": key, "success": true }))
            .collect();
        axum::Json(json!({ "items": items }))
    }

    async fn echo(axum::Json(body): axum::Json<Value>) -> impl IntoResponse {
        axum::Json(body)
    }

    async fn guarded(headers: HeaderMap) -> impl IntoResponse {
        let authorized = headers
            .get(header::AUTHORIZATION)
            .is_some_and(|value| value == "Bearer pat_123");
        if !authorized {
            return (StatusCode::UNAUTHORIZED, "missing token").into_response();
        }

        let agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        axum::Json(json!([{ "metadata": { "name": agent } }])).into_response()
    }

    fn api_router() -> Router {
        Router::new()
            .route(
                "/apis/api.plugin.halo.run/v1alpha1/plugins/S3Link/objects/{policy}",
                get(list_objects),
            )
            .route(LINK_PATH, post(link))
            .route(POLICIES_PATH, get(guarded))
    }

    #[tokio::test]
    async fn test_list_objects_over_http() {
        let base_url = serve(api_router()).await;
        let api = transport(&base_url).into_api();

        let params = ListObjectsParams::new("s3-minio", 5)
            .with_continuation_token("t-1")
            .with_unlinked(true);
        let page = api.list_objects(&params).await.unwrap();

        assert_eq!(page.objects[0].key, "s3-minio/a.png");
        assert_eq!(
            page.current_token.as_deref(),
            Some("continuationToken=t-1&pageSize=5&unlinked=true")
        );
    }

    #[tokio::test]
    async fn test_basic_listing_over_http() {
        let base_url = serve(api_router()).await;
        let api = transport(&base_url).into_api();

        let page = api.list_objects_basic("s3-minio", 7, None).await.unwrap();
        assert_eq!(page.current_token.as_deref(), Some("pageSize=7"));
    }

    #[tokio::test]
    async fn test_base_path_is_kept() {
        let router = Router::new().nest("/console", api_router());
        let base_url = serve(router).await;
        let api = transport(&format!("{base_url}/console/")).into_api();

        let page = api.list_objects_basic("s3-minio", 1, None).await.unwrap();
        assert_eq!(page.objects.len(), 1);
    }

    #[tokio::test]
    async fn test_link_over_http() {
        let base_url = serve(api_router()).await;
        let api = transport(&base_url).into_api();

        let report = api
            .link_attachments(&LinkRequest::new("s3-minio", ["a.png", "b.png"]))
            .await
            .unwrap();
        let keys: Vec<_> = report.succeeded().map(|i| i.object_key.as_str()).collect();
        assert_eq!(keys, ["a.png", "b.png"]);
    }

    #[tokio::test]
    async fn test_link_request_survives_echo() {
        let base_url = serve(Router::new().route(LINK_PATH, post(echo))).await;
        let transport = transport(&base_url);

        let request = LinkRequest::new("s3-minio", ["photos/猫.png", "docs/a b.pdf"]);
        let echoed = transport
            .post(LINK_PATH, &serde_json::to_value(&request).unwrap())
            .await
            .unwrap();

        let decoded: LinkRequest = serde_json::from_value(echoed).unwrap();
        assert_eq!(decoded, request);
    }

    #[tokio::test]
    async fn test_token_and_user_agent_are_sent() {
        let base_url = serve(api_router()).await;
        let config = ReqwestConfig::new(&base_url)
            .unwrap()
            .with_token("pat_123")
            .with_user_agent("s3link-test/1.0");
        let api = ReqwestTransport::new(config).unwrap().into_api();

        let policies = api.list_policies().await.unwrap();
        assert_eq!(policies[0].name, "s3link-test/1.0");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let base_url = serve(api_router()).await;
        let api = transport(&base_url).into_api();

        let error = api.list_policies().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Authentication);
        assert_eq!(error.status, Some(401));
        assert_eq!(error.message.as_deref(), Some("HTTP 401: missing token"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let base_url = serve(Router::new()).await;
        let api = transport(&base_url).into_api();

        let error = api.list_policies().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = transport(&format!("http://{addr}")).into_api();
        let error = api.list_policies().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::NetworkError);
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        async fn slow() -> impl IntoResponse {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            axum::Json(json!([]))
        }

        let base_url = serve(Router::new().route(POLICIES_PATH, get(slow))).await;
        let config = ReqwestConfig::new(&base_url).unwrap().with_timeout(1);
        let api = ReqwestTransport::new(config).unwrap().into_api();

        let error = api.list_policies().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Timeout);
        assert!(error.is_retryable());
        assert!(error.source.is_some());
    }

    #[tokio::test]
    async fn test_malformed_body_is_serialization_error() {
        let router = Router::new().route(POLICIES_PATH, get(|| async { "not json" }));
        let base_url = serve(router).await;
        let api = transport(&base_url).into_api();

        let error = api.list_policies().await.unwrap_err();
        assert_eq!(error.kind, ErrorKind::Serialization);
        assert!(error.status.is_none());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ReqwestConfig::default().with_token("");
        assert!(ReqwestTransport::new(config).is_err());
    }
}

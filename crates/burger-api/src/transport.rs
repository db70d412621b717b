//! HTTP transport seam.
//!
//! The client goes through [`HttpTransport`] instead of calling reqwest
//! directly so the refresh policy can be exercised deterministically with a
//! scripted transport.

use crate::ApiResult;
use async_trait::async_trait;
use reqwest::Method;

/// Content type the remote API expects on JSON bodies.
const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// A single outgoing request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Access credential, attached verbatim (no `Bearer` prefix).
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// A raw response before envelope interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Whether the transport-level status was OK.
    pub ok: bool,
    /// Response body text.
    pub body: String,
}

/// Trait for HTTP transports.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute one request and return the raw response.
    async fn execute(&self, request: ApiRequest) -> ApiResult<RawResponse>;
}

/// Production transport over a shared reqwest client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let mut builder = self.client.request(request.method, &request.url);

        if let Some(authorization) = request.authorization {
            builder = builder.header("authorization", authorization);
        }
        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", JSON_CONTENT_TYPE)
                .json(&body);
        }

        let response = builder.send().await?;
        let ok = response.status().is_success();
        let body = response.text().await?;

        Ok(RawResponse { ok, body })
    }
}

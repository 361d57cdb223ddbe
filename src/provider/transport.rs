// src/provider/transport.rs

//! Pluggable HTTP transport.
//!
//! The [`DataProvider`](super::DataProvider) never talks to `reqwest`
//! directly; it hands fully-built [`ApiRequest`]s to an [`HttpTransport`].
//!
//! - [`ReqwestTransport`] is the production implementation.
//! - Tests provide their own transport that records requests and replies
//!   with canned JSON.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{AmplifyError, Result};

/// A request as the provider wants it sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PUT,
            url: url.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A successful (2xx) response with its decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Trait abstracting how requests reach the backend.
///
/// Implementations must map every failure (network, non-2xx status,
/// undecodable body) to [`AmplifyError::Http`].
pub trait HttpTransport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + '_>>;
}

/// Real transport backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client; `timeout` of `None` keeps reqwest's default (no timeout).
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| AmplifyError::Http {
            status: None,
            message: format!("building HTTP client: {e}"),
        })?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + '_>> {
        Box::pin(async move {
            debug!(method = %request.method, url = %request.url, query = ?request.query, "sending request");

            let mut builder = self
                .client
                .request(request.method.clone(), &request.url)
                .header(ACCEPT, "application/json");
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(|e| {
                warn!(url = %request.url, error = %e, "request failed");
                AmplifyError::Http {
                    status: e.status().map(|s| s.as_u16()),
                    message: e.to_string(),
                }
            })?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(|e| AmplifyError::Http {
                status: Some(status.as_u16()),
                message: format!("reading response body: {e}"),
            })?;

            if !status.is_success() {
                let message = error_message(status, &bytes);
                warn!(url = %request.url, status = status.as_u16(), %message, "API error");
                return Err(AmplifyError::Http {
                    status: Some(status.as_u16()),
                    message,
                });
            }

            let body = serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| AmplifyError::malformed(Some(status.as_u16()), e))?;

            Ok(ApiResponse {
                status: status.as_u16(),
                body,
            })
        })
    }
}

/// Pick a human-readable message out of an error response.
///
/// Looks for `detail`, `title` or `message` at the top level or in the first
/// entry of an `errors` array; falls back to the status' reason phrase.
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    let from_body = serde_json::from_slice::<Value>(body).ok().and_then(|v| {
        let error = v
            .get("errors")
            .and_then(|e| e.get(0))
            .cloned()
            .unwrap_or(v);
        ["detail", "title", "message"]
            .iter()
            .find_map(|key| error.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    })
}

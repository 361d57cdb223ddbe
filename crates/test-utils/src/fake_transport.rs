// crates/test-utils/src/fake_transport.rs

//! In-memory [`HttpTransport`] for tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use amplify_dash::errors::{AmplifyError, Result};
use amplify_dash::provider::{ApiRequest, ApiResponse, DataProvider, HttpTransport};
use serde_json::{Value, json};

/// Base URL every fake provider is built with.
pub const FAKE_BASE: &str = "http://fake.test/api/v0";

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    /// Answer with `{ "data": <request body's data> }`.
    EchoData,
    Error { status: u16, message: String },
}

#[derive(Debug, Clone)]
struct Route {
    method: &'static str,
    /// Path relative to [`FAKE_BASE`]; a trailing `*` matches any suffix.
    path: String,
    page: Option<u32>,
    delay: Option<Duration>,
    reply: Reply,
}

impl Route {
    fn matches(&self, request: &ApiRequest, path: &str) -> bool {
        if request.method.as_str() != self.method {
            return false;
        }
        let path_ok = match self.path.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => path == self.path,
        };
        let page_ok = match self.page {
            Some(page) => request.query_value("page[number]") == Some(page.to_string().as_str()),
            None => true,
        };
        path_ok && page_ok
    }
}

#[derive(Debug, Default)]
struct State {
    routes: Vec<Route>,
    requests: Vec<ApiRequest>,
}

/// A transport that:
/// - records every request it receives
/// - answers from a list of canned routes (first match wins)
///
/// Clones share state, so a test can keep a handle after moving one into a
/// provider.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<State>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(self, method: &'static str, path: &str, page: Option<u32>, reply: Reply) -> Self {
        self.state.lock().unwrap().routes.push(Route {
            method,
            path: path.to_string(),
            page,
            delay: None,
            reply,
        });
        self
    }

    pub fn on_get(self, path: &str, body: Value) -> Self {
        self.route("GET", path, None, Reply::Json(body))
    }

    pub fn on_get_page(self, path: &str, page: u32, body: Value) -> Self {
        self.route("GET", path, Some(page), Reply::Json(body))
    }

    pub fn on_get_error(self, path: &str, status: u16, message: &str) -> Self {
        self.route(
            "GET",
            path,
            None,
            Reply::Error {
                status,
                message: message.to_string(),
            },
        )
    }

    /// Echo the `data` of any PUT under `path` back to the caller.
    pub fn echo_put(self, path: &str) -> Self {
        self.route("PUT", path, None, Reply::EchoData)
    }

    /// Delay the most recently added route.
    pub fn delayed(self, delay: Duration) -> Self {
        if let Some(route) = self.state.lock().unwrap().routes.last_mut() {
            route.delay = Some(delay);
        }
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Provider over a clone of this transport, rooted at [`FAKE_BASE`].
    pub fn provider(&self) -> DataProvider<FakeTransport> {
        DataProvider::new(FAKE_BASE, self.clone())
    }
}

impl HttpTransport for FakeTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + '_>> {
        let route = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request.clone());
            let path = request
                .url
                .strip_prefix(FAKE_BASE)
                .unwrap_or(&request.url)
                .trim_start_matches('/')
                .to_string();
            state
                .routes
                .iter()
                .find(|r| r.matches(&request, &path))
                .cloned()
        };

        Box::pin(async move {
            let Some(route) = route else {
                return Err(AmplifyError::Http {
                    status: Some(404),
                    message: format!("no fake route for {} {}", request.method, request.url),
                });
            };
            if let Some(delay) = route.delay {
                tokio::time::sleep(delay).await;
            }
            match route.reply {
                Reply::Json(body) => Ok(ApiResponse { status: 200, body }),
                Reply::EchoData => {
                    let data = request
                        .body
                        .as_ref()
                        .and_then(|b| b.get("data"))
                        .cloned()
                        .unwrap_or(Value::Null);
                    Ok(ApiResponse {
                        status: 200,
                        body: json!({ "data": data }),
                    })
                }
                Reply::Error { status, message } => Err(AmplifyError::Http {
                    status: Some(status),
                    message,
                }),
            }
        })
    }
}

// src/provider/mod.rs

//! List adapter over the JSON-envelope REST API.
//!
//! [`DataProvider`] exposes a small uniform contract (list, get, create) for
//! every resource of the API (`jobs`, `queue`, `graph`, analytics tables) and
//! rejects the rest of the usual admin contract up front:
//!
//! - list: `GET <base>/<resource>?page[number]=..&page[size]=..&filter[k]=v&sort=[-]field`
//!   answered with `{ data: [...], meta: { count } }`
//! - get: `GET <base>/<resource>/<id>` answered with `{ data: {...} }`
//! - create: `PUT <base>/<resource>/<uuid>` with `{ data: { id, attributes } }`
//!
//! Transport failures are propagated as they come; nothing is retried.

pub mod query;
pub mod transport;

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::debug;
use reqwest::Url;
use uuid::Uuid;

use crate::errors::{AmplifyError, Operation, Result};

pub use query::{DEFAULT_PER_PAGE, ListParams};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};

/// One page of a list request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R> {
    pub items: Vec<R>,
    /// Server-reported size of the whole collection, not of this page.
    pub total: u64,
    /// `meta.totalPages`, when the server sends it.
    pub total_pages: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope<R> {
    data: Vec<R>,
    meta: ListMeta,
}

#[derive(Debug, Deserialize)]
struct ListMeta {
    count: u64,
    #[serde(default, rename = "totalPages")]
    total_pages: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Envelope<R> {
    data: R,
}

/// Client-side handle on the API.
///
/// The base URL is fixed at construction time; the transport is shared, so
/// clones are cheap and can be moved into spawned tasks.
#[derive(Debug)]
pub struct DataProvider<T> {
    base_url: String,
    transport: Arc<T>,
}

impl<T> Clone for DataProvider<T> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: HttpTransport> DataProvider<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self::with_shared_transport(base_url, Arc::new(transport))
    }

    pub fn with_shared_transport(base_url: impl Into<String>, transport: Arc<T>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource.trim_matches('/'))
    }

    /// `<base>/<resource>/<id>` with `id` percent-encoded as one path segment.
    fn record_url(&self, resource: &str, id: &str) -> Result<String> {
        let raw = self.resource_url(resource);
        let mut url = Url::parse(&raw)
            .map_err(|e| AmplifyError::ConfigError(format!("invalid API URL '{raw}': {e}")))?;
        url.path_segments_mut()
            .map_err(|_| AmplifyError::ConfigError(format!("API URL '{raw}' cannot hold a path")))?
            .push(id);
        Ok(url.into())
    }

    /// Fetch one page of `resource`.
    pub async fn list<R: DeserializeOwned>(
        &self,
        resource: &str,
        params: &ListParams,
    ) -> Result<ListPage<R>> {
        let request = ApiRequest::get(self.resource_url(resource)).with_query(params.to_query());
        let response = self.transport.send(request).await?;

        let envelope: ListEnvelope<R> = decode(response)?;
        debug!(
            resource,
            page = params.page,
            items = envelope.data.len(),
            total = envelope.meta.count,
            "list page received"
        );

        Ok(ListPage {
            items: envelope.data,
            total: envelope.meta.count,
            total_pages: envelope.meta.total_pages,
        })
    }

    /// Fetch every page of `resource`, starting at `params.page`.
    ///
    /// Stops at the first of:
    /// - the collected items reach the server-reported total
    /// - the page number reaches `meta.totalPages`
    /// - a page comes back shorter than `per_page` (including empty)
    pub async fn list_all<R: DeserializeOwned>(
        &self,
        resource: &str,
        params: &ListParams,
    ) -> Result<ListPage<R>> {
        let mut params = params.clone();
        let mut items = Vec::new();

        loop {
            let page: ListPage<R> = self.list(resource, &params).await?;
            let fetched = page.items.len();
            items.extend(page.items);

            let last_page = page.total_pages.is_some_and(|n| u64::from(params.page) >= n);
            let short_page = fetched < params.per_page as usize;
            if short_page || last_page || items.len() as u64 >= page.total {
                debug!(resource, pages = params.page, items = items.len(), "list_all done");
                return Ok(ListPage {
                    items,
                    total: page.total,
                    total_pages: page.total_pages,
                });
            }
            params.page += 1;
        }
    }

    /// Fetch a single record.
    pub async fn get<R: DeserializeOwned>(&self, resource: &str, id: &str) -> Result<R> {
        let request = ApiRequest::get(self.record_url(resource, id)?);
        let response = self.transport.send(request).await?;
        let envelope: Envelope<R> = decode(response)?;
        Ok(envelope.data)
    }

    /// Create a record under a freshly generated id.
    ///
    /// The id is chosen here, before the server sees the record, so the PUT
    /// targets a known location and can be retried safely.
    pub async fn create<R: DeserializeOwned>(
        &self,
        resource: &str,
        attributes: Map<String, Value>,
    ) -> Result<R> {
        let id = Uuid::new_v4().to_string();
        debug!(resource, %id, "creating record");

        let body = json!({
            "data": {
                "id": id,
                "attributes": attributes,
            }
        });
        let request = ApiRequest::put(self.record_url(resource, &id)?, body);
        let response = self.transport.send(request).await?;
        let envelope: Envelope<R> = decode(response)?;
        Ok(envelope.data)
    }

    pub async fn get_many(&self, resource: &str, _ids: &[String]) -> Result<Vec<Value>> {
        unsupported(resource, Operation::GetMany)
    }

    pub async fn get_many_reference(
        &self,
        resource: &str,
        _target: &str,
        _id: &str,
        _params: &ListParams,
    ) -> Result<ListPage<Value>> {
        unsupported(resource, Operation::GetManyReference)
    }

    pub async fn update(
        &self,
        resource: &str,
        _id: &str,
        _attributes: Map<String, Value>,
    ) -> Result<Value> {
        unsupported(resource, Operation::Update)
    }

    pub async fn update_many(
        &self,
        resource: &str,
        _ids: &[String],
        _attributes: Map<String, Value>,
    ) -> Result<Vec<String>> {
        unsupported(resource, Operation::UpdateMany)
    }

    pub async fn delete(&self, resource: &str, _id: &str) -> Result<Value> {
        unsupported(resource, Operation::Delete)
    }

    pub async fn delete_many(&self, resource: &str, _ids: &[String]) -> Result<Vec<String>> {
        unsupported(resource, Operation::DeleteMany)
    }
}

fn unsupported<R>(resource: &str, operation: Operation) -> Result<R> {
    debug!(resource, %operation, "rejecting unsupported operation");
    Err(AmplifyError::NotImplemented { operation })
}

fn decode<R: DeserializeOwned>(response: ApiResponse) -> Result<R> {
    serde_json::from_value(response.body)
        .map_err(|e| AmplifyError::malformed(Some(response.status), e))
}

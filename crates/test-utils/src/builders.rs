// crates/test-utils/src/builders.rs

#![allow(dead_code)]

use amplify_dash::config::{ConfigFile, PanelConfig, RawConfigFile};
use amplify_dash::graph::{InputRef, NodeRecord};
use serde_json::{Value, json};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    /// Defaults, but with no panels.
    pub fn new() -> Self {
        let mut config = RawConfigFile::default();
        config.panel.clear();
        Self { config }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.config.api.base_url = url.to_string();
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.config.list.per_page = per_page;
        self
    }

    pub fn with_panel(mut self, panel: PanelConfig) -> Self {
        self.config.panel.push(panel);
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Node with a single root marker.
pub fn root(id: &str) -> NodeRecord {
    NodeRecord::new(id, vec![InputRef::Root])
}

/// Node depending on each of `parents`.
pub fn child(id: &str, parents: &[&str]) -> NodeRecord {
    NodeRecord::new(id, parents.iter().map(|p| InputRef::dependency(*p)).collect())
}

/// Wire form of a graph node, as the `graph` resource serves it.
pub fn graph_item(id: &str, job_id: &str, inputs: Value) -> Value {
    json!({
        "id": id,
        "attributes": {
            "inputs": inputs,
            "job_id": job_id,
            "outputs": [{ "id": "default", "path": "/outputs" }],
        },
        "links": { "self": format!("/api/v0/graph/{id}") },
    })
}

/// `{ data, meta: { count } }` list envelope.
pub fn list_body(items: Vec<Value>, count: u64) -> Value {
    json!({
        "data": items,
        "meta": { "count": count },
    })
}

/// List envelope that also reports `meta.totalPages`.
pub fn paged_body(items: Vec<Value>, count: u64, total_pages: u64) -> Value {
    json!({
        "data": items,
        "meta": { "count": count, "totalPages": total_pages },
    })
}

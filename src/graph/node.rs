// src/graph/node.rs

//! Node records as served by the `graph` resource.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use serde_json::{Map, Value};

/// One entry of a node's `inputs` list.
///
/// Decoding a lone entry is strict: it must be a root marker or name a node.
/// Inside a [`NodeRecord`] such entries (`{ "root": false }`, a bare `path`)
/// are dropped instead, since they carry no edge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawInputRef")]
pub enum InputRef {
    /// `{ "root": true }`: the owning node has no upstream dependency.
    Root,
    /// `{ "node_id": "<id>" }`: the owning node consumes output of `<id>`.
    Dependency(String),
}

impl InputRef {
    pub fn dependency(node_id: impl Into<String>) -> Self {
        InputRef::Dependency(node_id.into())
    }

    pub fn is_root(&self) -> bool {
        matches!(self, InputRef::Root)
    }

    /// Upstream node id, if this entry is a dependency reference.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            InputRef::Root => None,
            InputRef::Dependency(id) => Some(id.as_str()),
        }
    }
}

/// Wire form of an input entry. Other keys (`path`, `output_id`,
/// `predicate`) are ignored.
#[derive(Debug, Deserialize)]
struct RawInputRef {
    #[serde(default)]
    root: Option<bool>,
    #[serde(default, alias = "step_id")]
    node_id: Option<String>,
}

impl TryFrom<RawInputRef> for InputRef {
    type Error = String;

    fn try_from(raw: RawInputRef) -> Result<Self, Self::Error> {
        match (raw.root, raw.node_id) {
            (Some(true), _) => Ok(InputRef::Root),
            (_, Some(id)) => Ok(InputRef::Dependency(id)),
            _ => Err("input is neither a root marker nor a node reference".to_string()),
        }
    }
}

/// A unit of the processing-dependency graph.
///
/// Accepts both the enveloped form
/// `{ "id": "a", "attributes": { "inputs": [...], "job_id": "j" } }`
/// and a flat `{ "id": "a", "inputs": [...], "job_id": "j" }` record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNodeRecord")]
pub struct NodeRecord {
    pub id: String,
    pub inputs: Vec<InputRef>,
    pub job_id: Option<String>,
    /// Remaining attributes, carried but not interpreted.
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawNodeRecord {
    id: String,
    #[serde(default)]
    attributes: Option<Map<String, Value>>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl TryFrom<RawNodeRecord> for NodeRecord {
    type Error = String;

    fn try_from(raw: RawNodeRecord) -> Result<Self, Self::Error> {
        let mut attrs = raw.attributes.unwrap_or(raw.rest);

        let inputs = match attrs.remove("inputs") {
            Some(value) => serde_json::from_value::<Vec<RawInputRef>>(value)
                .map_err(|e| format!("node '{}': invalid inputs: {e}", raw.id))?
                .into_iter()
                .filter_map(|entry| InputRef::try_from(entry).ok())
                .collect(),
            None => Vec::new(),
        };

        let job_id = match attrs.remove("job_id") {
            Some(Value::String(s)) => Some(s),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Ok(NodeRecord {
            id: raw.id,
            inputs,
            job_id,
            extra: attrs,
        })
    }
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, inputs: Vec<InputRef>) -> Self {
        Self {
            id: id.into(),
            inputs,
            job_id: None,
            extra: Map::new(),
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// True if any input entry is a root marker, whatever else it lists.
    pub fn is_root(&self) -> bool {
        self.inputs.iter().any(InputRef::is_root)
    }

    /// Distinct upstream node ids, in first-mention order.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.inputs
            .iter()
            .filter_map(InputRef::node_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Metadata copied onto the tree node built from this record.
    pub(crate) fn tree_attributes(&self) -> BTreeMap<String, Value> {
        let mut attrs = BTreeMap::new();
        if let Some(job_id) = &self.job_id {
            attrs.insert("job_id".to_string(), Value::String(job_id.clone()));
        }
        attrs
    }
}

// src/graph/assemble.rs

//! Forest reconstruction from a flat node collection.
//!
//! A node is a root when any of its inputs is a root marker. Below a root,
//! the children of node `X` are all records holding a dependency reference to
//! `X`, in collection order. A record that is both a root and somebody's
//! dependent shows up in both places; nothing is deduplicated across trees.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{AmplifyError, Result};
use crate::graph::node::NodeRecord;

/// Presentation tree built from node records.
///
/// `children` is `None` for a leaf and is omitted when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: None,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this tree, the root included.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Parent id -> dependents, each list in collection order.
#[derive(Debug)]
struct ChildIndex<'a> {
    children: HashMap<&'a str, Vec<&'a NodeRecord>>,
}

impl<'a> ChildIndex<'a> {
    fn new(nodes: &'a [NodeRecord]) -> Self {
        let mut children: HashMap<&'a str, Vec<&'a NodeRecord>> = HashMap::new();
        for node in nodes {
            for parent in node.dependencies() {
                children.entry(parent).or_default().push(node);
            }
        }
        Self { children }
    }

    fn children_of(&self, id: &str) -> &[&'a NodeRecord] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Return the nodes carrying at least one root marker, in source order.
pub fn find_roots(nodes: &[NodeRecord]) -> Vec<&NodeRecord> {
    nodes.iter().filter(|n| n.is_root()).collect()
}

/// Build the tree hanging below `root`, looking up dependents in `nodes`.
///
/// Fails with [`AmplifyError::CycleDetected`] if a node is reached again
/// while it is still on the current path.
pub fn build_tree(root: &NodeRecord, nodes: &[NodeRecord]) -> Result<TreeNode> {
    let index = ChildIndex::new(nodes);
    expand(root, &index, &mut Vec::new())
}

/// One tree per root, in root discovery order. `nodes` is left untouched.
pub fn assemble_forest(nodes: &[NodeRecord]) -> Result<Vec<TreeNode>> {
    let roots = find_roots(nodes);
    debug!(nodes = nodes.len(), roots = roots.len(), "assembling forest");

    let index = ChildIndex::new(nodes);
    roots
        .into_iter()
        .map(|root| expand(root, &index, &mut Vec::new()))
        .collect()
}

fn expand<'a>(
    node: &'a NodeRecord,
    index: &ChildIndex<'a>,
    path: &mut Vec<&'a str>,
) -> Result<TreeNode> {
    if path.contains(&node.id.as_str()) {
        path.push(&node.id);
        return Err(AmplifyError::CycleDetected(path.join(" -> ")));
    }
    path.push(&node.id);

    let dependents = index.children_of(&node.id);
    let children = if dependents.is_empty() {
        None
    } else {
        Some(
            dependents
                .iter()
                .map(|&child| expand(child, index, path))
                .collect::<Result<Vec<_>>>()?,
        )
    };

    path.pop();

    Ok(TreeNode {
        name: node.id.clone(),
        attributes: node.tree_attributes(),
        children,
    })
}

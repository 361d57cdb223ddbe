// src/graph/render.rs

//! Plain-text rendering of assembled trees for the terminal.

use std::fmt::Write;

use serde_json::Value;

use crate::graph::assemble::TreeNode;

/// Render a single tree, one node per line, using box-drawing connectors.
///
/// ```text
/// fetch (job: download)
/// ├── detect (job: content-type)
/// │   └── summarize
/// └── profile
/// ```
pub fn render_tree(tree: &TreeNode) -> String {
    let mut out = String::new();
    out.push_str(&label(tree));
    out.push('\n');
    render_children(tree, "", &mut out);
    out
}

/// Render every tree of a forest, separated by blank lines.
pub fn render_forest(forest: &[TreeNode]) -> String {
    forest
        .iter()
        .map(render_tree)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_children(node: &TreeNode, prefix: &str, out: &mut String) {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{prefix}{branch}{}", label(child));
        render_children(child, &format!("{prefix}{indent}"), out);
    }
}

fn label(node: &TreeNode) -> String {
    match node.attributes.get("job_id") {
        Some(Value::String(job)) => format!("{} (job: {job})", node.name),
        _ => node.name.clone(),
    }
}

// src/graph/mod.rs

//! Processing-step dependency graph.
//!
//! - [`node`] decodes the records served by the `graph` resource.
//! - [`assemble`] turns a flat record collection into a forest of trees.
//! - [`render`] prints assembled trees for the terminal.

pub mod assemble;
pub mod node;
pub mod render;

pub use assemble::{TreeNode, assemble_forest, build_tree, find_roots};
pub use node::{InputRef, NodeRecord};
pub use render::{render_forest, render_tree};

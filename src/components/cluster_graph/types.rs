//! Graph data structures for input to the cluster graph component.

use serde::{Deserialize, Serialize};

/// Whether a position belongs to a root node or to one of its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
	/// Top-level node.
	Root,
	/// Leaf owned by a root.
	Child,
}

/// A leaf node owned by exactly one root.
#[derive(Clone, Debug, Deserialize)]
pub struct ChildNode<T = serde_json::Value> {
	/// Unique identifier across the whole graph (roots and children).
	pub id: String,
	/// Free-form payload handed back untouched in click events.
	#[serde(default, rename = "additionalData")]
	pub additional_data: T,
}

/// A top-level node. Links to other roots and owns a cluster of children.
#[derive(Clone, Debug, Deserialize)]
pub struct RootNode<T = serde_json::Value> {
	/// Unique identifier across the whole graph (roots and children).
	pub id: String,
	/// Ids of other roots this root draws an edge to, in drawing order.
	#[serde(default)]
	pub connections: Vec<String>,
	/// Children clustered around this root.
	#[serde(default)]
	pub children: Vec<ChildNode<T>>,
	/// Free-form payload handed back untouched in click events.
	#[serde(default, rename = "additionalData")]
	pub additional_data: T,
}

/// Complete graph data: the ordered list of root nodes.
#[derive(Clone, Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct GraphData<T = serde_json::Value> {
	/// Root nodes in layout and drawing order.
	pub nodes: Vec<RootNode<T>>,
}

impl<T> Default for GraphData<T> {
	fn default() -> Self {
		Self { nodes: Vec::new() }
	}
}

impl<T> GraphData<T> {
	/// Total number of nodes, roots and children combined.
	pub fn node_count(&self) -> usize {
		self.nodes.iter().map(|root| 1 + root.children.len()).sum()
	}
}

//! Node positions and the root/child relations derived from them.
//!
//! Roots are scattered uniformly over the canvas, then every child is dropped
//! into a small box around its already-placed root. Relations are indexed once
//! right after placement so lookups never rescan the position list.

use std::collections::{HashMap, HashSet};
use std::ops::Deref;

use log::debug;
use rand::Rng;
use serde::Serialize;

use super::scale::ScaleConfig;
use super::types::{NodeKind, RootNode};
use crate::error::{Error, Result};

/// Generated placement and metadata for one node.
#[derive(Clone, Debug, Serialize)]
pub struct NodePosition<T> {
	/// Node id, also the id of its rendered circle.
	pub id: String,
	/// Root or child.
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Ids this node draws an edge to. A child always has exactly its root.
	pub connections: Vec<String>,
	/// Horizontal canvas coordinate.
	pub cx: i64,
	/// Vertical canvas coordinate.
	pub cy: i64,
	/// Payload copied from the input node.
	#[serde(rename = "additionalData")]
	pub additional_data: T,
}

#[derive(Clone, Debug, Default)]
struct Relations {
	children: Vec<usize>,
	parent: Option<usize>,
}

/// The flat list of positions for one generated graph, roots first.
#[derive(Clone, Debug)]
pub struct GraphLayout<T> {
	positions: Vec<NodePosition<T>>,
	relations: Vec<Relations>,
	index: HashMap<String, usize>,
	canvas_size: i64,
}

/// Check the structural invariants the layout relies on.
///
/// Ids must be unique across roots and children together, and every root
/// connection must name a root of the same graph.
pub fn validate<T>(nodes: &[RootNode<T>]) -> Result<()> {
	if nodes.is_empty() {
		return Err(Error::EmptyGraph);
	}

	let mut seen = HashSet::new();
	for id in node_ids(nodes) {
		if !seen.insert(id.as_str()) {
			return Err(Error::DuplicateId { id: id.clone() });
		}
	}

	let roots: HashSet<&str> = nodes.iter().map(|root| root.id.as_str()).collect();
	for root in nodes {
		if let Some(target) = root
			.connections
			.iter()
			.find(|target| !roots.contains(target.as_str()))
		{
			return Err(Error::UnknownConnection {
				from: root.id.clone(),
				to: target.clone(),
			});
		}
	}

	Ok(())
}

fn node_ids<T>(nodes: &[RootNode<T>]) -> impl Iterator<Item = &String> {
	nodes.iter().flat_map(|root| {
		std::iter::once(&root.id).chain(root.children.iter().map(|child| &child.id))
	})
}

/// Reject node ids that are already taken by other elements of the host
/// document, such as the container the scene is inserted into.
///
/// Rendered circles are looked up by node id, so a clash would bind a node's
/// click handler to the wrong element.
pub fn check_reserved_ids<T>(nodes: &[RootNode<T>], reserved: &[&str]) -> Result<()> {
	match node_ids(nodes).find(|id| reserved.contains(&id.as_str())) {
		Some(id) => Err(Error::DuplicateId { id: id.clone() }),
		None => Ok(()),
	}
}

/// Uniform integer in `[low, high)`, or `low` when the range is empty.
fn draw<R: Rng + ?Sized>(rng: &mut R, low: i64, high: i64) -> i64 {
	if low < high { rng.gen_range(low..high) } else { low }
}

/// Place every root and child of `nodes` on a fresh canvas.
///
/// The input is validated first. Positions come out as all roots in input
/// order, followed by each root's children in input order.
pub fn generate_positions<T: Clone, R: Rng + ?Sized>(
	nodes: &[RootNode<T>],
	scale: &ScaleConfig,
	rng: &mut R,
) -> Result<GraphLayout<T>> {
	validate(nodes)?;

	let size = scale.canvas_size(nodes.len());
	let child_count: usize = nodes.iter().map(|root| root.children.len()).sum();
	let mut positions = Vec::with_capacity(nodes.len() + child_count);

	for root in nodes {
		let cx = scale.clamp(size, draw(rng, 0, size));
		let cy = scale.clamp(size, draw(rng, 0, size));
		positions.push(NodePosition {
			id: root.id.clone(),
			kind: NodeKind::Root,
			connections: root.connections.clone(),
			cx,
			cy,
			additional_data: root.additional_data.clone(),
		});
	}

	let spread = scale.child_spread;
	for (i, root) in nodes.iter().enumerate() {
		let (rx, ry) = (positions[i].cx, positions[i].cy);
		for child in &root.children {
			let cx = scale.clamp(size, draw(rng, rx - spread, rx + spread));
			let cy = scale.clamp(size, draw(rng, ry - spread, ry + spread));
			positions.push(NodePosition {
				id: child.id.clone(),
				kind: NodeKind::Child,
				connections: vec![root.id.clone()],
				cx,
				cy,
				additional_data: child.additional_data.clone(),
			});
		}
	}

	debug!(
		"cluster-graph: placed {} roots and {} children on a {}x{} canvas",
		nodes.len(),
		child_count,
		size,
		size
	);

	Ok(GraphLayout::new(positions, size))
}

impl<T> GraphLayout<T> {
	/// Wrap a finished position list and index its relations.
	pub fn new(positions: Vec<NodePosition<T>>, canvas_size: i64) -> Self {
		let mut index = HashMap::with_capacity(positions.len());
		for (i, position) in positions.iter().enumerate() {
			index.entry(position.id.clone()).or_insert(i);
		}

		let mut layout = Self {
			relations: vec![Relations::default(); positions.len()],
			positions,
			index,
			canvas_size,
		};
		layout.attach_children();
		layout.attach_parents();
		layout
	}

	fn owning_root(&self, position: &NodePosition<T>) -> Option<usize> {
		position
			.connections
			.first()
			.and_then(|id| self.index.get(id))
			.copied()
			.filter(|&idx| self.positions[idx].kind == NodeKind::Root)
	}

	/// Record, for every root, the children whose connection names it.
	fn attach_children(&mut self) {
		for i in 0..self.positions.len() {
			if self.positions[i].kind != NodeKind::Child {
				continue;
			}
			if let Some(root) = self.owning_root(&self.positions[i]) {
				self.relations[root].children.push(i);
			}
		}
	}

	/// Record, for every child, the root named by its connection.
	fn attach_parents(&mut self) {
		for i in 0..self.positions.len() {
			if self.positions[i].kind != NodeKind::Child {
				continue;
			}
			self.relations[i].parent = self.owning_root(&self.positions[i]);
		}
	}

	/// Side length of the square canvas the positions were generated on.
	pub fn canvas_size(&self) -> i64 {
		self.canvas_size
	}

	/// Number of positions, roots and children combined.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// Whether the layout holds no positions.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	/// Positions in layout order: roots, then children grouped by root.
	pub fn positions(&self) -> &[NodePosition<T>] {
		&self.positions
	}

	/// Look up a position by node id.
	pub fn position(&self, id: &str) -> Option<&NodePosition<T>> {
		self.index.get(id).map(|&idx| &self.positions[idx])
	}

	/// View of the position at `index`, with access to its relations.
	pub fn view(&self, index: usize) -> Option<NodeView<'_, T>> {
		(index < self.positions.len()).then_some(NodeView {
			layout: self,
			index,
		})
	}

	/// View of the position with this node id.
	pub fn view_by_id(&self, id: &str) -> Option<NodeView<'_, T>> {
		self.index.get(id).and_then(|&idx| self.view(idx))
	}

	/// All positions in layout order.
	pub fn iter(&self) -> impl Iterator<Item = NodeView<'_, T>> {
		(0..self.positions.len()).map(move |index| NodeView {
			layout: self,
			index,
		})
	}

	/// Root positions in input order.
	pub fn roots(&self) -> impl Iterator<Item = NodeView<'_, T>> {
		self.iter().filter(|view| view.kind == NodeKind::Root)
	}

	/// Number of edges the layout draws: one per connection entry.
	pub fn edge_count(&self) -> usize {
		self.positions.iter().map(|p| p.connections.len()).sum()
	}
}

/// A borrowed position together with access to its relations.
///
/// This is what click handlers receive.
#[derive(Debug)]
pub struct NodeView<'a, T> {
	layout: &'a GraphLayout<T>,
	index: usize,
}

impl<T> Clone for NodeView<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for NodeView<'_, T> {}

impl<'a, T> NodeView<'a, T> {
	/// Index of this position in the layout.
	pub fn index(&self) -> usize {
		self.index
	}

	/// The underlying position record.
	pub fn position(&self) -> &'a NodePosition<T> {
		&self.layout.positions[self.index]
	}

	/// Children owned by this root. Always empty for a child.
	pub fn children(self) -> impl Iterator<Item = NodeView<'a, T>> + 'a {
		let layout = self.layout;
		layout.relations[self.index]
			.children
			.iter()
			.map(move |&index| NodeView { layout, index })
	}

	/// The root owning this child. Always `None` for a root.
	pub fn parent(self) -> Option<NodeView<'a, T>> {
		let layout = self.layout;
		layout.relations[self.index]
			.parent
			.map(|index| NodeView { layout, index })
	}
}

impl<T> Deref for NodeView<'_, T> {
	type Target = NodePosition<T>;

	fn deref(&self) -> &NodePosition<T> {
		self.position()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::cluster_graph::types::ChildNode;

	fn root(id: &str, connections: &[&str], children: &[&str]) -> RootNode<()> {
		RootNode {
			id: id.to_string(),
			connections: connections.iter().map(|c| c.to_string()).collect(),
			children: children
				.iter()
				.map(|c| ChildNode {
					id: c.to_string(),
					additional_data: (),
				})
				.collect(),
			additional_data: (),
		}
	}

	fn layout(nodes: &[RootNode<()>]) -> GraphLayout<()> {
		let mut rng = StdRng::seed_from_u64(7);
		generate_positions(nodes, &ScaleConfig::default(), &mut rng).unwrap()
	}

	#[test]
	fn rejects_empty_graph() {
		let nodes: Vec<RootNode<()>> = Vec::new();
		assert!(matches!(validate(&nodes), Err(Error::EmptyGraph)));
	}

	#[test]
	fn rejects_duplicate_between_root_and_child() {
		let nodes = vec![root("a", &[], &["b"]), root("b", &[], &[])];
		match validate(&nodes) {
			Err(Error::DuplicateId { id }) => assert_eq!(id, "b"),
			other => panic!("expected duplicate id, got {other:?}"),
		}
	}

	#[test]
	fn rejects_duplicate_children_under_different_roots() {
		let nodes = vec![root("r1", &[], &["leaf"]), root("r2", &[], &["leaf"])];
		match validate(&nodes) {
			Err(Error::DuplicateId { id }) => assert_eq!(id, "leaf"),
			other => panic!("expected duplicate id, got {other:?}"),
		}
	}

	#[test]
	fn rejects_duplicate_roots() {
		let nodes = vec![root("r1", &[], &[]), root("r1", &[], &["c1"])];
		match validate(&nodes) {
			Err(Error::DuplicateId { id }) => assert_eq!(id, "r1"),
			other => panic!("expected duplicate id, got {other:?}"),
		}
	}

	#[test]
	fn reserved_ids_are_rejected() {
		let nodes = vec![root("r1", &[], &["svg"])];
		match check_reserved_ids(&nodes, &["svg"]) {
			Err(Error::DuplicateId { id }) => assert_eq!(id, "svg"),
			other => panic!("expected duplicate id, got {other:?}"),
		}
		assert!(check_reserved_ids(&nodes, &["host"]).is_ok());
		assert!(check_reserved_ids(&nodes, &[]).is_ok());
	}

	#[test]
	fn single_root_follows_small_canvas_clamp() {
		// Canvas 25: draws from 5 up lose 10, draws below 5 gain 20.
		let nodes = vec![root("r1", &[], &[])];
		let mut negative = false;
		for seed in 0..50 {
			let mut rng = StdRng::seed_from_u64(seed);
			let layout = generate_positions(&nodes, &ScaleConfig::default(), &mut rng).unwrap();
			assert_eq!(layout.canvas_size(), 25);
			let r1 = layout.position("r1").unwrap();
			for coord in [r1.cx, r1.cy] {
				assert!((-5..=24).contains(&coord), "seed {seed}: {coord}");
				assert!(!(15..20).contains(&coord), "seed {seed}: {coord}");
				negative |= coord < 0;
			}
		}
		assert!(negative, "expected the far-edge branch to go below zero");
	}

	#[test]
	fn rejects_connection_to_unknown_root() {
		let nodes = vec![root("a", &["ghost"], &[])];
		match validate(&nodes) {
			Err(Error::UnknownConnection { from, to }) => {
				assert_eq!(from, "a");
				assert_eq!(to, "ghost");
			}
			other => panic!("expected unknown connection, got {other:?}"),
		}
	}

	#[test]
	fn rejects_connection_to_child() {
		let nodes = vec![root("a", &["c"], &["c"])];
		assert!(matches!(
			validate(&nodes),
			Err(Error::UnknownConnection { .. })
		));
	}

	#[test]
	fn roots_come_first_then_children_by_root() {
		let nodes = vec![root("r1", &[], &["a", "b"]), root("r2", &["r1"], &["c"])];
		let layout = layout(&nodes);
		let ids: Vec<&str> = layout.positions().iter().map(|p| p.id.as_str()).collect();
		assert_eq!(ids, ["r1", "r2", "a", "b", "c"]);
		assert_eq!(layout.canvas_size(), 50);
		assert_eq!(layout.position("r2").unwrap().connections, ["r1"]);
		assert_eq!(layout.position("c").unwrap().connections, ["r2"]);
	}

	#[test]
	fn children_partition_by_owning_root() {
		let nodes = vec![
			root("r1", &[], &["a", "b"]),
			root("r2", &[], &[]),
			root("r3", &[], &["c"]),
		];
		let layout = layout(&nodes);

		let owned: Vec<Vec<&str>> = layout
			.roots()
			.map(|r| r.children().map(|c| c.position().id.as_str()).collect())
			.collect();
		assert_eq!(owned, vec![vec!["a", "b"], vec![], vec!["c"]]);

		let child = layout.view_by_id("b").unwrap();
		assert_eq!(child.children().count(), 0);
		let parent = child.parent().unwrap();
		assert_eq!(parent.id, "r1");
		assert_eq!(parent.kind, NodeKind::Root);
		assert!(layout.view_by_id("r1").unwrap().parent().is_none());
	}

	#[test]
	fn parent_is_stable_across_calls() {
		let nodes = vec![root("r1", &[], &["c1"]), root("r2", &[], &[])];
		let layout = layout(&nodes);
		let child = layout.view_by_id("c1").unwrap();
		let (first, second) = (child.parent().unwrap(), child.parent().unwrap());
		assert_eq!(first.id, second.id);
		assert_eq!((first.cx, first.cy), (second.cx, second.cy));
	}

	#[test]
	fn children_stay_near_their_root() {
		let children: Vec<String> = (0..30).map(|i| format!("c{i}")).collect();
		let child_ids: Vec<&str> = children.iter().map(String::as_str).collect();
		let nodes = vec![
			root("r1", &[], &child_ids),
			root("r2", &[], &[]),
			root("r3", &[], &[]),
			root("r4", &[], &[]),
		];
		let layout = layout(&nodes);
		let parent = layout.view_by_id("r1").unwrap();
		// Raw draw is within 20 of the root, clamping shifts by at most 20 more.
		for child in parent.children() {
			assert!((child.cx - parent.cx).abs() <= 40, "{:?}", child.position());
			assert!((child.cy - parent.cy).abs() <= 40, "{:?}", child.position());
		}
	}

	#[test]
	fn edge_count_sums_connections() {
		let nodes = vec![root("r1", &["r2"], &["a", "b"]), root("r2", &["r1"], &[])];
		assert_eq!(layout(&nodes).edge_count(), 4);
	}
}

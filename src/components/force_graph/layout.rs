//! Layout model: per-node position and velocity seeded from the input graph.
//!
//! Nodes live in an arena (`Vec`) addressed by [`NodeIdx`]; string ids are
//! resolved once through an index map. Edges are kept as supplied and resolved
//! lazily, so an edge naming an unknown node is simply skipped by whoever reads
//! it. The model also carries the single external-override hook: at most one
//! node may be pinned, meaning its position is owned by the interaction
//! controller instead of the simulator.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::debug;
use rand::Rng;
use serde_json::Value;

use super::types::{GraphData, GraphEdge, NodeSelection};

/// Base radius of the seeding circle around the viewport center.
const SEED_RADIUS: f64 = 80.0;
/// Upper bound of the random jitter added to the seeding radius.
const SEED_JITTER: f64 = 60.0;
/// Angular step between consecutive nodes at seeding, in radians.
/// Not a rational fraction of a turn, so no two nodes start symmetric.
const SEED_ANGLE_STEP: f64 = 2.4;

/// Stable handle to a node within one [`LayoutModel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(usize);

impl NodeIdx {
	/// Position of the node in draw order.
	pub fn index(self) -> usize {
		self.0
	}
}

/// A node together with its simulated physical state.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	/// Id from the input.
	pub id: String,
	/// Display label.
	pub name: String,
	/// Category tag, picks the color.
	pub category: String,
	/// Weight clamped to be non-negative.
	pub weight: f64,
	/// Opaque payload for the selection event.
	pub definition: Value,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity.
	pub vx: f64,
	/// Vertical velocity.
	pub vy: f64,
}

impl LayoutNode {
	/// The payload sent to the detail view when this node is clicked.
	pub fn selection(&self) -> NodeSelection {
		NodeSelection {
			id: self.id.clone(),
			name: self.name.clone(),
			category: self.category.clone(),
			weight: self.weight,
			definition: self.definition.clone(),
		}
	}

	fn stop(&mut self) {
		self.vx = 0.0;
		self.vy = 0.0;
	}
}

/// Mutable physical state for one graph instance.
///
/// Recreated from scratch whenever the input graph or the viewport changes.
#[derive(Clone, Debug)]
pub struct LayoutModel {
	nodes: Vec<LayoutNode>,
	edges: Vec<GraphEdge>,
	index: HashMap<String, NodeIdx>,
	pinned: Option<NodeIdx>,
	width: f64,
	height: f64,
}

impl LayoutModel {
	/// Seed positions on a jittered spiral around the viewport center.
	///
	/// Node `i` sits at angle `i * 2.4` on a circle of radius `80 + [0, 60)`.
	/// Duplicate node ids keep their first occurrence.
	pub fn seed<R: Rng + ?Sized>(data: &GraphData, width: f64, height: f64, rng: &mut R) -> Self {
		let (cx, cy) = (width / 2.0, height / 2.0);
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());

		for node in &data.nodes {
			let Entry::Vacant(slot) = index.entry(node.id.clone()) else {
				debug!("concept-graph: skipping duplicate node id {:?}", node.id);
				continue;
			};
			let i = nodes.len();
			slot.insert(NodeIdx(i));

			let angle = i as f64 * SEED_ANGLE_STEP;
			let radius = SEED_RADIUS + rng.gen_range(0.0..SEED_JITTER);
			nodes.push(LayoutNode {
				id: node.id.clone(),
				name: node.name.clone(),
				category: node.category.clone(),
				weight: node.weight.max(0.0),
				definition: node.definition.clone(),
				x: cx + radius * angle.cos(),
				y: cy + radius * angle.sin(),
				vx: 0.0,
				vy: 0.0,
			});
		}

		let model = Self {
			nodes,
			edges: data.edges.clone(),
			index,
			pinned: None,
			width,
			height,
		};

		let unresolved = model
			.edges
			.iter()
			.filter(|edge| model.resolve(edge).is_none())
			.count();
		if unresolved > 0 {
			debug!("concept-graph: {} edge(s) reference unknown nodes", unresolved);
		}

		model
	}

	/// Every node, in draw order.
	pub fn nodes(&self) -> &[LayoutNode] {
		&self.nodes
	}

	pub(super) fn nodes_mut(&mut self) -> &mut [LayoutNode] {
		&mut self.nodes
	}

	/// The node behind `idx`, if it belongs to this model.
	pub fn node(&self, idx: NodeIdx) -> Option<&LayoutNode> {
		self.nodes.get(idx.0)
	}

	/// Handle for every node, in draw order.
	pub fn indices(&self) -> impl DoubleEndedIterator<Item = NodeIdx> + use<> {
		(0..self.nodes.len()).map(NodeIdx)
	}

	/// Edges as supplied, resolvable or not.
	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	/// Handle for the node with id `id`.
	pub fn lookup(&self, id: &str) -> Option<NodeIdx> {
		self.index.get(id).copied()
	}

	/// Resolve both endpoints of an edge, or `None` if either id is unknown.
	pub fn resolve(&self, edge: &GraphEdge) -> Option<(NodeIdx, NodeIdx)> {
		Some((self.lookup(&edge.source)?, self.lookup(&edge.target)?))
	}

	/// Every edge whose endpoints both exist, with its resolved endpoints.
	pub fn resolved_edges(&self) -> impl Iterator<Item = (&GraphEdge, NodeIdx, NodeIdx)> {
		self.edges.iter().filter_map(|edge| {
			let (source, target) = self.resolve(edge)?;
			Some((edge, source, target))
		})
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the model has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Viewport width.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Viewport height.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Viewport center.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Keep a point at least `margin` away from every viewport edge.
	pub fn clamp_to_viewport(&self, x: f64, y: f64, margin: f64) -> (f64, f64) {
		(
			x.max(margin).min(self.width - margin),
			y.max(margin).min(self.height - margin),
		)
	}

	/// Hand a node over to external control. The simulator leaves its
	/// position alone and holds its velocity at zero until [`unpin`](Self::unpin).
	pub fn pin(&mut self, idx: NodeIdx) {
		if let Some(node) = self.nodes.get_mut(idx.0) {
			node.stop();
			self.pinned = Some(idx);
		}
	}

	/// Return the pinned node to the simulator, at rest.
	pub fn unpin(&mut self) {
		if let Some(idx) = self.pinned.take() {
			self.nodes[idx.0].stop();
		}
	}

	/// The node currently under external control.
	pub fn pinned(&self) -> Option<NodeIdx> {
		self.pinned
	}

	pub fn is_pinned(&self, idx: NodeIdx) -> bool {
		self.pinned == Some(idx)
	}

	/// Move a node directly, discarding its velocity.
	pub fn place(&mut self, idx: NodeIdx, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx.0) {
			node.x = x;
			node.y = y;
			node.stop();
		}
	}

	/// Total kinetic energy, treating every node as unit mass.
	pub fn kinetic_energy(&self) -> f64 {
		self.nodes
			.iter()
			.map(|n| 0.5 * (n.vx * n.vx + n.vy * n.vy))
			.sum()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::force_graph::types::GraphNode;

	pub(crate) fn node(id: &str, weight: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: format!("Concept {id}"),
			category: "concept".into(),
			weight,
			definition: Value::Null,
		}
	}

	pub(crate) fn edge(source: &str, target: &str, weight: Option<f64>) -> GraphEdge {
		GraphEdge {
			source: source.into(),
			target: target.into(),
			weight,
		}
	}

	pub(crate) fn seeded(data: &GraphData, width: f64, height: f64) -> LayoutModel {
		LayoutModel::seed(data, width, height, &mut StdRng::seed_from_u64(7))
	}

	#[test]
	fn seeds_on_jittered_circle_at_rest() {
		let data = GraphData {
			nodes: (0..12).map(|i| node(&i.to_string(), 1.0)).collect(),
			edges: vec![],
		};
		let model = seeded(&data, 800.0, 600.0);
		let (cx, cy) = model.center();

		assert_eq!(model.len(), 12);
		for (i, n) in model.nodes().iter().enumerate() {
			let (dx, dy) = (n.x - cx, n.y - cy);
			let r = (dx * dx + dy * dy).sqrt();
			assert!((80.0..140.0).contains(&r), "node {i} at radius {r}");

			let expected = i as f64 * SEED_ANGLE_STEP;
			assert!((dx - r * expected.cos()).abs() < 1e-9);
			assert!((dy - r * expected.sin()).abs() < 1e-9);
			assert_eq!((n.vx, n.vy), (0.0, 0.0));
		}
	}

	#[test]
	fn duplicate_ids_keep_first_node() {
		let mut dup = node("a", 9.0);
		dup.name = "Other".into();
		let data = GraphData {
			nodes: vec![node("a", 1.0), node("b", 1.0), dup],
			edges: vec![],
		};
		let model = seeded(&data, 400.0, 400.0);

		assert_eq!(model.len(), 2);
		let a = model.lookup("a").unwrap();
		assert_eq!(model.node(a).unwrap().name, "Concept a");
	}

	#[test]
	fn unknown_endpoints_do_not_resolve() {
		let data = GraphData {
			nodes: vec![node("a", 1.0), node("b", 1.0)],
			edges: vec![edge("a", "b", None), edge("a", "ghost", None)],
		};
		let model = seeded(&data, 400.0, 400.0);

		assert_eq!(model.edges().len(), 2);
		assert_eq!(model.resolved_edges().count(), 1);
		assert!(model.resolve(&model.edges()[1]).is_none());
	}

	#[test]
	fn pin_and_place_zero_velocity() {
		let data = GraphData {
			nodes: vec![node("a", 1.0)],
			edges: vec![],
		};
		let mut model = seeded(&data, 400.0, 400.0);
		let a = model.lookup("a").unwrap();
		model.nodes_mut()[0].vx = 5.0;

		model.pin(a);
		assert!(model.is_pinned(a));
		assert_eq!(model.node(a).unwrap().vx, 0.0);

		model.nodes_mut()[0].vy = -3.0;
		model.place(a, 10.0, 20.0);
		let n = model.node(a).unwrap();
		assert_eq!((n.x, n.y, n.vx, n.vy), (10.0, 20.0, 0.0, 0.0));

		model.unpin();
		assert_eq!(model.pinned(), None);
	}
}

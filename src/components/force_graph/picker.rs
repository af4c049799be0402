//! Point-to-node hit testing.

use super::layout::{LayoutModel, NodeIdx};
use super::scale::glow_radius;

/// The topmost node whose glow circle strictly contains `(x, y)`.
///
/// Nodes are drawn in model order, so the scan runs back to front and the
/// last-drawn match wins where nodes overlap.
pub fn node_at(model: &LayoutModel, x: f64, y: f64) -> Option<NodeIdx> {
	model.indices().rev().find(|&idx| {
		model.node(idx).is_some_and(|node| {
			let (dx, dy) = (node.x - x, node.y - y);
			let r = glow_radius(node.weight);
			dx * dx + dy * dy < r * r
		})
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::layout::tests::{node, seeded};
	use crate::components::force_graph::types::GraphData;

	fn model_with(points: &[(&str, f64, f64, f64)]) -> LayoutModel {
		let data = GraphData {
			nodes: points.iter().map(|&(id, weight, _, _)| node(id, weight)).collect(),
			edges: vec![],
		};
		let mut model = seeded(&data, 800.0, 600.0);
		for &(id, _, x, y) in points {
			let idx = model.lookup(id).unwrap();
			model.place(idx, x, y);
		}
		model
	}

	#[test]
	fn hits_inside_glow_radius() {
		// weight 3 -> body 10, glow 14
		let model = model_with(&[("a", 3.0, 100.0, 100.0)]);
		let a = model.lookup("a");
		assert_eq!(node_at(&model, 100.0, 100.0), a);
		assert_eq!(node_at(&model, 113.9, 100.0), a);
		assert_eq!(node_at(&model, 100.0, 89.0), a);
	}

	#[test]
	fn misses_outside_every_glow() {
		let model = model_with(&[("a", 3.0, 100.0, 100.0), ("b", 0.0, 300.0, 300.0)]);
		assert_eq!(node_at(&model, 114.0, 100.0), None);
		assert_eq!(node_at(&model, 200.0, 200.0), None);
		assert_eq!(node_at(&model, 310.0, 300.0), None);
	}

	#[test]
	fn last_drawn_wins_on_overlap() {
		let model = model_with(&[("under", 3.0, 100.0, 100.0), ("over", 3.0, 108.0, 100.0)]);
		assert_eq!(node_at(&model, 104.0, 100.0), model.lookup("over"));
		assert_eq!(node_at(&model, 90.0, 100.0), model.lookup("under"));
	}

	#[test]
	fn empty_model_never_hits() {
		let model = model_with(&[]);
		assert_eq!(node_at(&model, 400.0, 300.0), None);
	}
}

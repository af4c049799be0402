//! Force simulation over a [`LayoutModel`].
//!
//! Each step accumulates pairwise inverse-square repulsion, a pull toward the
//! viewport center and Hooke springs along edges into node velocities, then
//! damps, integrates (semi-implicit Euler, one step) and clamps positions into
//! the viewport. A pinned node keeps its position and stays at rest.
//!
//! The simulation freezes after `max_steps` steps, or earlier once kinetic
//! energy drops below `settle_energy` when that threshold is set.

use log::debug;

use super::layout::LayoutModel;

/// Tunable constants for the force simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
	/// Inverse-square repulsion constant between every pair of nodes.
	pub repulsion: f64,
	/// Spring stiffness along edges.
	pub spring: f64,
	/// Edge length at which a spring exerts no force.
	pub rest_length: f64,
	/// Pull toward the viewport center, proportional to the offset from it.
	pub center_gravity: f64,
	/// Velocity multiplier applied every step (must be below 1 to settle).
	pub damping: f64,
	/// Minimum distance kept between any node and the viewport edges.
	pub margin: f64,
	/// Number of steps after which the layout is frozen.
	pub max_steps: u32,
	/// Freeze early once total kinetic energy falls below this value.
	pub settle_energy: Option<f64>,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self {
			repulsion: 2000.0,
			spring: 0.02,
			rest_length: 80.0,
			center_gravity: 0.01,
			damping: 0.85,
			margin: 20.0,
			max_steps: 200,
			settle_energy: None,
		}
	}
}

/// Why the simulation stopped stepping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settled {
	/// `max_steps` steps have run.
	StepLimit,
	/// Kinetic energy dropped below `settle_energy`.
	LowEnergy,
}

/// Repulsion felt by a node at `a` from a node at `b`. The node at `b`
/// receives the exact negation.
pub fn repulsion(a: (f64, f64), b: (f64, f64), strength: f64) -> (f64, f64) {
	let (dx, dy) = (a.0 - b.0, a.1 - b.1);
	let dist = (dx * dx + dy * dy).sqrt().max(1.0);
	let force = strength / (dist * dist);
	(dx / dist * force, dy / dist * force)
}

/// Spring force felt by the node at `a` from an edge to `b`: toward `b` when
/// the edge is longer than `rest_length`, away from it when shorter.
/// Coincident endpoints have no direction and feel nothing.
pub fn spring(a: (f64, f64), b: (f64, f64), stiffness: f64, rest_length: f64, weight: f64) -> (f64, f64) {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist == 0.0 {
		return (0.0, 0.0);
	}
	let force = stiffness * (dist - rest_length) * weight;
	(dx / dist * force, dy / dist * force)
}

/// Advances a [`LayoutModel`] one step per call until it settles.
#[derive(Clone, Debug)]
pub struct ForceSimulator {
	params: SimulationParameters,
	steps: u32,
	settled: Option<Settled>,
	springs: Vec<(usize, usize, f64)>,
}

impl ForceSimulator {
	/// A simulator that has not stepped yet.
	pub fn new(params: SimulationParameters) -> Self {
		Self {
			params,
			steps: 0,
			settled: None,
			springs: Vec::new(),
		}
	}

	/// Steps taken so far.
	pub fn steps(&self) -> u32 {
		self.steps
	}

	/// Why the simulation froze, once it has.
	pub fn settled(&self) -> Option<Settled> {
		self.settled
	}

	/// Whether further steps are no-ops.
	pub fn is_frozen(&self) -> bool {
		self.settled.is_some()
	}

	/// Advance the layout by one step. Returns `false` without touching the
	/// model once the simulation has settled.
	pub fn step(&mut self, model: &mut LayoutModel) -> bool {
		if self.settled.is_some() {
			return false;
		}
		if self.steps >= self.params.max_steps {
			self.settle(Settled::StepLimit);
			return false;
		}

		self.accumulate(model);
		self.integrate(model);
		self.steps += 1;

		if self.steps >= self.params.max_steps {
			self.settle(Settled::StepLimit);
		} else if let Some(threshold) = self.params.settle_energy {
			if model.kinetic_energy() < threshold {
				self.settle(Settled::LowEnergy);
			}
		}
		true
	}

	fn settle(&mut self, reason: Settled) {
		debug!(
			"concept-graph: simulation frozen after {} steps ({:?})",
			self.steps, reason
		);
		self.settled = Some(reason);
	}

	fn accumulate(&mut self, model: &mut LayoutModel) {
		let p = &self.params;
		let (cx, cy) = model.center();

		self.springs.clear();
		self.springs.extend(
			model
				.resolved_edges()
				.map(|(edge, a, b)| (a.index(), b.index(), edge.spring_weight())),
		);

		let nodes = model.nodes_mut();

		for i in 0..nodes.len() {
			for j in (i + 1)..nodes.len() {
				let (fx, fy) = repulsion((nodes[i].x, nodes[i].y), (nodes[j].x, nodes[j].y), p.repulsion);
				nodes[i].vx += fx;
				nodes[i].vy += fy;
				nodes[j].vx -= fx;
				nodes[j].vy -= fy;
			}
		}

		for node in nodes.iter_mut() {
			node.vx += p.center_gravity * (cx - node.x);
			node.vy += p.center_gravity * (cy - node.y);
		}

		for &(a, b, weight) in &self.springs {
			let (fx, fy) = spring(
				(nodes[a].x, nodes[a].y),
				(nodes[b].x, nodes[b].y),
				p.spring,
				p.rest_length,
				weight,
			);
			nodes[a].vx += fx;
			nodes[a].vy += fy;
			nodes[b].vx -= fx;
			nodes[b].vy -= fy;
		}
	}

	fn integrate(&self, model: &mut LayoutModel) {
		let (damping, margin) = (self.params.damping, self.params.margin);
		let pinned = model.pinned().map(|idx| idx.index());
		let (width, height) = (model.width(), model.height());

		for (i, node) in model.nodes_mut().iter_mut().enumerate() {
			if pinned == Some(i) {
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			node.vx *= damping;
			node.vy *= damping;
			node.x = (node.x + node.vx).max(margin).min(width - margin);
			node.y = (node.y + node.vy).max(margin).min(height - margin);
		}
	}
}

impl Default for ForceSimulator {
	fn default() -> Self {
		Self::new(SimulationParameters::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::layout::tests::{edge, node, seeded};
	use crate::components::force_graph::types::GraphData;

	fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: nodes.iter().map(|id| node(id, 1.0)).collect(),
			edges: edges.iter().map(|(s, t)| edge(s, t, None)).collect(),
		}
	}

	fn unbounded_steps() -> SimulationParameters {
		SimulationParameters {
			max_steps: 10_000,
			..SimulationParameters::default()
		}
	}

	#[test]
	fn repulsion_is_equal_and_opposite() {
		let a = (120.0, 80.0);
		let b = (95.5, 140.25);
		let on_a = repulsion(a, b, 2000.0);
		let on_b = repulsion(b, a, 2000.0);
		assert_eq!(on_a, (-on_b.0, -on_b.1));
	}

	#[test]
	fn repulsion_deltas_mirror_between_two_nodes() {
		let mut model = seeded(&graph(&["a", "b"], &[]), 800.0, 600.0);
		let params = SimulationParameters {
			center_gravity: 0.0,
			..SimulationParameters::default()
		};
		let mut sim = ForceSimulator::new(params);
		sim.accumulate(&mut model);

		let (a, b) = (&model.nodes()[0], &model.nodes()[1]);
		assert_eq!(a.vx, -b.vx);
		assert_eq!(a.vy, -b.vy);
		assert!(a.vx != 0.0 || a.vy != 0.0);
	}

	#[test]
	fn coincident_nodes_stay_finite() {
		let mut model = seeded(&graph(&["a", "b"], &[("a", "b")]), 400.0, 400.0);
		let (a, b) = (model.lookup("a").unwrap(), model.lookup("b").unwrap());
		model.place(a, 200.0, 200.0);
		model.place(b, 200.0, 200.0);

		let mut sim = ForceSimulator::default();
		for _ in 0..10 {
			sim.step(&mut model);
		}
		for n in model.nodes() {
			assert!(n.x.is_finite() && n.y.is_finite());
			assert!(n.vx.is_finite() && n.vy.is_finite());
		}
	}

	#[test]
	fn spring_pulls_when_stretched_and_pushes_when_compressed() {
		let (fx, _) = spring((0.0, 0.0), (200.0, 0.0), 0.02, 80.0, 1.0);
		assert!(fx > 0.0);
		assert!((fx - 0.02 * 120.0).abs() < 1e-12);

		let (fx, _) = spring((0.0, 0.0), (40.0, 0.0), 0.02, 80.0, 2.0);
		assert!(fx < 0.0);
		assert!((fx + 0.02 * 40.0 * 2.0).abs() < 1e-12);
	}

	#[test]
	fn spring_uses_true_distance_below_one_unit() {
		let (fx, fy) = spring((0.0, 0.0), (0.5, 0.0), 0.02, 80.0, 1.0);
		assert!((fx - 0.02 * (0.5 - 80.0)).abs() < 1e-12);
		assert_eq!(fy, 0.0);

		assert_eq!(spring((3.0, 4.0), (3.0, 4.0), 0.02, 80.0, 1.0), (0.0, 0.0));
	}

	#[test]
	fn lone_node_settles_at_center() {
		let mut model = seeded(&graph(&["a"], &[]), 800.0, 600.0);
		let mut sim = ForceSimulator::new(unbounded_steps());
		for _ in 0..2000 {
			sim.step(&mut model);
		}
		let n = &model.nodes()[0];
		assert!((n.x - 400.0).abs() < 0.01, "x = {}", n.x);
		assert!((n.y - 300.0).abs() < 0.01, "y = {}", n.y);
	}

	#[test]
	fn positions_stay_inside_margin_every_tick() {
		let ids: Vec<String> = (0..40).map(|i| i.to_string()).collect();
		let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
		let mut model = seeded(&graph(&id_refs, &[("0", "1"), ("2", "3")]), 300.0, 200.0);
		let mut sim = ForceSimulator::default();

		while sim.step(&mut model) {
			for n in model.nodes() {
				assert!((20.0..=280.0).contains(&n.x), "x = {}", n.x);
				assert!((20.0..=180.0).contains(&n.y), "y = {}", n.y);
			}
		}
		assert_eq!(sim.steps(), 200);
	}

	#[test]
	fn freezes_after_step_limit() {
		let mut model = seeded(&graph(&["a", "b", "c"], &[("a", "b")]), 800.0, 600.0);
		let mut sim = ForceSimulator::default();
		for _ in 0..200 {
			assert!(sim.step(&mut model));
		}
		assert_eq!(sim.settled(), Some(Settled::StepLimit));

		let before = model.nodes().to_vec();
		assert!(!sim.step(&mut model));
		assert_eq!(model.nodes(), &before[..]);
	}

	#[test]
	fn low_energy_freezes_early_when_enabled() {
		let mut model = seeded(&graph(&["a"], &[]), 800.0, 600.0);
		let mut sim = ForceSimulator::new(SimulationParameters {
			settle_energy: Some(1e-3),
			..unbounded_steps()
		});
		while sim.step(&mut model) {}

		assert_eq!(sim.settled(), Some(Settled::LowEnergy));
		assert!(sim.steps() < 10_000);
		assert!(model.kinetic_energy() < 1e-3);
	}

	#[test]
	fn unknown_edge_endpoints_change_nothing() {
		let clean = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
		let mut dirty = clean.clone();
		dirty.edges.insert(1, edge("a", "missing", Some(4.0)));

		let mut clean_model = seeded(&clean, 800.0, 600.0);
		let mut dirty_model = seeded(&dirty, 800.0, 600.0);
		let (mut clean_sim, mut dirty_sim) = (ForceSimulator::default(), ForceSimulator::default());

		for _ in 0..50 {
			clean_sim.step(&mut clean_model);
			dirty_sim.step(&mut dirty_model);
			assert_eq!(clean_model.nodes(), dirty_model.nodes());
		}
	}

	#[test]
	fn pinned_node_is_left_in_place_at_rest() {
		let mut model = seeded(&graph(&["a", "b"], &[("a", "b")]), 800.0, 600.0);
		let a = model.lookup("a").unwrap();
		model.place(a, 300.0, 300.0);
		model.pin(a);

		let mut sim = ForceSimulator::default();
		sim.step(&mut model);

		let n = model.node(a).unwrap();
		assert_eq!((n.x, n.y, n.vx, n.vy), (300.0, 300.0, 0.0, 0.0));
		assert_ne!(model.nodes()[1].vx, 0.0);
	}

	#[test]
	fn empty_graph_is_a_no_op() {
		let mut model = seeded(&GraphData::default(), 800.0, 600.0);
		let mut sim = ForceSimulator::default();
		assert!(sim.step(&mut model));
		assert!(model.is_empty());
	}
}

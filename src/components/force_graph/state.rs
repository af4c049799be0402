//! Per-instance graph state driven by the frame loop.
//!
//! Bundles the layout, the simulator, the interaction controller and the
//! theme for one graph instance. A new graph or viewport means a new
//! `ForceGraphState`: nothing carries over, including the step counter.

use rand::Rng;

use super::interaction::{InteractionController, InteractionEvent};
use super::layout::LayoutModel;
use super::render;
use super::simulation::{ForceSimulator, SimulationParameters};
use super::surface::Surface;
use super::theme::Theme;
use super::types::GraphData;

/// Core graph state combining the physics simulation with interaction tracking.
pub struct ForceGraphState {
	/// Node positions and velocities.
	pub model: LayoutModel,
	/// Steps `model` until it settles.
	pub simulator: ForceSimulator,
	/// Pointer state.
	pub interaction: InteractionController,
	/// Colors and fonts for rendering.
	pub theme: Theme,
}

impl ForceGraphState {
	/// Seed a new instance with fresh randomness.
	pub fn new(data: &GraphData, width: f64, height: f64, params: SimulationParameters, theme: Theme) -> Self {
		Self::with_rng(data, width, height, params, theme, &mut rand::thread_rng())
	}

	/// Like [`new`](Self::new), drawing the seeding jitter from `rng`.
	pub fn with_rng<R: Rng + ?Sized>(
		data: &GraphData,
		width: f64,
		height: f64,
		params: SimulationParameters,
		theme: Theme,
		rng: &mut R,
	) -> Self {
		Self {
			model: LayoutModel::seed(data, width, height, rng),
			interaction: InteractionController::new(params.margin),
			simulator: ForceSimulator::new(params),
			theme,
		}
	}

	/// One animation frame: simulate (until settled), then draw.
	pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		self.tick();
		self.render(surface);
	}

	/// Advance the simulation one step. Returns `false` once it has settled.
	pub fn tick(&mut self) -> bool {
		self.simulator.step(&mut self.model)
	}

	/// Draw the current state without stepping.
	pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
		render::render(&self.model, self.interaction.hovered(), &self.theme, surface);
	}

	/// Pointer pressed at `(x, y)`.
	pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<InteractionEvent> {
		self.interaction.pointer_down(&mut self.model, x, y)
	}

	/// Pointer moved to `(x, y)`.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<InteractionEvent> {
		self.interaction.pointer_move(&mut self.model, x, y)
	}

	/// Pointer released.
	pub fn pointer_up(&mut self) -> Option<InteractionEvent> {
		self.interaction.pointer_up(&mut self.model)
	}

	/// Pointer left the surface.
	pub fn pointer_leave(&mut self) -> Option<InteractionEvent> {
		self.interaction.pointer_leave(&mut self.model)
	}
}

//! Pointer interaction: hover, drag and click-to-select.
//!
//! The controller is an explicit state machine. Dragging pins the grabbed
//! node in the [`LayoutModel`] so the simulator leaves it alone; hovering only
//! changes what the renderer highlights. Neither state stops the simulation.

use super::layout::{LayoutModel, NodeIdx};
use super::picker::node_at;
use super::types::NodeSelection;

/// Pointer travel below which a press-release pair counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

/// An in-progress node drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
	/// The held node.
	pub node: NodeIdx,
	/// Pointer position minus node position at grab time.
	pub grab_offset: (f64, f64),
	/// Where the pointer went down.
	pub press: (f64, f64),
	/// Whether the pointer has travelled past [`CLICK_SLOP`].
	pub moved: bool,
}

/// Current interaction mode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Interaction {
	/// Pointer over empty space, or off the surface.
	#[default]
	Idle,
	/// Pointer over a node, which gets a tooltip.
	Hovering(NodeIdx),
	/// A node is held by the pointer.
	Dragging(Drag),
}

impl Interaction {
	/// CSS cursor shown on the surface in this mode.
	pub fn cursor(self) -> &'static str {
		match self {
			Interaction::Idle => "grab",
			Interaction::Hovering(_) => "pointer",
			Interaction::Dragging(_) => "grabbing",
		}
	}
}

/// Notifications produced by pointer input.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
	/// The node under the pointer changed.
	HoverChanged(Option<NodeIdx>),
	/// A node was clicked.
	Selected(NodeSelection),
}

/// Turns pointer input into layout overrides and events.
#[derive(Clone, Debug)]
pub struct InteractionController {
	mode: Interaction,
	margin: f64,
}

impl InteractionController {
	/// `margin` keeps dragged nodes as far from the viewport edges as the
	/// simulator keeps free ones.
	pub fn new(margin: f64) -> Self {
		Self {
			mode: Interaction::Idle,
			margin,
		}
	}

	/// Current mode.
	pub fn mode(&self) -> Interaction {
		self.mode
	}

	/// Node to show a tooltip for.
	pub fn hovered(&self) -> Option<NodeIdx> {
		match self.mode {
			Interaction::Hovering(idx) => Some(idx),
			_ => None,
		}
	}

	/// Node being dragged.
	pub fn dragged(&self) -> Option<NodeIdx> {
		match self.mode {
			Interaction::Dragging(drag) => Some(drag.node),
			_ => None,
		}
	}

	/// Grab the node under the pointer, if any.
	pub fn pointer_down(&mut self, model: &mut LayoutModel, x: f64, y: f64) -> Option<InteractionEvent> {
		if matches!(self.mode, Interaction::Dragging(_)) {
			return None;
		}
		let idx = node_at(model, x, y)?;
		let node = model.node(idx)?;
		let grab_offset = (x - node.x, y - node.y);
		let was_hovering = self.hovered().is_some();

		model.pin(idx);
		self.mode = Interaction::Dragging(Drag {
			node: idx,
			grab_offset,
			press: (x, y),
			moved: false,
		});

		was_hovering.then_some(InteractionEvent::HoverChanged(None))
	}

	/// Move the dragged node, or update the hover target.
	pub fn pointer_move(&mut self, model: &mut LayoutModel, x: f64, y: f64) -> Option<InteractionEvent> {
		match self.mode {
			Interaction::Dragging(mut drag) => {
				let (tx, ty) =
					model.clamp_to_viewport(x - drag.grab_offset.0, y - drag.grab_offset.1, self.margin);
				model.place(drag.node, tx, ty);

				let (dx, dy) = (x - drag.press.0, y - drag.press.1);
				if dx * dx + dy * dy >= CLICK_SLOP * CLICK_SLOP {
					drag.moved = true;
				}
				self.mode = Interaction::Dragging(drag);
				None
			}
			Interaction::Idle | Interaction::Hovering(_) => {
				let hit = node_at(model, x, y);
				if hit == self.hovered() {
					return None;
				}
				self.mode = hit.map_or(Interaction::Idle, Interaction::Hovering);
				Some(InteractionEvent::HoverChanged(hit))
			}
		}
	}

	/// Release a drag. A release without travel selects the grabbed node.
	pub fn pointer_up(&mut self, model: &mut LayoutModel) -> Option<InteractionEvent> {
		let Interaction::Dragging(drag) = self.mode else {
			return None;
		};
		model.unpin();
		self.mode = Interaction::Idle;

		if drag.moved {
			return None;
		}
		model
			.node(drag.node)
			.map(|node| InteractionEvent::Selected(node.selection()))
	}

	/// Pointer left the surface: drop any drag and clear the hover.
	pub fn pointer_leave(&mut self, model: &mut LayoutModel) -> Option<InteractionEvent> {
		match std::mem::take(&mut self.mode) {
			Interaction::Dragging(_) => {
				model.unpin();
				None
			}
			Interaction::Hovering(_) => Some(InteractionEvent::HoverChanged(None)),
			Interaction::Idle => None,
		}
	}
}

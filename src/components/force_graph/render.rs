//! Frame rendering for the force graph.
//!
//! Draws back to front, reading the layout without mutating it:
//! 1. Background clear
//! 2. Edges as straight lines, opacity and width scaled by weight
//! 3. Per node: translucent glow, solid body, truncated label below
//! 4. Tooltip for the hovered node, if any

use super::layout::{LayoutModel, LayoutNode, NodeIdx};
use super::scale::{edge_alpha, edge_width, glow_radius, node_radius, truncate_label};
use super::surface::Surface;
use super::theme::Theme;

/// Category line shown in the tooltip for nodes without a category.
const NO_CATEGORY: &str = "uncategorized";

/// Renders the complete graph onto `surface`.
pub fn render<S: Surface + ?Sized>(
	model: &LayoutModel,
	hovered: Option<NodeIdx>,
	theme: &Theme,
	surface: &mut S,
) {
	surface.clear(model.width(), model.height(), theme.background);
	draw_edges(model, theme, surface);
	draw_nodes(model, theme, surface);

	if let Some(node) = hovered.and_then(|idx| model.node(idx)) {
		draw_tooltip(model, node, theme, surface);
	}
}

fn draw_edges<S: Surface + ?Sized>(model: &LayoutModel, theme: &Theme, surface: &mut S) {
	for (edge, a, b) in model.resolved_edges() {
		let (Some(a), Some(b)) = (model.node(a), model.node(b)) else {
			continue;
		};
		let weight = edge.stroke_weight();
		surface.line(
			(a.x, a.y),
			(b.x, b.y),
			theme.edge.with_alpha(edge_alpha(weight)),
			edge_width(weight),
		);
	}
}

fn draw_nodes<S: Surface + ?Sized>(model: &LayoutModel, theme: &Theme, surface: &mut S) {
	for node in model.nodes() {
		let color = theme.categories.color_for(&node.category);
		let radius = node_radius(node.weight);

		surface.circle(
			(node.x, node.y),
			glow_radius(node.weight),
			color.with_alpha(theme.glow_alpha),
		);
		surface.circle((node.x, node.y), radius, color);
		surface.text(
			&truncate_label(&node.name),
			node.x,
			node.y + radius + theme.label.gap,
			&theme.label.font,
			theme.label.color,
		);
	}
}

/// Panel above the node (below it when there is no room), kept inside the
/// viewport horizontally, with the name and category centered.
fn draw_tooltip<S: Surface + ?Sized>(
	model: &LayoutModel,
	node: &LayoutNode,
	theme: &Theme,
	surface: &mut S,
) {
	let style = &theme.tooltip;
	let category = if node.category.is_empty() {
		NO_CATEGORY
	} else {
		node.category.as_str()
	};

	let text_width = surface
		.measure(&node.name, &style.title_font)
		.max(surface.measure(category, &style.subtitle_font));
	let (width, height) = (
		text_width + 2.0 * style.padding,
		2.0 * style.line_height + 2.0 * style.padding,
	);

	let reach = glow_radius(node.weight) + style.offset;
	let x = (node.x - width / 2.0).clamp(0.0, (model.width() - width).max(0.0));
	let above = node.y - reach - height;
	let y = if above >= 0.0 { above } else { node.y + reach };

	surface.panel((x, y, width, height), style.background, style.border, style.border_width);

	let cx = x + width / 2.0;
	surface.text(&node.name, cx, y + style.padding, &style.title_font, style.title);
	surface.text(
		category,
		cx,
		y + style.padding + style.line_height,
		&style.subtitle_font,
		style.subtitle,
	);
}

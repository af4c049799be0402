//! Size and stroke scaling for graph visuals.
//!
//! Centralizes how node weight maps to radius, how edge weight maps to stroke
//! intensity, and how labels are shortened, so that the renderer and the
//! spatial picker agree on every node's visual bounds.

use std::borrow::Cow;

/// Smallest body radius, for nodes of weight zero.
pub const MIN_NODE_RADIUS: f64 = 5.0;
/// Largest body radius, however heavy the node.
pub const MAX_NODE_RADIUS: f64 = 20.0;
/// Extra radius of the translucent glow around the body. Also the hit slop.
pub const GLOW_PADDING: f64 = 4.0;
/// Names longer than this many characters are truncated.
pub const LABEL_MAX_CHARS: usize = 14;
/// Characters kept from a truncated name, before the ellipsis.
pub const LABEL_KEEP_CHARS: usize = 12;

const MAX_EDGE_ALPHA: f64 = 0.4;
const MAX_EDGE_WIDTH: f64 = 3.0;

/// Body radius for a node of the given weight: `4 + 2w`, kept within [5, 20].
pub fn node_radius(weight: f64) -> f64 {
	(4.0 + weight * 2.0).clamp(MIN_NODE_RADIUS, MAX_NODE_RADIUS)
}

/// Radius of the outer glow, which is also the clickable radius.
pub fn glow_radius(weight: f64) -> f64 {
	node_radius(weight) + GLOW_PADDING
}

/// Stroke opacity of an edge: `0.1w`, capped at 0.4.
pub fn edge_alpha(weight: f64) -> f64 {
	(0.1 * weight).min(MAX_EDGE_ALPHA)
}

/// Stroke width of an edge: `0.5 + 0.5w`, capped at 3.
pub fn edge_width(weight: f64) -> f64 {
	(0.5 + weight * 0.5).min(MAX_EDGE_WIDTH)
}

/// Shorten a node name for display under the node.
pub fn truncate_label(name: &str) -> Cow<'_, str> {
	if name.chars().count() <= LABEL_MAX_CHARS {
		return Cow::Borrowed(name);
	}
	let kept: String = name.chars().take(LABEL_KEEP_CHARS).collect();
	Cow::Owned(format!("{kept}…"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_radius_is_bounded() {
		assert_eq!(node_radius(0.0), 5.0);
		assert_eq!(node_radius(3.0), 10.0);
		assert_eq!(node_radius(100.0), 20.0);
		assert_eq!(glow_radius(3.0), 14.0);
	}

	#[test]
	fn edge_strokes_are_capped() {
		assert!((edge_alpha(1.0) - 0.1).abs() < 1e-12);
		assert_eq!(edge_alpha(10.0), 0.4);
		assert_eq!(edge_alpha(0.0), 0.0);
		assert_eq!(edge_width(1.0), 1.0);
		assert_eq!(edge_width(9.0), 3.0);
	}

	#[test]
	fn labels_truncate_past_fourteen_chars() {
		assert_eq!(truncate_label("Borrow checker"), "Borrow checker");
		assert_eq!(truncate_label("Interior mutability"), "Interior mut…");
		assert_eq!(truncate_label("Ünïcödé-Ñämes-Wörk"), "Ünïcödé-Ñäme…");
	}
}

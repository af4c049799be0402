//! Visual theming for the force graph.
//!
//! Provides the color type, the category palette and the style of every
//! element the renderer draws.

use std::collections::HashMap;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Hex when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Maps category tags to node colors.
#[derive(Clone, Debug)]
pub struct CategoryPalette {
	colors: HashMap<String, Color>,
	/// Used for categories missing from the table.
	pub fallback: Color,
}

impl CategoryPalette {
	/// Empty table; every category gets `fallback`.
	pub fn new(fallback: Color) -> Self {
		Self {
			colors: HashMap::new(),
			fallback,
		}
	}

	/// Builder-style insert; replaces any color already set for `category`.
	pub fn with(mut self, category: impl Into<String>, color: Color) -> Self {
		self.colors.insert(category.into(), color);
		self
	}

	/// Color for `category`, or the fallback.
	pub fn color_for(&self, category: &str) -> Color {
		self.colors.get(category).copied().unwrap_or(self.fallback)
	}
}

/// Label drawn under each node.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Text color.
	pub color: Color,
	/// CSS font shorthand.
	pub font: String,
	/// Gap between the node body and the top of the label.
	pub gap: f64,
}

/// Hover tooltip panel.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Panel fill.
	pub background: Color,
	/// Panel outline.
	pub border: Color,
	/// Outline width, 0 for none.
	pub border_width: f64,
	/// Color of the node name line.
	pub title: Color,
	/// Color of the category line.
	pub subtitle: Color,
	/// Font of the name line.
	pub title_font: String,
	/// Font of the category line.
	pub subtitle_font: String,
	/// Height of one text line.
	pub line_height: f64,
	/// Space between the panel edge and the text.
	pub padding: f64,
	/// Gap between the hovered node's glow and the panel.
	pub offset: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Fill behind the whole graph.
	pub background: Color,
	/// Edge stroke color; its alpha is replaced per edge.
	pub edge: Color,
	/// Opacity of the glow ring around each node body.
	pub glow_alpha: f64,
	/// Node labels.
	pub label: LabelStyle,
	/// Hover tooltip panel.
	pub tooltip: TooltipStyle,
	/// Node body colors by category.
	pub categories: CategoryPalette,
}

impl Theme {
	/// Dark slate theme (default).
	pub fn default_theme() -> Self {
		Self {
			background: Color::rgb(15, 23, 42),
			edge: Color::rgb(148, 163, 184),
			glow_alpha: 0.25,
			label: LabelStyle {
				color: Color::rgba(226, 232, 240, 0.85),
				font: "10px sans-serif".into(),
				gap: 4.0,
			},
			tooltip: TooltipStyle {
				background: Color::rgba(30, 41, 59, 0.95),
				border: Color::rgb(71, 85, 105),
				border_width: 1.0,
				title: Color::rgb(241, 245, 249),
				subtitle: Color::rgb(148, 163, 184),
				title_font: "bold 12px sans-serif".into(),
				subtitle_font: "11px sans-serif".into(),
				line_height: 16.0,
				padding: 8.0,
				offset: 8.0,
			},
			categories: CategoryPalette::new(Color::rgb(100, 116, 139))
				.with("concept", Color::rgb(96, 165, 250))
				.with("principle", Color::rgb(167, 139, 250))
				.with("technique", Color::rgb(52, 211, 153))
				.with("pattern", Color::rgb(251, 191, 36))
				.with("tool", Color::rgb(248, 113, 113))
				.with("practice", Color::rgb(45, 212, 191)),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_categories_use_fallback() {
		let theme = Theme::default();
		assert_eq!(theme.categories.color_for("concept"), Color::rgb(96, 165, 250));
		assert_eq!(theme.categories.color_for("astrology"), theme.categories.fallback);
		assert_eq!(theme.categories.color_for(""), theme.categories.fallback);
	}

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(255, 16, 0).to_css(), "#ff1000");
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}
}

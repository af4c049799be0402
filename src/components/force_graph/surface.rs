//! The drawing primitives the renderer needs, and their canvas implementation.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::theme::Color;

/// Something a frame can be drawn onto.
pub trait Surface {
	/// Fill the whole `width` x `height` area with `color`.
	fn clear(&mut self, width: f64, height: f64, color: Color);
	/// Straight stroked line.
	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64);
	/// Filled circle.
	fn circle(&mut self, center: (f64, f64), radius: f64, color: Color);
	/// Filled rectangle with a border, given as `(x, y, width, height)`.
	fn panel(&mut self, rect: (f64, f64, f64, f64), fill: Color, border: Color, border_width: f64);
	/// Text horizontally centered on `x`, with its top edge at `y`.
	fn text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color);
	/// Rendered width of `text` in `font`.
	fn measure(&mut self, text: &str, font: &str) -> f64;
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.fill_rect(0.0, 0.0, width, height);
	}

	fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn circle(&mut self, center: (f64, f64), radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(center.0, center.1, radius, 0.0, 2.0 * PI);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn panel(&mut self, rect: (f64, f64, f64, f64), fill: Color, border: Color, border_width: f64) {
		let (x, y, w, h) = rect;
		self.set_fill_style_str(&fill.to_css());
		self.fill_rect(x, y, w, h);
		if border_width > 0.0 {
			self.set_stroke_style_str(&border.to_css());
			self.set_line_width(border_width);
			self.stroke_rect(x, y, w, h);
		}
	}

	fn text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) {
		self.set_font(font);
		self.set_text_align("center");
		self.set_text_baseline("top");
		self.set_fill_style_str(&color.to_css());
		let _ = self.fill_text(text, x, y);
	}

	fn measure(&mut self, text: &str, font: &str) -> f64 {
		self.set_font(font);
		self.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
	}
}

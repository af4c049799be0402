//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse handlers
//! for hovering, dragging and clicking nodes. A frame loop runs via
//! `requestAnimationFrame`, stepping the simulation and redrawing each frame.
//! New graph data or a new viewport size rebuilds the state from scratch and
//! restarts the loop; unmounting withdraws the pending frame.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::interaction::{Interaction, InteractionEvent};
use super::simulation::SimulationParameters;
use super::state::ForceGraphState;
use super::theme::Theme;
use super::types::{GraphData, NodeSelection};

/// Self-rescheduling `requestAnimationFrame` callback that can be withdrawn.
#[derive(Default)]
struct FrameLoop {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
	pending: Cell<Option<i32>>,
}

impl FrameLoop {
	/// Replace the running loop with `frame`. The loop ends for good once
	/// `frame` returns `false`.
	fn start(self: &Rc<Self>, mut frame: impl FnMut() -> bool + 'static) {
		self.stop();
		let this: Weak<Self> = Rc::downgrade(self);
		*self.callback.borrow_mut() = Some(Closure::new(move || {
			let Some(this) = this.upgrade() else {
				return;
			};
			this.pending.set(None);
			if frame() {
				this.schedule();
			}
		}));
		self.schedule();
	}

	fn schedule(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return;
		};
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => self.pending.set(Some(handle)),
			Err(err) => warn!("concept-graph: could not schedule frame: {:?}", err),
		}
	}

	fn stop(&self) {
		if let (Some(handle), Some(window)) = (self.pending.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(handle);
		}
		self.callback.borrow_mut().take();
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Window event listener removed again on drop.
struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut()>,
}

impl WindowListener {
	fn add(window: &Window, event: &'static str, f: impl FnMut() + 'static) -> Option<Self> {
		let callback = Closure::<dyn FnMut()>::new(f);
		window
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self { event, callback })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window
				.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
		}
	}
}

fn viewport_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
		};
		return (dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0));
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn set_cursor(canvas: &HtmlCanvasElement, mode: Interaction) {
	// `leptos::prelude` brings a one-argument `style` into scope; call the DOM one.
	let _ = web_sys::HtmlElement::style(canvas).set_property("cursor", mode.cursor());
}

/// Renders an interactive force-directed concept graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal; each new value re-seeds the
/// layout. The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the window and re-seed on window resize.
/// Explicit `width`/`height` override automatic sizing. `on_select` receives
/// the clicked node.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] params: Option<SimulationParameters>,
	#[prop(optional)] theme: Option<Theme>,
	#[prop(optional, into)] on_select: Option<Callback<NodeSelection>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ForceGraphState>>> = Rc::new(RefCell::new(None));
	let resize_listener: Rc<RefCell<Option<WindowListener>>> = Rc::new(RefCell::new(None));
	let resized = RwSignal::new(0u32);
	let (params, theme) = (params.unwrap_or_default(), theme.unwrap_or_default());

	let (state_init, frames) = (state.clone(), Rc::new(FrameLoop::default()));
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let graph = data.get();
		resized.track();

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = viewport_size(&window, &canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(mut ctx) = context_2d(&canvas) else {
			warn!("concept-graph: canvas has no 2d context");
			return;
		};

		debug!(
			"concept-graph: seeding {} nodes, {} edges at {}x{}",
			graph.nodes.len(),
			graph.edges.len(),
			w,
			h
		);
		*state_init.borrow_mut() = Some(ForceGraphState::new(
			&graph,
			w,
			h,
			params.clone(),
			theme.clone(),
		));

		if fullscreen && resize_listener.borrow().is_none() {
			*resize_listener.borrow_mut() = WindowListener::add(&window, "resize", move || {
				let _ = resized.try_update(|n| *n = n.wrapping_add(1));
			});
		}

		let state_anim = state_init.clone();
		frames.start(move || {
			if !canvas.is_connected() {
				return false;
			}
			if let Some(s) = state_anim.borrow_mut().as_mut() {
				s.frame(&mut ctx);
			}
			true
		});
	});

	let pointer = move |ev: &MouseEvent| -> Option<(HtmlCanvasElement, f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		Some((canvas, x, y))
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((canvas, x, y)) = pointer(&ev) else {
			return;
		};
		let mode = state_md.borrow_mut().as_mut().map(|s| {
			s.pointer_down(x, y);
			s.interaction.mode()
		});
		if let Some(mode) = mode {
			set_cursor(&canvas, mode);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((canvas, x, y)) = pointer(&ev) else {
			return;
		};
		let outcome = state_mm
			.borrow_mut()
			.as_mut()
			.map(|s| (s.pointer_move(x, y), s.interaction.mode()));
		if let Some((Some(InteractionEvent::HoverChanged(_)), mode)) = outcome {
			set_cursor(&canvas, mode);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((canvas, _, _)) = pointer(&ev) else {
			return;
		};
		let outcome = state_mu
			.borrow_mut()
			.as_mut()
			.map(|s| (s.pointer_up(), s.interaction.mode()));
		let Some((event, mode)) = outcome else {
			return;
		};
		set_cursor(&canvas, mode);

		if let Some(InteractionEvent::Selected(selection)) = event {
			info!("concept-graph: selected {:?}", selection.id);
			if let Some(callback) = on_select.as_ref() {
				callback.run(selection);
			}
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |ev: MouseEvent| {
		if let Some(s) = state_ml.borrow_mut().as_mut() {
			s.pointer_leave();
		}
		if let Some((canvas, _, _)) = pointer(&ev) {
			set_cursor(&canvas, Interaction::Idle);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
	}
}

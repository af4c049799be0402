//! concept-graph: Interactive force-directed concept graph visualization.
//!
//! This crate provides a WASM-based canvas component that lays out concept
//! nodes with a physics simulation, renders them every frame, and lets the
//! user hover, drag and select nodes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde_json::Value;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Only needed for its `js` feature, which lets `rand` seed on wasm32.
use getrandom as _;

pub mod components;
pub mod error;

pub use components::force_graph::{
	ForceGraphCanvas, GraphData, GraphEdge, GraphNode, NodeSelection, SimulationParameters, Theme,
};
pub use error::GraphDataError;

/// Id of the `<script type="application/json">` element holding the graph.
pub const GRAPH_DATA_ELEMENT: &str = "graph-data";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("concept-graph: logging initialized");
}

/// Load graph data from the script element with id [`GRAPH_DATA_ELEMENT`].
/// Expected format: JSON with `{ nodes: [...], edges: [...] }`.
pub fn load_graph_data() -> Result<GraphData, GraphDataError> {
	let window: Window = web_sys::window().ok_or(GraphDataError::NoDocument)?;
	let document = window.document().ok_or(GraphDataError::NoDocument)?;
	let element = document
		.get_element_by_id(GRAPH_DATA_ELEMENT)
		.ok_or_else(|| GraphDataError::MissingElement(GRAPH_DATA_ELEMENT.into()))?;
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| GraphDataError::NotAScript(GRAPH_DATA_ELEMENT.into()))?;
	let json_text = script
		.text()
		.map_err(|_| GraphDataError::Unreadable(GRAPH_DATA_ELEMENT.into()))?;

	let data = GraphData::from_json(&json_text)?;
	info!(
		"concept-graph: loaded {} nodes, {} edges",
		data.nodes.len(),
		data.edges.len()
	);
	Ok(data)
}

/// Plain-text rendering of a definition payload.
fn definition_text(definition: &Value) -> String {
	match definition {
		Value::Null => String::new(),
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

/// Main application component.
/// Loads graph data from the DOM, renders the graph and shows the last
/// selected concept.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(|err| {
		warn!("concept-graph: {err}; showing an empty graph");
		GraphData::default()
	});
	let graph_signal = Signal::derive(move || graph_data.clone());
	let (selected, set_selected) = signal(None::<NodeSelection>);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Concept Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas
				data=graph_signal
				fullscreen=true
				on_select=move |node: NodeSelection| set_selected.set(Some(node))
			/>
			<div class="graph-overlay">
				<h1>"Concept Graph"</h1>
				<p class="subtitle">"Hover a concept for details. Drag to reposition. Click to select."</p>
				{move || {
					selected
						.get()
						.map(|node| {
							view! {
								<div class="selection">
									<h2>{node.name.clone()}</h2>
									<p class="category">{node.category.clone()}</p>
									<p class="definition">{definition_text(&node.definition)}</p>
								</div>
							}
						})
				}}
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn definition_text_unwraps_strings() {
		assert_eq!(definition_text(&Value::Null), "");
		assert_eq!(definition_text(&json!("Values have one owner.")), "Values have one owner.");
		assert_eq!(definition_text(&json!({ "k": 1 })), r#"{"k":1}"#);
	}
}

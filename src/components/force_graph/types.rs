//! Graph data structures exchanged with the force graph component.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::GraphDataError;

/// A concept node as supplied by the data source.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in edges.
	pub id: String,
	/// Display label. Long names are truncated when drawn.
	pub name: String,
	/// Category tag, used only to pick the node color.
	#[serde(default)]
	pub category: String,
	/// Non-negative importance (e.g. adoption count). Drives the node radius.
	/// Missing or `null` reads as 0.
	#[serde(default, deserialize_with = "null_as_zero")]
	pub weight: f64,
	/// Opaque payload forwarded untouched in the selection event.
	#[serde(default)]
	pub definition: Value,
}

/// A weighted relationship between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Relationship strength. `None` when the source did not provide one.
	#[serde(default)]
	pub weight: Option<f64>,
}

impl GraphEdge {
	/// Multiplier applied to the spring force. Missing or zero weights count as 1.
	pub fn spring_weight(&self) -> f64 {
		match self.weight {
			Some(w) if w > 0.0 => w,
			_ => 1.0,
		}
	}

	/// Weight used for stroke opacity and width. Literal value; missing counts as 1.
	pub fn stroke_weight(&self) -> f64 {
		self.weight.unwrap_or(1.0).max(0.0)
	}
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
	Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Complete graph data: nodes and edges.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	/// Concept nodes, in draw order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Relationships between nodes. Also read from `links`.
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// Parse graph data from its JSON form (`{ "nodes": [...], "edges": [...] }`).
	pub fn from_json(text: &str) -> Result<Self, GraphDataError> {
		Ok(serde_json::from_str(text)?)
	}
}

/// Emitted when a node is clicked, for an external detail view to display.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSelection {
	/// Id of the clicked node.
	pub id: String,
	/// Full, untruncated name.
	pub name: String,
	/// Category tag as supplied.
	pub category: String,
	/// Node weight.
	pub weight: f64,
	/// Definition payload, passed through untouched.
	pub definition: Value,
}

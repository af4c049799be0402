//! Force-directed concept graph visualization component.
//!
//! Lays out concept nodes and weighted relationships with an iterative force
//! simulation and draws them on an HTML canvas every frame:
//! - Repulsion, edge springs and centering, damped, frozen after a step budget
//! - Node glow, body and label sized by weight, colored by category
//! - Hover tooltips, node dragging and click-to-select
//!
//! # Example
//!
//! ```ignore
//! use concept_graph::{ForceGraphCanvas, GraphData, GraphEdge, GraphNode};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "a".into(), name: "Ownership".into(), .. },
//!         GraphNode { id: "b".into(), name: "Borrowing".into(), .. },
//!     ],
//!     edges: vec![
//!         GraphEdge { source: "a".into(), target: "b".into(), weight: Some(2.0) },
//!     ],
//! };
//!
//! view! {
//!     <ForceGraphCanvas
//!         data=Signal::derive(move || data.clone())
//!         fullscreen=true
//!         on_select=|node: NodeSelection| log::info!("{}", node.name)
//!     />
//! }
//! ```

mod component;
mod interaction;
mod layout;
mod picker;
mod render;
pub mod scale;
mod simulation;
mod state;
mod surface;
pub mod theme;
mod types;

pub use component::ForceGraphCanvas;
pub use interaction::{Drag, Interaction, InteractionController, InteractionEvent};
pub use layout::{LayoutModel, LayoutNode, NodeIdx};
pub use picker::node_at;
pub use render::render;
pub use simulation::{ForceSimulator, Settled, SimulationParameters, repulsion, spring};
pub use state::ForceGraphState;
pub use surface::Surface;
pub use theme::Theme;
pub use types::{GraphData, GraphEdge, GraphNode, NodeSelection};

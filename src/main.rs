//! Browser entrypoint: mounts the concept graph app.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use concept_graph::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	log::debug!("concept-graph: mounting app");

	mount_to_body(App)
}

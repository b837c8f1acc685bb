//! cluster-graph: Interactive SVG visualization of root/child cluster graphs.
//!
//! This crate provides a WASM-based component that places root nodes randomly
//! on a square canvas, clusters each root's children around it, draws the
//! connecting edges and reports clicks on nodes.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod components;
pub mod error;

pub use components::cluster_graph::{
	ChildNode, ClickHandler, ClusterGraph, GraphConfig, GraphData, GraphLayout, MemorySurface,
	NodeKind, NodePosition, NodeView, RootNode, Surface, generate,
};
pub use error::{Error, Result};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("cluster-graph: logging initialized");
}

/// Parse graph data in the `{ "nodes": [...] }` JSON format.
pub fn parse_graph_data(json: &str) -> Result<GraphData> {
	let data: GraphData = serde_json::from_str(json)?;
	components::cluster_graph::validate(&data.nodes)?;
	Ok(data)
}

/// Load graph data from a script element with id="graph-data".
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match parse_graph_data(&json_text) {
		Ok(data) => {
			info!(
				"cluster-graph: loaded {} roots, {} nodes total",
				data.nodes.len(),
				data.node_count()
			);
			Some(data)
		}
		Err(e) => {
			warn!("cluster-graph: failed to load graph data: {}", e);
			None
		}
	}
}

/// Log the clicked node together with its cluster.
fn log_click(node: NodeView<'_, serde_json::Value>) {
	let related: Vec<&str> = match node.kind {
		NodeKind::Root => node.children().map(|c| c.position().id.as_str()).collect(),
		NodeKind::Child => node
			.parent()
			.map(|p| p.position().id.as_str())
			.into_iter()
			.collect(),
	};
	info!(
		"cluster-graph: clicked {} ({:?}), related {:?}",
		node.id, node.kind, related
	);
}

/// Main application component.
/// Loads graph data from DOM and renders the cluster graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());

	let on_click: ClickHandler<serde_json::Value> = Rc::new(log_click);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Cluster Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ClusterGraph data=graph_signal on_click=on_click />
			<div class="graph-overlay">
				<h1>"Cluster Graph"</h1>
				<p class="subtitle">"Click a node to inspect its cluster."</p>
			</div>
		</div>
	}
}

//! Leptos component wrapping the cluster graph SVG.
//!
//! The component renders a host container and, once it is mounted, an effect
//! generates the scene into it through a [`DomSurface`]. The effect reruns
//! whenever the `data` signal changes, replacing the previous scene.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use serde_json::Value;

use super::dom::DomSurface;
use super::render::{self, ClickHandler, GraphConfig, HOST_ID};
use super::types::GraphData;

/// Renders a root/child cluster graph as a scalable SVG.
///
/// Pass graph data via the reactive `data` signal. `on_click` receives the
/// clicked node with access to its parent or children. The host container
/// takes the id `host_id` (default `"svg"`) and fills its parent.
#[component]
pub fn ClusterGraph(
	#[prop(into)] data: Signal<GraphData<Value>>,
	#[prop(optional)] on_click: Option<ClickHandler<Value>>,
	#[prop(default = HOST_ID.to_string(), into)] host_id: String,
) -> impl IntoView {
	let host_ref = NodeRef::<leptos::html::Div>::new();
	// Keeps click closures alive until the next render replaces them.
	let surface: Rc<RefCell<Option<DomSurface>>> = Rc::new(RefCell::new(None));
	let container_id = host_id.clone();

	Effect::new(move |_| {
		let graph = data.get();
		let Some(host) = host_ref.get() else {
			return;
		};
		host.set_inner_html("");

		let mut dom = match DomSurface::new() {
			Ok(dom) => dom,
			Err(e) => {
				warn!("cluster-graph: {}", e);
				return;
			}
		};

		let mut config = GraphConfig::new(graph);
		config.events.on_click = on_click.clone();
		config.host_id = Some(host_id.clone());

		if let Err(e) = render::generate(&mut dom, &config, &mut rand::thread_rng()) {
			warn!("cluster-graph: render failed: {}", e);
		}
		*surface.borrow_mut() = Some(dom);
	});

	view! {
		<div
			node_ref=host_ref
			id=container_id
			class="cluster-graph"
			style="height: 100%; width: 100%;"
		/>
	}
}

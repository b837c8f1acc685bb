//! SVG scene assembly for the cluster graph.
//!
//! Drawing happens in a fixed order so later elements paint on top:
//! 1. The `<svg>` root sized to the canvas
//! 2. One `<path>` per connection, in position then connection order
//! 3. One `<circle>` per position
//!
//! The scene is then inserted into the host container and click handlers are
//! bound to the circles.

use std::rc::Rc;

use log::{debug, info};
use rand::Rng;

use super::scale::ScaleConfig;
use super::state::{GraphLayout, NodePosition, NodeView, check_reserved_ids, generate_positions};
use super::surface::Surface;
use super::theme::Theme;
use super::types::GraphData;
use crate::error::{Error, Result};

/// Id of the container the scene is inserted into by default.
pub const HOST_ID: &str = "svg";

/// Handler invoked with the clicked node and access to its relations.
pub type ClickHandler<T> = Rc<dyn Fn(NodeView<'_, T>)>;

/// Event handlers bound to rendered nodes.
pub struct GraphEvents<T> {
	/// Called when a node circle is clicked.
	pub on_click: Option<ClickHandler<T>>,
}

impl<T> Default for GraphEvents<T> {
	fn default() -> Self {
		Self { on_click: None }
	}
}

impl<T> Clone for GraphEvents<T> {
	fn clone(&self) -> Self {
		Self {
			on_click: self.on_click.clone(),
		}
	}
}

/// Everything needed to generate one scene.
pub struct GraphConfig<T> {
	/// Graph to lay out.
	pub data: GraphData<T>,
	/// Handlers bound to the rendered nodes.
	pub events: GraphEvents<T>,
	/// Canvas sizing and clamping constants.
	pub scale: ScaleConfig,
	/// Colors, radii and stroke widths.
	pub theme: Theme,
	/// Container to insert the scene into. `None` only builds and returns it.
	pub host_id: Option<String>,
}

impl<T> GraphConfig<T> {
	/// Default scale and theme, inserted into the [`HOST_ID`] container.
	pub fn new(data: GraphData<T>) -> Self {
		Self {
			data,
			events: GraphEvents::default(),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			host_id: Some(HOST_ID.to_string()),
		}
	}

	/// Set the click handler.
	pub fn on_click(mut self, handler: impl Fn(NodeView<'_, T>) + 'static) -> Self {
		self.events.on_click = Some(Rc::new(handler));
		self
	}
}

/// A rendered scene and the layout behind it.
pub struct Scene<E, T> {
	/// The `<svg>` root element.
	pub svg: E,
	/// Positions and relations the scene was drawn from.
	pub layout: Rc<GraphLayout<T>>,
	/// Number of `<path>` elements drawn.
	pub edges: usize,
	/// Number of `<circle>` elements drawn.
	pub nodes: usize,
	/// Number of click listeners bound.
	pub listeners: usize,
}

/// Create the `<svg>` root for a square canvas of side `canvas_size`.
pub fn svg_element<S: Surface>(surface: &mut S, canvas_size: i64) -> Result<S::Element> {
	let svg = surface.create_element("svg")?;
	surface.set_attribute(
		&svg,
		"viewBox",
		&format!("0,0,{canvas_size},{canvas_size}"),
	)?;
	surface.set_attribute(&svg, "style", "height: 100%; width: 100%;")?;
	surface.set_attribute(&svg, "preserveAspectRatio", "xMidYMid meet")?;
	Ok(svg)
}

fn path_data<T>(source: &NodePosition<T>, target: &NodePosition<T>) -> String {
	format!("M{},{}L{},{}", source.cx, source.cy, target.cx, target.cy)
}

/// Append one edge per connection of every position. Returns the edge count.
pub fn draw_edges<S: Surface, T>(
	surface: &mut S,
	svg: &S::Element,
	layout: &GraphLayout<T>,
	theme: &Theme,
) -> Result<usize> {
	let stroke = theme.edge.color.to_css();
	let mut count = 0;

	for source in layout.positions() {
		let width = theme.edge.width(source.kind).to_string();
		for target_id in &source.connections {
			let target = layout
				.position(target_id)
				.ok_or_else(|| Error::UnknownConnection {
					from: source.id.clone(),
					to: target_id.clone(),
				})?;

			let path = surface.create_element("path")?;
			surface.set_attribute(&path, "d", &path_data(source, target))?;
			surface.set_attribute(&path, "stroke", &stroke)?;
			surface.set_attribute(&path, "fill", "none")?;
			surface.set_attribute(&path, "stroke-width", &width)?;
			surface.append_child(svg, &path)?;
			count += 1;
		}
	}

	Ok(count)
}

/// Append one circle per position, identified by the node id. Returns the node count.
pub fn draw_nodes<S: Surface, T>(
	surface: &mut S,
	svg: &S::Element,
	layout: &GraphLayout<T>,
	theme: &Theme,
) -> Result<usize> {
	for position in layout.positions() {
		let circle = surface.create_element("circle")?;
		surface.set_attribute(&circle, "id", &position.id)?;
		surface.set_attribute(&circle, "cx", &position.cx.to_string())?;
		surface.set_attribute(&circle, "cy", &position.cy.to_string())?;
		let (radius, color) = (theme.node.radius(position.kind), theme.node.color(position.kind));
		surface.set_attribute(&circle, "r", &radius.to_string())?;
		surface.set_attribute(&circle, "fill", &color.to_css())?;
		surface.append_child(svg, &circle)?;
	}

	Ok(layout.len())
}

/// Insert the scene into the host container with id `host_id`.
pub fn append_to_host<S: Surface>(surface: &mut S, svg: &S::Element, host_id: &str) -> Result<()> {
	let host = surface.find_by_id(host_id).ok_or_else(|| Error::HostNotFound {
		id: host_id.to_string(),
	})?;
	surface.append_child(&host, svg)
}

/// Bind `handler` to the rendered circle of every position.
///
/// Circles are looked up by id, so the scene must already be attached to the
/// host. Returns the number of listeners bound, zero without a handler.
pub fn bind_click_events<S: Surface, T: 'static>(
	surface: &mut S,
	layout: &Rc<GraphLayout<T>>,
	handler: Option<&ClickHandler<T>>,
) -> Result<usize> {
	let Some(handler) = handler else {
		return Ok(0);
	};

	for (index, position) in layout.positions().iter().enumerate() {
		let circle = surface
			.find_by_id(&position.id)
			.ok_or_else(|| Error::ElementNotFound {
				id: position.id.clone(),
			})?;
		let (layout, handler) = (Rc::clone(layout), Rc::clone(handler));
		surface.add_click_listener(
			&circle,
			Box::new(move || {
				if let Some(node) = layout.view(index) {
					handler(node);
				}
			}),
		)?;
	}

	Ok(layout.len())
}

/// Lay out `config.data` and render it onto `surface`.
///
/// The graph is validated before anything touches the surface, including a
/// check that no node id collides with the host id. With a click handler
/// configured the scene must end up attached to a host, since circles are
/// bound by id.
pub fn generate<S, T, R>(
	surface: &mut S,
	config: &GraphConfig<T>,
	rng: &mut R,
) -> Result<Scene<S::Element, T>>
where
	S: Surface,
	T: Clone + 'static,
	R: Rng + ?Sized,
{
	if let Some(host_id) = &config.host_id {
		check_reserved_ids(&config.data.nodes, &[host_id.as_str()])?;
	}
	let layout = Rc::new(generate_positions(&config.data.nodes, &config.scale, rng)?);

	let svg = svg_element(surface, layout.canvas_size())?;
	let edges = draw_edges(surface, &svg, &layout, &config.theme)?;
	let nodes = draw_nodes(surface, &svg, &layout, &config.theme)?;
	debug!("cluster-graph: drew {} edges and {} nodes", edges, nodes);

	if let Some(host_id) = &config.host_id {
		append_to_host(surface, &svg, host_id)?;
	}
	let listeners = bind_click_events(surface, &layout, config.events.on_click.as_ref())?;

	info!(
		"cluster-graph: rendered {} nodes, {} edges on a {} unit canvas ({} theme)",
		nodes,
		edges,
		layout.canvas_size(),
		config.theme.name
	);

	Ok(Scene {
		svg,
		layout,
		edges,
		nodes,
		listeners,
	})
}

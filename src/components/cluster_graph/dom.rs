//! Browser DOM adapter for [`Surface`].

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use super::surface::{Listener, Surface};
use crate::error::{Error, Result};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn js_error(value: JsValue) -> Error {
	Error::Surface(format!("{value:?}"))
}

/// Renders into the live document using SVG-namespaced elements.
///
/// Click closures are owned by the surface, so it must outlive the rendered
/// scene for listeners to keep firing.
pub struct DomSurface {
	document: Document,
	listeners: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

impl DomSurface {
	/// Surface over the current window's document.
	pub fn new() -> Result<Self> {
		let document = web_sys::window()
			.ok_or(Error::EnvironmentNotReady("no window"))?
			.document()
			.ok_or(Error::EnvironmentNotReady("no document"))?;
		Ok(Self {
			document,
			listeners: Vec::new(),
		})
	}
}

impl Surface for DomSurface {
	type Element = Element;

	fn create_element(&mut self, name: &str) -> Result<Element> {
		self.document
			.create_element_ns(Some(SVG_NS), name)
			.map_err(js_error)
	}

	fn set_attribute(&mut self, element: &Element, key: &str, value: &str) -> Result<()> {
		element.set_attribute(key, value).map_err(js_error)
	}

	fn append_child(&mut self, parent: &Element, child: &Element) -> Result<()> {
		parent.append_child(child).map(|_| ()).map_err(js_error)
	}

	fn find_by_id(&self, id: &str) -> Option<Element> {
		self.document.get_element_by_id(id)
	}

	fn add_click_listener(&mut self, element: &Element, listener: Listener) -> Result<()> {
		let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |_: MouseEvent| listener());
		element
			.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
			.map_err(js_error)?;
		self.listeners.push(closure);
		Ok(())
	}
}

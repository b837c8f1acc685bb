//! Rendering surface abstraction.
//!
//! The scene builder only needs five operations from its host: create an
//! element, set an attribute, append a child, find an element by id, and attach
//! a click listener. [`Surface`] captures exactly that so the same scene code
//! drives the browser DOM ([`super::dom::DomSurface`]) and the in-memory
//! [`MemorySurface`].

use crate::error::{Error, Result};

/// Callback fired when a rendered element is clicked.
pub type Listener = Box<dyn Fn()>;

/// Minimal element-tree interface the scene builder renders into.
pub trait Surface {
	/// Handle to an element owned by the surface.
	type Element: Clone;

	/// Create a detached element with the given tag name.
	fn create_element(&mut self, name: &str) -> Result<Self::Element>;

	/// Set `key` on `element`, replacing any previous value.
	fn set_attribute(&mut self, element: &Self::Element, key: &str, value: &str) -> Result<()>;

	/// Append `child` to `parent`, detaching it from any previous parent.
	///
	/// Appending an element under itself or under one of its descendants is an
	/// error.
	fn append_child(&mut self, parent: &Self::Element, child: &Self::Element) -> Result<()>;

	/// Find an element that is attached to the host document by its `id` attribute.
	fn find_by_id(&self, id: &str) -> Option<Self::Element>;

	/// Run `listener` whenever `element` is clicked.
	fn add_click_listener(&mut self, element: &Self::Element, listener: Listener) -> Result<()>;
}

/// Handle into a [`MemorySurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// One element of a [`MemorySurface`] tree.
pub struct MemoryElement {
	/// Tag name.
	pub name: String,
	/// Attributes in insertion order.
	pub attributes: Vec<(String, String)>,
	/// Child elements in document order.
	pub children: Vec<ElementId>,
	parent: Option<ElementId>,
	listeners: Vec<Listener>,
}

impl MemoryElement {
	/// Value of attribute `key`, if set.
	pub fn attribute(&self, key: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}
}

/// Headless element tree.
///
/// Elements only become reachable through [`Surface::find_by_id`] once they
/// are attached below the host container, mirroring `getElementById`.
#[derive(Default)]
pub struct MemorySurface {
	elements: Vec<MemoryElement>,
	host: Option<ElementId>,
}

impl MemorySurface {
	/// A surface without any host container.
	pub fn new() -> Self {
		Self::default()
	}

	/// A surface with a `div` host container carrying the given id.
	pub fn with_host(id: &str) -> Self {
		let mut surface = Self::new();
		let host = surface.push("div");
		surface.elements[host.0]
			.attributes
			.push(("id".to_string(), id.to_string()));
		surface.host = Some(host);
		surface
	}

	fn push(&mut self, name: &str) -> ElementId {
		self.elements.push(MemoryElement {
			name: name.to_string(),
			attributes: Vec::new(),
			children: Vec::new(),
			parent: None,
			listeners: Vec::new(),
		});
		ElementId(self.elements.len() - 1)
	}

	fn get(&self, id: ElementId) -> Result<&MemoryElement> {
		self.elements
			.get(id.0)
			.ok_or_else(|| Error::Surface(format!("no element with handle {}", id.0)))
	}

	fn get_mut(&mut self, id: ElementId) -> Result<&mut MemoryElement> {
		self.elements
			.get_mut(id.0)
			.ok_or_else(|| Error::Surface(format!("no element with handle {}", id.0)))
	}

	/// The host container, if the surface has one.
	pub fn host(&self) -> Option<ElementId> {
		self.host
	}

	/// Panics if `id` does not belong to this surface.
	pub fn element(&self, id: ElementId) -> &MemoryElement {
		&self.elements[id.0]
	}

	/// Children of `id` with the given element name, in document order.
	pub fn children_named(&self, id: ElementId, name: &str) -> Vec<ElementId> {
		self.element(id)
			.children
			.iter()
			.copied()
			.filter(|&child| self.element(child).name == name)
			.collect()
	}

	/// Dispatch a click to the attached element with this id.
	///
	/// Returns the number of listeners that ran.
	pub fn click(&self, id: &str) -> usize {
		let Some(target) = self.find_by_id(id) else {
			return 0;
		};
		let listeners = &self.element(target).listeners;
		for listener in listeners {
			listener();
		}
		listeners.len()
	}

	/// Whether `ancestor` is `element` or one of its ancestors.
	fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
		let mut current = Some(element);
		while let Some(id) = current {
			if id == ancestor {
				return true;
			}
			current = self.elements[id.0].parent;
		}
		false
	}

	fn find_below(&self, from: ElementId, id: &str) -> Option<ElementId> {
		let element = self.element(from);
		if element.attribute("id") == Some(id) {
			return Some(from);
		}
		element
			.children
			.iter()
			.find_map(|&child| self.find_below(child, id))
	}
}

impl Surface for MemorySurface {
	type Element = ElementId;

	fn create_element(&mut self, name: &str) -> Result<ElementId> {
		Ok(self.push(name))
	}

	fn set_attribute(&mut self, element: &ElementId, key: &str, value: &str) -> Result<()> {
		let attributes = &mut self.get_mut(*element)?.attributes;
		match attributes.iter_mut().find(|(k, _)| k == key) {
			Some((_, v)) => *v = value.to_string(),
			None => attributes.push((key.to_string(), value.to_string())),
		}
		Ok(())
	}

	fn append_child(&mut self, parent: &ElementId, child: &ElementId) -> Result<()> {
		self.get(*parent)?;
		self.get(*child)?;
		if self.contains(*child, *parent) {
			return Err(Error::Surface(format!(
				"cannot append element {} inside itself",
				child.0
			)));
		}
		if let Some(old) = self.get(*child)?.parent {
			self.elements[old.0].children.retain(|c| c != child);
		}
		self.elements[child.0].parent = Some(*parent);
		self.elements[parent.0].children.push(*child);
		Ok(())
	}

	fn find_by_id(&self, id: &str) -> Option<ElementId> {
		self.host.and_then(|host| self.find_below(host, id))
	}

	fn add_click_listener(&mut self, element: &ElementId, listener: Listener) -> Result<()> {
		self.get_mut(*element)?.listeners.push(listener);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn detached_elements_are_not_found() {
		let mut surface = MemorySurface::with_host("svg");
		let circle = surface.create_element("circle").unwrap();
		surface.set_attribute(&circle, "id", "n1").unwrap();
		assert_eq!(surface.find_by_id("n1"), None);

		let host = surface.host().unwrap();
		surface.append_child(&host, &circle).unwrap();
		assert_eq!(surface.find_by_id("n1"), Some(circle));
		assert_eq!(surface.find_by_id("svg"), Some(host));
	}

	#[test]
	fn surface_without_host_finds_nothing() {
		let mut surface = MemorySurface::new();
		let el = surface.create_element("svg").unwrap();
		surface.set_attribute(&el, "id", "svg").unwrap();
		assert_eq!(surface.find_by_id("svg"), None);
	}

	#[test]
	fn set_attribute_overwrites() {
		let mut surface = MemorySurface::new();
		let el = surface.create_element("circle").unwrap();
		surface.set_attribute(&el, "r", "1").unwrap();
		surface.set_attribute(&el, "r", "2").unwrap();
		assert_eq!(surface.element(el).attribute("r"), Some("2"));
		assert_eq!(surface.element(el).attributes.len(), 1);
	}

	#[test]
	fn append_moves_between_parents() {
		let mut surface = MemorySurface::new();
		let (a, b, c) = (
			surface.create_element("g").unwrap(),
			surface.create_element("g").unwrap(),
			surface.create_element("circle").unwrap(),
		);
		surface.append_child(&a, &c).unwrap();
		surface.append_child(&b, &c).unwrap();
		assert!(surface.element(a).children.is_empty());
		assert_eq!(surface.element(b).children, vec![c]);
	}

	#[test]
	fn append_rejects_cycles() {
		let mut surface = MemorySurface::with_host("svg");
		let host = surface.host().unwrap();
		let (outer, inner) = (
			surface.create_element("g").unwrap(),
			surface.create_element("g").unwrap(),
		);
		surface.append_child(&host, &outer).unwrap();
		surface.append_child(&outer, &inner).unwrap();

		assert!(matches!(
			surface.append_child(&inner, &outer),
			Err(Error::Surface(_))
		));
		assert!(matches!(
			surface.append_child(&outer, &outer),
			Err(Error::Surface(_))
		));
		assert!(matches!(
			surface.append_child(&inner, &host),
			Err(Error::Surface(_))
		));

		// The tree is unchanged and lookups still terminate.
		assert_eq!(surface.element(outer).children, vec![inner]);
		assert_eq!(surface.element(host).children, vec![outer]);
		assert_eq!(surface.find_by_id("missing"), None);
	}

	#[test]
	fn click_runs_listeners() {
		let mut surface = MemorySurface::with_host("svg");
		let host = surface.host().unwrap();
		let el = surface.create_element("circle").unwrap();
		surface.set_attribute(&el, "id", "n1").unwrap();
		surface.append_child(&host, &el).unwrap();

		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		surface
			.add_click_listener(&el, Box::new(move || counter.set(counter.get() + 1)))
			.unwrap();

		assert_eq!(surface.click("n1"), 1);
		assert_eq!(surface.click("missing"), 0);
		assert_eq!(hits.get(), 1);
	}
}

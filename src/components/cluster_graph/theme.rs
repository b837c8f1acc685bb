//! Visual theming for the cluster graph.
//!
//! Colors, radii and stroke widths used when building the SVG scene.

use super::types::NodeKind;

/// Opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
}

impl Color {
	/// `#ffffff`
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	/// Color from its three channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Lowercase `#rrggbb` form used for SVG attributes.
	pub fn to_css(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Stroke color for every edge
	pub color: Color,
	/// Stroke width for edges leaving a root
	pub root_width: f64,
	/// Stroke width for edges leaving a child
	pub child_width: f64,
}

impl EdgeStyle {
	/// Stroke width for edges leaving a node of `kind`.
	pub fn width(&self, kind: NodeKind) -> f64 {
		match kind {
			NodeKind::Root => self.root_width,
			NodeKind::Child => self.child_width,
		}
	}
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Fill for root circles
	pub root_color: Color,
	/// Fill for child circles
	pub child_color: Color,
	/// Radius of root circles
	pub root_radius: f64,
	/// Radius of child circles
	pub child_radius: f64,
}

impl NodeStyle {
	/// Fill color for a node of `kind`.
	pub fn color(&self, kind: NodeKind) -> Color {
		match kind {
			NodeKind::Root => self.root_color,
			NodeKind::Child => self.child_color,
		}
	}

	/// Circle radius for a node of `kind`.
	pub fn radius(&self, kind: NodeKind) -> f64 {
		match kind {
			NodeKind::Root => self.root_radius,
			NodeKind::Child => self.child_radius,
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Short name, reported when a scene is rendered
	pub name: &'static str,
	/// Edge strokes
	pub edge: EdgeStyle,
	/// Node circles
	pub node: NodeStyle,
}

impl Theme {
	/// Neon cyan roots and red children on white hairlines (default)
	pub fn neon() -> Self {
		Self {
			name: "neon",
			edge: EdgeStyle {
				color: Color::WHITE,
				root_width: 0.3,
				child_width: 0.1,
			},
			node: NodeStyle {
				root_color: Color::rgb(0x36, 0xf9, 0xf6),
				child_color: Color::rgb(0xfe, 0x44, 0x50),
				root_radius: 1.25,
				child_radius: 1.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::neon()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_theme_css() {
		let theme = Theme::default();
		assert_eq!(theme.node.color(NodeKind::Root).to_css(), "#36f9f6");
		assert_eq!(theme.node.color(NodeKind::Child).to_css(), "#fe4450");
		assert_eq!(theme.edge.color.to_css(), "#ffffff");
		assert_eq!(Color::rgb(0x0a, 0, 0xff).to_css(), "#0a00ff");
	}

	#[test]
	fn sizes_follow_node_kind() {
		let theme = Theme::default();
		assert_eq!(theme.node.radius(NodeKind::Root).to_string(), "1.25");
		assert_eq!(theme.node.radius(NodeKind::Child).to_string(), "1");
		assert_eq!(theme.edge.width(NodeKind::Root).to_string(), "0.3");
		assert_eq!(theme.edge.width(NodeKind::Child).to_string(), "0.1");
	}
}

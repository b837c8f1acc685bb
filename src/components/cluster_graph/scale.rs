//! Canvas sizing and border handling for the cluster layout.
//!
//! The canvas is a square `viewBox` whose side grows linearly with the number
//! of root nodes. All coordinates are integer world units inside that box.
//!
//! # Border offset
//!
//! Random coordinates are pushed away from the edges by [`clamp_to_border`].
//! This is not a true clamp: values near the far edge move inwards by one
//! offset, values near the origin move outwards by two offsets. On canvases
//! no larger than four offsets the two thresholds overlap and the far-edge
//! branch wins, which can place a coordinate below zero.

/// Layout constants for canvas sizing and node placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaleConfig {
	/// Canvas side length contributed by each root node.
	pub expand_per_node: i64,
	/// Distance kept between generated coordinates and the canvas border.
	pub border_offset: i64,
	/// Half-width of the square around a root in which its children are placed.
	pub child_spread: i64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			expand_per_node: 25,
			border_offset: 10,
			child_spread: 20,
		}
	}
}

impl ScaleConfig {
	/// Side length of the square canvas for `root_count` root nodes.
	///
	/// Only roots count towards the size, children are not included.
	pub fn canvas_size(&self, root_count: usize) -> i64 {
		self.expand_per_node * root_count as i64
	}

	/// Apply [`clamp_to_border`] with the configured offset.
	pub fn clamp(&self, max: i64, x: i64) -> i64 {
		clamp_to_border(self.border_offset, max, x)
	}
}

/// Move `x` away from the borders of a `[0, max]` axis.
pub fn clamp_to_border(offset: i64, max: i64, x: i64) -> i64 {
	if x >= max - 2 * offset {
		x - offset
	} else if x <= 2 * offset {
		x + 2 * offset
	} else {
		x
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn canvas_grows_with_root_count() {
		let config = ScaleConfig::default();
		assert_eq!(config.canvas_size(0), 0);
		assert_eq!(config.canvas_size(1), 25);
		assert_eq!(config.canvas_size(4), 100);
	}

	#[test]
	fn clamp_moves_far_edge_inwards() {
		assert_eq!(clamp_to_border(10, 100, 80), 70);
		assert_eq!(clamp_to_border(10, 100, 99), 89);
	}

	#[test]
	fn clamp_moves_near_edge_outwards() {
		assert_eq!(clamp_to_border(10, 100, 20), 40);
		assert_eq!(clamp_to_border(10, 100, 0), 20);
		assert_eq!(clamp_to_border(10, 100, -15), 5);
	}

	#[test]
	fn clamp_leaves_interior_untouched() {
		assert_eq!(clamp_to_border(10, 100, 21), 21);
		assert_eq!(clamp_to_border(10, 100, 79), 79);
	}

	#[test]
	fn far_edge_wins_on_small_canvas() {
		// 25 - 20 = 5, so anything from 5 up takes the far-edge branch.
		assert_eq!(clamp_to_border(10, 25, 5), -5);
		assert_eq!(clamp_to_border(10, 25, 4), 24);
	}
}

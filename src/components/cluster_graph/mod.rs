//! Root/child cluster graph visualization component.
//!
//! Renders a two-level graph as an SVG diagram:
//! - Root nodes scattered over a square canvas sized by the root count
//! - Children clustered in a small box around their root
//! - Straight edges for root links and child-to-root ownership
//! - Click handlers receiving the node with its parent/children
//!
//! Scene assembly runs against the [`Surface`] trait, so layout and drawing
//! work headlessly through [`MemorySurface`].
//!
//! # Example
//!
//! ```ignore
//! use cluster_graph::{ClusterGraph, GraphData};
//!
//! let data: GraphData = serde_json::from_str(r#"{
//!     "nodes": [
//!         { "id": "r1", "connections": ["r2"], "children": [{ "id": "c1" }] },
//!         { "id": "r2", "connections": [], "children": [] }
//!     ]
//! }"#)?;
//!
//! view! { <ClusterGraph data=data /> }
//! ```

mod component;
mod dom;
pub mod render;
pub mod scale;
mod state;
pub mod surface;
pub mod theme;
mod types;

pub use component::ClusterGraph;
pub use dom::DomSurface;
pub use render::{ClickHandler, GraphConfig, GraphEvents, HOST_ID, Scene, generate};
pub use scale::ScaleConfig;
pub use state::{
	GraphLayout, NodePosition, NodeView, check_reserved_ids, generate_positions, validate,
};
pub use surface::{MemorySurface, Surface};
pub use theme::Theme;
pub use types::{ChildNode, GraphData, NodeKind, RootNode};

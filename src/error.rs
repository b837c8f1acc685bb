//! Error type shared by graph validation, layout and rendering.

/// Everything that can go wrong while turning graph data into a rendered scene.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The graph has no root nodes, so there is no canvas to lay out.
	#[error("graph has no root nodes")]
	EmptyGraph,
	/// The same id is used twice across roots and children, or a node id
	/// collides with the host container id.
	#[error("duplicate node id: {id}")]
	DuplicateId {
		/// The repeated id.
		id: String,
	},
	/// A connection names an id that is not a root node of the graph.
	#[error("node {from} connects to unknown root {to}")]
	UnknownConnection {
		/// Node whose connection list holds the bad id.
		from: String,
		/// The id that does not name a root.
		to: String,
	},
	/// The host container the scene is inserted into does not exist.
	#[error("host container #{id} not found")]
	HostNotFound {
		/// Requested host id.
		id: String,
	},
	/// A rendered node could not be located for event binding.
	#[error("rendered node #{id} not found on surface")]
	ElementNotFound {
		/// Id of the node whose circle is missing.
		id: String,
	},
	/// The rendering environment (window, document) is not available.
	#[error("rendering environment not ready: {0}")]
	EnvironmentNotReady(&'static str),
	/// The rendering surface rejected an operation.
	#[error("rendering surface error: {0}")]
	Surface(String),
	/// Graph data could not be parsed.
	#[error("invalid graph data: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;
use wasm_bindgen::JsValue;

use super::types::{EdgeId, NodeId};

/// Everything a network view can fail with.
#[derive(Debug, Error)]
pub enum ViewError {
	/// No element carries the requested container id.
	#[error("container element `{0}` not found")]
	ContainerNotFound(String),
	/// A config value failed validation.
	#[error("invalid view config: `{field}` {reason}")]
	InvalidConfig {
		/// Name of the offending field.
		field: &'static str,
		/// What is wrong with it.
		reason: String,
	},
	/// The browser refused a DOM or canvas call.
	#[error("host environment error: {0}")]
	Host(String),
	/// No node with this id was added.
	#[error("node `{0}` is not in the view")]
	UnknownNode(NodeId),
	/// No edge with this label was added.
	#[error("edge `{0}` is not in the view")]
	UnknownEdge(EdgeId),
}

impl From<JsValue> for ViewError {
	fn from(value: JsValue) -> Self {
		ViewError::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

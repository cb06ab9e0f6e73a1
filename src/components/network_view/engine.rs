use std::fmt::Debug;

use super::config::{DrawingProperties, GraphProperties};
use super::error::ViewError;
use super::types::{EdgeId, NodeAttributes, NodeId, NodeState};

/// Called with the id of a node the user clicked.
pub type NodeClickHandler = Box<dyn FnMut(&NodeId)>;

/// A graph renderer bound to one container element.
///
/// The engine owns node and edge storage; callers only ever hold the
/// handles it returns.
pub trait RenderEngine: Sized {
	/// Element the engine draws into.
	type Container;
	/// Returned by [`RenderEngine::add_node`].
	type NodeHandle: Clone + Debug;
	/// Returned by [`RenderEngine::add_edge`].
	type EdgeHandle: Clone + Debug;

	/// Binds a new engine to `container`.
	fn init(container: Self::Container) -> Result<Self, ViewError>;

	/// Colors, fonts, label and weight visibility.
	fn drawing_properties(&mut self, props: &DrawingProperties);

	/// Node size bounds and rescaling.
	fn graph_properties(&mut self, props: &GraphProperties);

	/// Stores a node; nothing is drawn until [`RenderEngine::draw`].
	fn add_node(&mut self, id: &NodeId, attributes: NodeAttributes) -> Self::NodeHandle;

	/// Endpoints are taken on trust; an edge to an unknown node is kept but not drawn.
	fn add_edge(&mut self, label: &EdgeId, from: &NodeId, to: &NodeId) -> Self::EdgeHandle;

	/// Weight printed next to the edge.
	fn set_edge_weight(&mut self, edge: &Self::EdgeHandle, weight: f64);

	/// Drops the node and every edge touching it.
	fn remove_node(&mut self, node: &Self::NodeHandle);

	/// Drops one edge.
	fn remove_edge(&mut self, edge: &Self::EdgeHandle);

	/// Pins the node at `(x, y)`.
	fn move_node(&mut self, node: &Self::NodeHandle, x: f64, y: f64);

	/// Current position, `None` for a handle the engine no longer knows.
	fn node_position(&self, node: &Self::NodeHandle) -> Option<(f64, f64)>;

	/// Selection and highlight flags.
	fn set_node_state(&mut self, node: &Self::NodeHandle, state: NodeState);

	/// Replaces the node click handler.
	fn on_node_click(&mut self, handler: NodeClickHandler);

	/// Drops every node and edge.
	fn clear(&mut self);

	/// Paints the current graph.
	fn draw(&mut self);
}

/// Resolves container identifiers, e.g. `document.getElementById`.
pub trait ContainerLookup {
	/// What a successful lookup returns.
	type Container;

	/// `None` when nothing carries `id`.
	fn find(&self, id: &str) -> Option<Self::Container>;
}

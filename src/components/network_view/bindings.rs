//! `NetworkView` for plain page scripts:
//!
//! ```js
//! const net = new NetworkView("network");
//! net.addNode("hap0", "hap0", 0, 20);
//! net.addNode("hap1", "hap1", 40, 0);
//! net.addEdge("hap0", "hap1", "e0");
//! net.onNodeClick((id) => net.selectNode(id));
//! net.draw();
//! ```

use log::warn;
use wasm_bindgen::prelude::*;

use super::adapter::NetworkView;
use super::canvas::{CanvasEngine, DomLookup};
use super::color;
use super::config::ViewConfig;
use super::types::{EdgeId, GraphLink, NodeId};

/// Script-facing wrapper around a canvas-backed view.
#[wasm_bindgen(js_name = NetworkView)]
pub struct JsNetworkView {
	inner: NetworkView<CanvasEngine>,
}

#[wasm_bindgen(js_class = NetworkView)]
impl JsNetworkView {
	/// Mounts on the element with id `container_id`; throws if it is missing.
	#[wasm_bindgen(constructor)]
	pub fn new(container_id: &str) -> Result<JsNetworkView, JsError> {
		let inner = NetworkView::mount(&DomLookup, container_id, ViewConfig::default())?;
		Ok(Self { inner })
	}

	/// Adds a node with a random green color.
	#[wasm_bindgen(js_name = addNode)]
	pub fn add_node(&mut self, id: &str, label: &str, x: f64, y: f64) {
		self.inner.add_node(id, label, x, y);
	}

	/// Adds an edge; endpoints are not checked.
	#[wasm_bindgen(js_name = addEdge)]
	pub fn add_edge(&mut self, from: &str, to: &str, label: &str) {
		self.inner.add_edge(from, to, label);
	}

	/// Adds an edge drawn with `weight` next to it.
	#[wasm_bindgen(js_name = addWeightedEdge)]
	pub fn add_weighted_edge(&mut self, from: &str, to: &str, label: &str, weight: f64) {
		self.inner.add_weighted_edge(from, to, label, weight);
	}

	/// Removes a node and its edges; throws for an unknown id.
	#[wasm_bindgen(js_name = removeNode)]
	pub fn remove_node(&mut self, id: &str) -> Result<(), JsError> {
		Ok(self.inner.remove_node(&NodeId::from(id))?)
	}

	/// Removes every edge added under `label`.
	#[wasm_bindgen(js_name = removeEdge)]
	pub fn remove_edge(&mut self, label: &str) -> Result<(), JsError> {
		Ok(self.inner.remove_edge(&EdgeId::from(label))?)
	}

	/// Replaces every edge with the links in `links`, a JSON array of
	/// `{source, target, label?, weight?}`.
	#[wasm_bindgen(js_name = filterEdges)]
	pub fn filter_edges(&mut self, links: &str) -> Result<(), JsError> {
		let links: Vec<GraphLink> = serde_json::from_str(links)?;
		self.inner.filter_edges(&links);
		Ok(())
	}

	/// `callback` gets the id of every node the user clicks.
	#[wasm_bindgen(js_name = onNodeClick)]
	pub fn on_node_click(&mut self, callback: js_sys::Function) {
		self.inner.on_node_click(move |id| {
			if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(id.as_str())) {
				warn!("node click callback threw: {e:?}");
			}
		});
	}

	/// Pins a node at `(x, y)`.
	#[wasm_bindgen(js_name = moveNode)]
	pub fn move_node(&mut self, id: &str, x: f64, y: f64) -> Result<(), JsError> {
		Ok(self.inner.move_node(&NodeId::from(id), x, y)?)
	}

	/// Selects a node and deselects the previous one.
	#[wasm_bindgen(js_name = selectNode)]
	pub fn select_node(&mut self, id: &str) -> Result<(), JsError> {
		Ok(self.inner.select_node(&NodeId::from(id))?)
	}

	/// Takes an array of node ids; returns the ones actually highlighted.
	#[wasm_bindgen(js_name = highlightNodes)]
	pub fn highlight_nodes(&mut self, ids: js_sys::Array) -> js_sys::Array {
		let ids: Vec<NodeId> = ids
			.iter()
			.filter_map(|v| v.as_string())
			.map(NodeId::from)
			.collect();
		self.inner
			.highlight_nodes(&ids)
			.iter()
			.map(|id| JsValue::from_str(id.as_str()))
			.collect()
	}

	/// Clears every highlight.
	#[wasm_bindgen(js_name = unhighlightAll)]
	pub fn unhighlight_all(&mut self) {
		self.inner.unhighlight_all();
	}

	/// Toggles node labels.
	#[wasm_bindgen(js_name = showLabels)]
	pub fn show_labels(&mut self, show: bool) {
		self.inner.show_labels(show);
	}

	/// Toggles edge weights.
	#[wasm_bindgen(js_name = showWeights)]
	pub fn show_weights(&mut self, show: bool) {
		self.inner.show_weights(show);
	}

	/// Drops every node and edge.
	pub fn clear(&mut self) {
		self.inner.clear();
	}

	/// Paints the current graph.
	pub fn draw(&mut self) {
		self.inner.draw();
	}
}

/// A random green as a CSS `rgb(..)` string.
#[wasm_bindgen(js_name = getRandomColor)]
pub fn get_random_color() -> String {
	color::random_color(&mut rand::thread_rng())
}

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};
use rand::Rng;
use rand::rngs::ThreadRng;

use super::color::random_color;
use super::config::ViewConfig;
use super::engine::{ContainerLookup, RenderEngine};
use super::error::ViewError;
use super::types::{Bounds, EdgeId, GraphData, GraphLink, Label, NodeAttributes, NodeId, NodeState};

const UNUSED_POSITION_ATTEMPTS: usize = 100;

#[derive(Clone, Debug)]
struct EdgeEntry<H> {
	handle: H,
	from: NodeId,
	to: NodeId,
}

/// A network view mounted on one container element.
///
/// Thin front for a [`RenderEngine`]: additions are forwarded as-is, new
/// nodes get a random green, and the handles the engine returns are kept
/// by identifier for the later removal, selection and highlight calls.
/// A label added twice keeps both engine edges under that label.
pub struct NetworkView<E: RenderEngine, R = ThreadRng> {
	engine: E,
	config: ViewConfig,
	rng: R,
	nodes: HashMap<NodeId, E::NodeHandle>,
	edges: HashMap<EdgeId, Vec<EdgeEntry<E::EdgeHandle>>>,
	selected: Option<NodeId>,
	highlighted: Vec<NodeId>,
}

impl<E: RenderEngine> NetworkView<E> {
	/// Looks up `container_id`, then initializes the engine on it.
	pub fn mount<L>(lookup: &L, container_id: &str, config: ViewConfig) -> Result<Self, ViewError>
	where
		L: ContainerLookup<Container = E::Container>,
	{
		Self::mount_with_rng(lookup, container_id, config, rand::thread_rng())
	}
}

impl<E: RenderEngine, R: Rng> NetworkView<E, R> {
	/// [`NetworkView::mount`] with a caller-supplied color and placement source.
	pub fn mount_with_rng<L>(
		lookup: &L,
		container_id: &str,
		config: ViewConfig,
		rng: R,
	) -> Result<Self, ViewError>
	where
		L: ContainerLookup<Container = E::Container>,
	{
		config.validate()?;
		let container = lookup
			.find(container_id)
			.ok_or_else(|| ViewError::ContainerNotFound(container_id.to_owned()))?;

		let mut engine = E::init(container)?;
		engine.drawing_properties(&config.drawing);
		engine.graph_properties(&config.graph);
		engine.draw();
		info!("network view mounted on #{container_id}");

		Ok(Self {
			engine,
			config,
			rng,
			nodes: HashMap::new(),
			edges: HashMap::new(),
			selected: None,
			highlighted: Vec::new(),
		})
	}

	/// Adds a node colored with a random green. Nothing is redrawn.
	pub fn add_node(&mut self, id: impl Into<NodeId>, label: impl Into<Label>, x: f64, y: f64) {
		let id = id.into();
		let attributes = NodeAttributes {
			label: label.into(),
			color: random_color(&mut self.rng),
			x,
			y,
			size: 1.0,
		};
		debug!("add node {id} at ({x}, {y}) colored {}", attributes.color);
		let handle = self.engine.add_node(&id, attributes);
		if self.nodes.insert(id.clone(), handle).is_some() {
			warn!("node {id} added twice; keeping the newest handle");
		}
	}

	/// Forwards `(label, from, to)` to the engine. Endpoints are not checked.
	pub fn add_edge(
		&mut self,
		from: impl Into<NodeId>,
		to: impl Into<NodeId>,
		label: impl Into<EdgeId>,
	) {
		let (from, to, label) = (from.into(), to.into(), label.into());
		debug!("add edge {label}: {from} -> {to}");
		let handle = self.engine.add_edge(&label, &from, &to);
		let entries = self.edges.entry(label).or_default();
		if !entries.is_empty() {
			debug!("edge label reused; {} edges now share it", entries.len() + 1);
		}
		entries.push(EdgeEntry { handle, from, to });
	}

	/// [`NetworkView::add_edge`], then sets the weight drawn next to it.
	pub fn add_weighted_edge(
		&mut self,
		from: impl Into<NodeId>,
		to: impl Into<NodeId>,
		label: impl Into<EdgeId>,
		weight: f64,
	) {
		let label = label.into();
		self.add_edge(from, to, label.clone());
		if let Some(entry) = self.edges.get(&label).and_then(|e| e.last()) {
			self.engine.set_edge_weight(&entry.handle, weight);
		}
	}

	fn add_link(&mut self, link: &GraphLink) {
		let label = link
			.label
			.clone()
			.unwrap_or_else(|| EdgeId::new(format!("{}-{}", link.source, link.target)));
		match link.weight {
			Some(weight) => {
				self.add_weighted_edge(link.source.clone(), link.target.clone(), label, weight)
			}
			None => self.add_edge(link.source.clone(), link.target.clone(), label),
		}
	}

	/// Adds every node and link of `data`. Nodes without a position are
	/// placed on a free spot inside `bounds`; unlabeled links get `from-to`.
	pub fn load(&mut self, data: &GraphData, bounds: Bounds) {
		for node in &data.nodes {
			let (x, y) = match (node.x, node.y) {
				(Some(x), Some(y)) => (x, y),
				_ => self.unused_position(bounds, 20.0),
			};
			let label = node
				.label
				.clone()
				.unwrap_or_else(|| Label::new(node.id.as_str()));
			self.add_node(node.id.clone(), label, x, y);
		}
		for link in &data.links {
			self.add_link(link);
		}
		info!(
			"loaded {} nodes, {} links",
			data.nodes.len(),
			data.links.len()
		);
	}

	/// Replaces every edge with `links`; nodes, the weight toggle and the
	/// rest of the drawing setup stay as they are.
	pub fn filter_edges<'a>(&mut self, links: impl IntoIterator<Item = &'a GraphLink>) {
		for entry in std::mem::take(&mut self.edges).into_values().flatten() {
			self.engine.remove_edge(&entry.handle);
		}
		self.engine.drawing_properties(&self.config.drawing);
		for link in links {
			self.add_link(link);
		}
		debug!("edges filtered down to {}", self.edge_count());
	}

	/// Paints the current graph.
	pub fn draw(&mut self) {
		self.engine.draw();
	}

	/// Called with the node id whenever the user clicks a node.
	pub fn on_node_click(&mut self, handler: impl FnMut(&NodeId) + 'static) {
		self.engine.on_node_click(Box::new(handler));
	}

	/// Removes the node and every registered edge touching it.
	pub fn remove_node(&mut self, id: &NodeId) -> Result<(), ViewError> {
		let handle = self
			.nodes
			.remove(id)
			.ok_or_else(|| ViewError::UnknownNode(id.clone()))?;
		let mut incident = Vec::new();
		self.edges.retain(|_, entries| {
			let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(entries)
				.into_iter()
				.partition(|e| &e.from == id || &e.to == id);
			incident.extend(gone);
			*entries = kept;
			!entries.is_empty()
		});
		for entry in incident {
			self.engine.remove_edge(&entry.handle);
		}
		self.engine.remove_node(&handle);
		if self.selected.as_ref() == Some(id) {
			self.selected = None;
		}
		self.highlighted.retain(|h| h != id);
		Ok(())
	}

	/// Removes every edge added under `label`.
	pub fn remove_edge(&mut self, label: &EdgeId) -> Result<(), ViewError> {
		let entries = self
			.edges
			.remove(label)
			.ok_or_else(|| ViewError::UnknownEdge(label.clone()))?;
		for entry in entries {
			self.engine.remove_edge(&entry.handle);
		}
		Ok(())
	}

	/// Pins the node at `(x, y)`.
	pub fn move_node(&mut self, id: &NodeId, x: f64, y: f64) -> Result<(), ViewError> {
		let handle = self
			.nodes
			.get(id)
			.ok_or_else(|| ViewError::UnknownNode(id.clone()))?;
		self.engine.move_node(handle, x, y);
		Ok(())
	}

	/// Current position; `None` for an unknown id.
	pub fn position_of(&self, id: &NodeId) -> Option<(f64, f64)> {
		self.nodes
			.get(id)
			.and_then(|h| self.engine.node_position(h))
	}

	/// Current position of every node, keyed by identifier.
	pub fn topology(&self) -> BTreeMap<NodeId, (f64, f64)> {
		self.nodes
			.iter()
			.filter_map(|(id, h)| Some((id.clone(), self.engine.node_position(h)?)))
			.collect()
	}

	/// Selects `id` and deselects the previous selection.
	pub fn select_node(&mut self, id: &NodeId) -> Result<(), ViewError> {
		if !self.nodes.contains_key(id) {
			return Err(ViewError::UnknownNode(id.clone()));
		}
		if let Some(previous) = self.selected.replace(id.clone()) {
			self.push_state(&previous);
		}
		self.push_state(id);
		Ok(())
	}

	/// The selected node, if any.
	pub fn selected(&self) -> Option<&NodeId> {
		self.selected.as_ref()
	}

	/// Highlights the known ids among `ids` and clears every other highlight.
	pub fn highlight_nodes<'a>(&mut self, ids: impl IntoIterator<Item = &'a NodeId>) -> &[NodeId] {
		let previous = std::mem::take(&mut self.highlighted);
		for id in ids {
			if self.nodes.contains_key(id) && !self.highlighted.contains(id) {
				self.highlighted.push(id.clone());
			}
		}
		let touched: Vec<NodeId> = previous
			.into_iter()
			.chain(self.highlighted.iter().cloned())
			.collect();
		for id in &touched {
			self.push_state(id);
		}
		&self.highlighted
	}

	/// Clears every highlight.
	pub fn unhighlight_all(&mut self) {
		for id in std::mem::take(&mut self.highlighted) {
			self.push_state(&id);
		}
	}

	/// Highlighted nodes, in the order they were asked for.
	pub fn highlighted(&self) -> &[NodeId] {
		&self.highlighted
	}

	/// Toggles node labels.
	pub fn show_labels(&mut self, show: bool) {
		self.config.drawing.show_labels = show;
		self.engine.drawing_properties(&self.config.drawing);
	}

	/// Toggles edge weights.
	pub fn show_weights(&mut self, show: bool) {
		self.config.drawing.show_edge_weights = show;
		self.engine.drawing_properties(&self.config.drawing);
	}

	/// A random point in `bounds` at least `clearance` away from every node,
	/// or the last point tried once the attempts run out. Inverted bounds
	/// are flipped and non-finite sides read as 0.
	pub fn unused_position(&mut self, bounds: Bounds, clearance: f64) -> (f64, f64) {
		let bounds = bounds.normalized();
		let taken: Vec<(f64, f64)> = self.topology().into_values().collect();
		let mut point = (bounds.min_x, bounds.min_y);
		for _ in 0..UNUSED_POSITION_ATTEMPTS {
			point = (
				self.rng.gen_range(bounds.min_x..=bounds.max_x),
				self.rng.gen_range(bounds.min_y..=bounds.max_y),
			);
			let free = taken.iter().all(|&(x, y)| {
				let (dx, dy) = (x - point.0, y - point.1);
				(dx * dx + dy * dy).sqrt() >= clearance
			});
			if free {
				break;
			}
		}
		point
	}

	/// Drops every node and edge; the drawing setup stays.
	pub fn clear(&mut self) {
		self.engine.clear();
		self.nodes.clear();
		self.edges.clear();
		self.selected = None;
		self.highlighted.clear();
	}

	/// Config as last applied, toggles included.
	pub fn config(&self) -> &ViewConfig {
		&self.config
	}

	/// The engine the view drives.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// Engine handle registered for `id`.
	pub fn node_handle(&self, id: &NodeId) -> Option<&E::NodeHandle> {
		self.nodes.get(id)
	}

	/// Registered nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Registered edges, counting each repeat of a label.
	pub fn edge_count(&self) -> usize {
		self.edges.values().map(Vec::len).sum()
	}

	fn push_state(&mut self, id: &NodeId) {
		let state = NodeState {
			selected: self.selected.as_ref() == Some(id),
			highlighted: self.highlighted.contains(id),
		};
		if let Some(handle) = self.nodes.get(id) {
			self.engine.set_node_state(handle, state);
		}
	}
}

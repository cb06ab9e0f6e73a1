use std::collections::{BTreeMap, HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::warn;

use super::config::{DrawingProperties, GraphProperties};
use super::types::{EdgeId, Label, NodeAttributes, NodeId, NodeState};

/// Extra hit slack around a node, in screen pixels.
pub const HIT_SLACK: f64 = 4.0;
/// Pointer travel, in screen pixels, below which a press and release is a click.
pub const CLICK_SLOP: f64 = 3.0;
const FIT_PADDING: f64 = 40.0;

/// Engine-side node handle. Stable across layout rebuilds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(u32);

/// Engine-side edge handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(u32);

#[derive(Clone, Debug)]
pub struct SceneNode {
	pub id: NodeId,
	pub label: Label,
	pub color: String,
	pub size: f64,
	pub state: NodeState,
	physics: DefaultNodeIdx,
}

#[derive(Clone, Debug)]
pub struct SceneEdge {
	pub label: EdgeId,
	pub from: NodeId,
	pub to: NodeId,
	pub weight: Option<f64>,
	linked: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeKey>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeKey>,
	pub neighbors: HashSet<NodeKey>,
	pub highlight_t: f64,
	pub prev_node: Option<NodeKey>,
	pub prev_neighbors: HashSet<NodeKey>,
	delay_t: f64,
}

/// A node as the renderer sees it for one frame.
#[derive(Clone, Debug)]
pub struct PlacedNode<'a> {
	pub key: NodeKey,
	pub node: &'a SceneNode,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

fn simulation() -> ForceGraph<NodeKey, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

/// Nodes, edges and layout behind a canvas engine, plus the pointer state
/// driving pan, zoom, drag and hover.
pub struct SceneState {
	pub graph: ForceGraph<NodeKey, ()>,
	pub drawing: DrawingProperties,
	pub graph_props: GraphProperties,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	nodes: BTreeMap<NodeKey, SceneNode>,
	edges: BTreeMap<EdgeKey, SceneEdge>,
	by_id: HashMap<NodeId, NodeKey>,
	next_key: u32,
}

impl SceneState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: simulation(),
			drawing: DrawingProperties::default(),
			graph_props: GraphProperties::default(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			nodes: BTreeMap::new(),
			edges: BTreeMap::new(),
			by_id: HashMap::new(),
			next_key: 0,
		}
	}

	fn next_key(&mut self) -> u32 {
		self.next_key += 1;
		self.next_key
	}

	/// A second node with a known id replaces its attributes and keeps its place.
	pub fn add_node(&mut self, id: &NodeId, attrs: NodeAttributes) -> NodeKey {
		if let Some(&key) = self.by_id.get(id) {
			warn!("node {id} already drawn; replacing its attributes");
			if let Some(node) = self.nodes.get_mut(&key) {
				node.label = attrs.label;
				node.color = attrs.color;
				node.size = attrs.size;
			}
			return key;
		}

		let key = NodeKey(self.next_key());
		let physics = self.graph.add_node(NodeData {
			x: attrs.x as f32,
			y: attrs.y as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: key,
		});
		self.nodes.insert(
			key,
			SceneNode {
				id: id.clone(),
				label: attrs.label,
				color: attrs.color,
				size: attrs.size,
				state: NodeState::default(),
				physics,
			},
		);
		self.by_id.insert(id.clone(), key);
		self.link_pending();
		key
	}

	pub fn add_edge(&mut self, label: &EdgeId, from: &NodeId, to: &NodeId) -> EdgeKey {
		let key = EdgeKey(self.next_key());
		self.edges.insert(
			key,
			SceneEdge {
				label: label.clone(),
				from: from.clone(),
				to: to.clone(),
				weight: None,
				linked: false,
			},
		);
		self.link_pending();
		key
	}

	pub fn set_edge_weight(&mut self, key: EdgeKey, weight: f64) {
		if let Some(edge) = self.edges.get_mut(&key) {
			edge.weight = Some(weight);
		}
	}

	/// Drops the node together with every edge touching it.
	pub fn remove_node(&mut self, key: NodeKey) {
		let Some(node) = self.nodes.remove(&key) else {
			return;
		};
		self.by_id.remove(&node.id);
		self.edges
			.retain(|_, e| e.from != node.id && e.to != node.id);
		self.forget_pointer(key);
		self.rebuild();
	}

	pub fn remove_edge(&mut self, key: EdgeKey) {
		if self.edges.remove(&key).is_some() {
			self.rebuild();
		}
	}

	pub fn move_node(&mut self, key: NodeKey, x: f64, y: f64) {
		let Some(idx) = self.nodes.get(&key).map(|n| n.physics) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn node_position(&self, key: NodeKey) -> Option<(f64, f64)> {
		let idx = self.nodes.get(&key)?.physics;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn set_node_state(&mut self, key: NodeKey, state: NodeState) {
		if let Some(node) = self.nodes.get_mut(&key) {
			node.state = state;
		}
	}

	pub fn clear(&mut self) {
		self.graph = simulation();
		self.nodes.clear();
		self.edges.clear();
		self.by_id.clear();
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();
	}

	pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
		self.nodes.get(&key)
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edges(&self) -> impl Iterator<Item = &SceneEdge> {
		self.edges.values()
	}

	/// Every node with its current position and on-screen radius (graph units).
	pub fn placed_nodes(&self) -> Vec<PlacedNode<'_>> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.data.user_data, (node.x() as f64, node.y() as f64));
		});
		let range = self.size_range();
		self.nodes
			.iter()
			.filter_map(|(&key, node)| {
				let &(x, y) = positions.get(&key)?;
				Some(PlacedNode {
					key,
					node,
					x,
					y,
					radius: self.radius_for(node.size, range),
				})
			})
			.collect()
	}

	fn size_range(&self) -> (f64, f64) {
		self.nodes
			.values()
			.fold(None, |acc: Option<(f64, f64)>, n| match acc {
				None => Some((n.size, n.size)),
				Some((lo, hi)) => Some((lo.min(n.size), hi.max(n.size))),
			})
			.unwrap_or((1.0, 1.0))
	}

	/// Maps a node size linearly into `[min_node_size, max_node_size]`.
	/// Equal sizes all get `max_node_size`.
	fn radius_for(&self, size: f64, (lo, hi): (f64, f64)) -> f64 {
		let (min, max) = (self.graph_props.min_node_size, self.graph_props.max_node_size);
		if hi - lo < f64::EPSILON {
			return max;
		}
		min + (size - lo) / (hi - lo) * (max - min)
	}

	fn link_pending(&mut self) {
		for edge in self.edges.values_mut().filter(|e| !e.linked) {
			let endpoints = self
				.by_id
				.get(&edge.from)
				.zip(self.by_id.get(&edge.to))
				.and_then(|(a, b)| Some((self.nodes.get(a)?.physics, self.nodes.get(b)?.physics)));
			if let Some((src, tgt)) = endpoints {
				// self loops carry no spring
				if src != tgt {
					self.graph.add_edge(src, tgt, EdgeData::default());
				}
				edge.linked = true;
			}
		}
	}

	/// Recreates the simulation from the scene records, keeping positions.
	fn rebuild(&mut self) {
		let mut kept = HashMap::new();
		self.graph.visit_nodes(|node| {
			kept.insert(
				node.data.user_data,
				(node.data.x, node.data.y, node.data.is_anchor),
			);
		});

		self.graph = simulation();
		for (&key, node) in self.nodes.iter_mut() {
			let (x, y, is_anchor) = kept.get(&key).copied().unwrap_or_default();
			node.physics = self.graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: key,
			});
		}
		for edge in self.edges.values_mut() {
			edge.linked = false;
		}
		self.link_pending();
		let hovered = self.hover.node;
		self.hover = HoverState::default();
		self.set_hover(hovered);
	}

	fn forget_pointer(&mut self, key: NodeKey) {
		if self.drag.node == Some(key) {
			self.drag = DragState::default();
		}
		if self.hover.node == Some(key) || self.hover.prev_node == Some(key) {
			self.hover = HoverState::default();
		}
	}

	/// Zooms and centers so every node fits inside the canvas.
	pub fn fit_to_view(&mut self) {
		let placed = self.placed_nodes();
		let Some(first) = placed.first() else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};
		let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
		for p in &placed {
			min_x = min_x.min(p.x - p.radius);
			min_y = min_y.min(p.y - p.radius);
			max_x = max_x.max(p.x + p.radius);
			max_y = max_y.max(p.y + p.radius);
		}
		let (span_x, span_y) = ((max_x - min_x).max(1e-9), (max_y - min_y).max(1e-9));
		let avail_x = (self.width - 2.0 * FIT_PADDING).max(1.0);
		let avail_y = (self.height - 2.0 * FIT_PADDING).max(1.0);
		let k = (avail_x / span_x).min(avail_y / span_y).clamp(0.1, 10.0);
		let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeKey> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let slack = HIT_SLACK / self.transform.k;
		self.placed_nodes()
			.into_iter()
			.filter(|p| {
				let (dx, dy) = (p.x - gx, p.y - gy);
				(dx * dx + dy * dy).sqrt() < p.radius + slack
			})
			.last()
			.map(|p| p.key)
	}

	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(key) = self.node_at_position(x, y) {
			let (nx, ny) = self.node_position(key).unwrap_or_default();
			self.drag = DragState {
				active: true,
				node: Some(key),
				start_x: x,
				start_y: y,
				node_start_x: nx as f32,
				node_start_y: ny as f32,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			if let Some(key) = self.drag.node {
				let (dx, dy) = (
					(x - self.drag.start_x) / self.transform.k,
					(y - self.drag.start_y) / self.transform.k,
				);
				self.move_node(
					key,
					self.drag.node_start_x as f64 + dx,
					self.drag.node_start_y as f64 + dy,
				);
			}
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Ends a drag or pan. Returns the node when the press started on it
	/// and the pointer barely moved.
	pub fn pointer_up(&mut self, x: f64, y: f64) -> Option<NodeKey> {
		let clicked = self.drag.node.filter(|_| {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			self.drag.active && (dx * dx + dy * dy).sqrt() <= CLICK_SLOP
		});
		self.release();
		clicked.filter(|key| self.nodes.contains_key(key))
	}

	pub fn pointer_leave(&mut self) {
		self.release();
		self.set_hover(None);
	}

	fn release(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	/// Zooms around the cursor; positive `delta` zooms out.
	pub fn wheel(&mut self, x: f64, y: f64, delta: f64) {
		let factor = if delta > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn set_hover(&mut self, node: Option<NodeKey>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// keep the old set around while it fades out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(key) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			let Some(id) = self.nodes.get(&key).map(|n| n.id.clone()) else {
				return;
			};
			for edge in self.edges.values() {
				let other = if edge.from == id {
					&edge.to
				} else if edge.to == id {
					&edge.from
				} else {
					continue;
				};
				if let Some(&k) = self.by_id.get(other) {
					self.hover.neighbors.insert(k);
				}
			}
		}
	}

	pub fn is_highlighted(&self, key: NodeKey) -> bool {
		self.hover.node == Some(key)
			|| self.hover.neighbors.contains(&key)
			|| self.hover.prev_node == Some(key)
			|| self.hover.prev_neighbors.contains(&key)
	}

	pub fn is_hovered(&self, key: NodeKey) -> bool {
		self.hover.node == Some(key) || self.hover.prev_node == Some(key)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn attrs(label: &str, x: f64, y: f64) -> NodeAttributes {
		NodeAttributes {
			label: Label::from(label),
			color: "rgb(32,79,25)".into(),
			x,
			y,
			size: 1.0,
		}
	}

	fn scene_with(nodes: &[(&str, f64, f64)]) -> (SceneState, Vec<NodeKey>) {
		let mut scene = SceneState::new(800.0, 600.0);
		let keys = nodes
			.iter()
			.map(|&(id, x, y)| scene.add_node(&NodeId::from(id), attrs(id, x, y)))
			.collect();
		(scene, keys)
	}

	fn linked_edges(scene: &SceneState) -> usize {
		scene.edges().filter(|e| e.linked).count()
	}

	#[test]
	fn nodes_keep_their_position_until_the_layout_ticks() {
		let (scene, keys) = scene_with(&[("a", 10.0, 20.0)]);
		assert_eq!(scene.node_position(keys[0]), Some((10.0, 20.0)));
	}

	#[test]
	fn duplicate_node_reuses_key_and_replaces_attributes() {
		let (mut scene, keys) = scene_with(&[("a", 0.0, 0.0)]);
		let again = scene.add_node(&NodeId::from("a"), attrs("renamed", 5.0, 5.0));
		assert_eq!(again, keys[0]);
		assert_eq!(scene.node_count(), 1);
		assert_eq!(scene.node(again).unwrap().label, Label::from("renamed"));
		assert_eq!(scene.node_position(again), Some((0.0, 0.0)));
	}

	#[test]
	fn edge_to_unknown_node_links_once_it_arrives() {
		let (mut scene, _) = scene_with(&[("a", 0.0, 0.0)]);
		scene.add_edge(&EdgeId::from("ab"), &NodeId::from("a"), &NodeId::from("b"));
		assert_eq!(linked_edges(&scene), 0);
		scene.add_node(&NodeId::from("b"), attrs("b", 50.0, 0.0));
		assert_eq!(linked_edges(&scene), 1);
	}

	#[test]
	fn removing_a_node_drops_its_edges_and_keeps_other_positions() {
		let (mut scene, keys) = scene_with(&[("a", 0.0, 0.0), ("b", 30.0, 0.0), ("c", 60.0, 0.0)]);
		scene.add_edge(&EdgeId::from("ab"), &NodeId::from("a"), &NodeId::from("b"));
		scene.add_edge(&EdgeId::from("bc"), &NodeId::from("b"), &NodeId::from("c"));

		scene.remove_node(keys[0]);
		assert_eq!(scene.node_count(), 2);
		assert_eq!(scene.edges().count(), 1);
		assert_eq!(linked_edges(&scene), 1);
		assert_eq!(scene.node_position(keys[2]), Some((60.0, 0.0)));
		assert_eq!(scene.node_position(keys[0]), None);
	}

	#[test]
	fn moved_nodes_are_anchored() {
		let (mut scene, keys) = scene_with(&[("a", 0.0, 0.0)]);
		scene.move_node(keys[0], -4.0, 8.0);
		assert_eq!(scene.node_position(keys[0]), Some((-4.0, 8.0)));
		scene.tick(0.016);
		assert_eq!(scene.node_position(keys[0]), Some((-4.0, 8.0)));
	}

	#[test]
	fn equal_sizes_draw_at_max_radius() {
		let (scene, _) = scene_with(&[("a", 0.0, 0.0), ("b", 1.0, 1.0)]);
		for placed in scene.placed_nodes() {
			assert_eq!(placed.radius, scene.graph_props.max_node_size);
		}
	}

	#[test]
	fn sizes_map_into_configured_bounds() {
		let mut scene = SceneState::new(800.0, 600.0);
		let mut small = attrs("s", 0.0, 0.0);
		small.size = 1.0;
		let mut big = attrs("b", 10.0, 0.0);
		big.size = 3.0;
		let s = scene.add_node(&NodeId::from("s"), small);
		let b = scene.add_node(&NodeId::from("b"), big);
		let radius = |key: NodeKey| {
			scene
				.placed_nodes()
				.into_iter()
				.find(|p| p.key == key)
				.map(|p| p.radius)
		};
		assert_eq!(radius(s), Some(2.0));
		assert_eq!(radius(b), Some(8.0));
	}

	#[test]
	fn fit_to_view_centers_the_graph() {
		let (mut scene, _) = scene_with(&[("a", 0.5, 0.5), ("b", 0.75, 0.25)]);
		scene.fit_to_view();
		let (gx, gy) = scene.screen_to_graph(scene.width / 2.0, scene.height / 2.0);
		assert!((gx - 0.625).abs() < 1e-6);
		assert!((gy - 0.375).abs() < 1e-6);
	}

	#[test]
	fn hit_test_and_hover_neighbors() {
		let (mut scene, keys) = scene_with(&[("a", 0.0, 0.0), ("b", 100.0, 0.0), ("c", 200.0, 0.0)]);
		scene.add_edge(&EdgeId::from("ab"), &NodeId::from("a"), &NodeId::from("b"));
		// identity transform shifted to the canvas center
		let (cx, cy) = (scene.transform.x, scene.transform.y);

		assert_eq!(scene.node_at_position(cx + 1.0, cy), Some(keys[0]));
		assert_eq!(scene.node_at_position(cx + 50.0, cy), None);

		scene.pointer_move(cx, cy);
		assert!(scene.is_hovered(keys[0]));
		assert!(scene.is_highlighted(keys[1]));
		assert!(!scene.is_highlighted(keys[2]));

		scene.pointer_leave();
		assert_eq!(scene.hover.node, None);
		assert_eq!(scene.hover.prev_node, Some(keys[0]));
	}

	#[test]
	fn dragging_moves_the_node_by_the_pointer_delta() {
		let (mut scene, keys) = scene_with(&[("a", 0.0, 0.0)]);
		let (cx, cy) = (scene.transform.x, scene.transform.y);
		scene.pointer_down(cx, cy);
		scene.pointer_move(cx + 15.0, cy - 5.0);
		assert_eq!(scene.pointer_up(cx + 15.0, cy - 5.0), None);
		assert_eq!(scene.node_position(keys[0]), Some((15.0, -5.0)));
		assert!(!scene.drag.active);
	}

	#[test]
	fn press_and_release_on_a_node_is_a_click() {
		let (mut scene, keys) = scene_with(&[("a", 0.0, 0.0), ("b", 100.0, 0.0)]);
		let (cx, cy) = (scene.transform.x, scene.transform.y);

		scene.pointer_down(cx + 100.0, cy);
		assert_eq!(scene.pointer_up(cx + 101.0, cy + 1.0), Some(keys[1]));

		// background presses and presses cut short by leaving are not clicks
		scene.pointer_down(cx + 50.0, cy);
		assert_eq!(scene.pointer_up(cx + 50.0, cy), None);
		scene.pointer_down(cx, cy);
		scene.pointer_leave();
		assert_eq!(scene.pointer_up(cx, cy), None);
	}

	#[test]
	fn a_click_on_a_node_removed_mid_press_is_dropped() {
		let (mut scene, keys) = scene_with(&[("a", 0.0, 0.0)]);
		let (cx, cy) = (scene.transform.x, scene.transform.y);
		scene.pointer_down(cx, cy);
		scene.remove_node(keys[0]);
		assert_eq!(scene.pointer_up(cx, cy), None);
	}

	#[test]
	fn dragging_the_background_pans() {
		let (mut scene, _) = scene_with(&[]);
		let start = scene.transform.clone();
		scene.pointer_down(10.0, 10.0);
		scene.pointer_move(30.0, 5.0);
		assert_eq!(scene.transform.x, start.x + 20.0);
		assert_eq!(scene.transform.y, start.y - 5.0);
	}

	#[test]
	fn wheel_zoom_keeps_the_cursor_point_fixed() {
		let (mut scene, _) = scene_with(&[]);
		let before = scene.screen_to_graph(120.0, 80.0);
		scene.wheel(120.0, 80.0, -1.0);
		let after = scene.screen_to_graph(120.0, 80.0);
		assert!((scene.transform.k - 1.1).abs() < 1e-9);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn clear_empties_the_scene() {
		let (mut scene, _) = scene_with(&[("a", 0.0, 0.0)]);
		scene.add_edge(&EdgeId::from("aa"), &NodeId::from("a"), &NodeId::from("a"));
		scene.clear();
		assert_eq!(scene.node_count(), 0);
		assert_eq!(scene.edges().count(), 0);
	}
}

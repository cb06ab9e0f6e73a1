use std::borrow::Borrow;
use std::fmt;

use serde::Deserialize;

macro_rules! string_newtype {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Wraps `value`.
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			/// The wrapped string.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(value: &str) -> Self {
				Self(value.to_owned())
			}
		}

		impl From<String> for $name {
			fn from(value: String) -> Self {
				Self(value)
			}
		}

		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
	};
}

string_newtype!(
	/// Key of a node in the view. Never shown to the user.
	NodeId
);
string_newtype!(
	/// Text drawn next to a node.
	Label
);
string_newtype!(
	/// Key of an edge; the edge label doubles as its identifier.
	EdgeId
);

/// Everything the engine needs to draw a new node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeAttributes {
	/// Text drawn next to the node.
	pub label: Label,
	/// CSS color.
	pub color: String,
	/// Initial position, graph units.
	pub x: f64,
	/// Initial position, graph units.
	pub y: f64,
	/// Relative size; the engine maps it into its radius range.
	pub size: f64,
}

/// Per-node display flags set by selection and highlighting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeState {
	/// Drawn with a label box and outline.
	pub selected: bool,
	/// Drawn with a ring.
	pub highlighted: bool,
}

/// Axis-aligned area in graph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Left edge.
	pub min_x: f64,
	/// Top edge.
	pub min_y: f64,
	/// Right edge.
	pub max_x: f64,
	/// Bottom edge.
	pub max_y: f64,
}

impl Bounds {
	/// `width` by `height`, centered on the origin.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			min_x: -width / 2.0,
			min_y: -height / 2.0,
			max_x: width / 2.0,
			max_y: height / 2.0,
		}
	}

	/// Inclusive on every side.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
	}

	/// Same area with each min below its max. Non-finite sides collapse to 0.
	pub fn normalized(self) -> Self {
		let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
		let (x0, x1) = (finite(self.min_x), finite(self.max_x));
		let (y0, y1) = (finite(self.min_y), finite(self.max_y));
		Self {
			min_x: x0.min(x1),
			min_y: y0.min(y1),
			max_x: x0.max(x1),
			max_y: y0.max(y1),
		}
	}
}

/// A node of [`GraphData`]. Missing coordinates mean "find a free spot".
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Node key.
	pub id: NodeId,
	/// Defaults to the id.
	pub label: Option<Label>,
	/// Horizontal position.
	pub x: Option<f64>,
	/// Vertical position.
	pub y: Option<f64>,
}

/// An edge of [`GraphData`]. Unlabeled links are named `source-target`.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// `from` node.
	pub source: NodeId,
	/// `to` node.
	pub target: NodeId,
	/// Edge label, also its key.
	pub label: Option<EdgeId>,
	/// Printed next to the edge.
	pub weight: Option<f64>,
}

/// Serialized graph fed to [`NetworkView::load`](super::NetworkView::load).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// Added first, in order.
	pub nodes: Vec<GraphNode>,
	/// Added after every node.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn graph_data_parses_with_optional_fields() {
		let json = r#"{
			"nodes": [{"id": "hap0", "label": "Hap 0", "x": 10, "y": -5}, {"id": "hap1"}],
			"links": [{"source": "hap0", "target": "hap1", "weight": 555}]
		}"#;
		let data: GraphData = serde_json::from_str(json).unwrap();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].label, Some(Label::from("Hap 0")));
		assert_eq!(data.nodes[1].x, None);
		assert_eq!(data.links[0].weight, Some(555.0));
		assert_eq!(data.links[0].label, None);
	}

	#[test]
	fn links_default_to_empty() {
		let data: GraphData = serde_json::from_str(r#"{"nodes": []}"#).unwrap();
		assert!(data.links.is_empty());
	}

	#[test]
	fn bounds_are_inclusive() {
		let b = Bounds::centered(600.0, 300.0);
		assert!(b.contains(300.0, -150.0));
		assert!(!b.contains(300.1, 0.0));
	}

	#[test]
	fn normalized_bounds_are_ordered_and_finite() {
		let inverted = Bounds {
			min_x: 10.0,
			min_y: 5.0,
			max_x: -10.0,
			max_y: -5.0,
		};
		assert_eq!(
			inverted.normalized(),
			Bounds {
				min_x: -10.0,
				min_y: -5.0,
				max_x: 10.0,
				max_y: 5.0,
			}
		);

		let broken = Bounds {
			min_x: f64::NAN,
			min_y: f64::NEG_INFINITY,
			max_x: 4.0,
			max_y: f64::INFINITY,
		};
		assert_eq!(
			broken.normalized(),
			Bounds {
				min_x: 0.0,
				min_y: 0.0,
				max_x: 4.0,
				max_y: 0.0,
			}
		);
	}
}

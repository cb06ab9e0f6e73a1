//! Style options handed to the engine at mount time.

use super::error::ViewError;

/// How edges pick their stroke color.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeColorMode {
	/// Color of the `from` node.
	Source,
	/// Color of the `to` node.
	Target,
	/// One CSS color for every edge.
	Fixed(String),
}

/// Edge shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeCurve {
	/// Straight segment.
	Line,
	/// Quadratic curve bending left of the chord.
	Curve,
	/// Straight segment with a head at `to`.
	Arrow,
}

/// Look of the canvas, its labels and edges.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingProperties {
	/// Canvas fill.
	pub background_color: String,
	/// Corner radius of the label boxes around hovered and selected nodes.
	pub corner_radius: f64,
	/// Node label and edge weight text.
	pub label_color: String,
	/// CSS font family.
	pub font: String,
	/// In screen pixels at zoom 1.
	pub font_size: f64,
	/// Edge stroke color.
	pub edge_color: EdgeColorMode,
	/// Edge shape.
	pub edge_curve: EdgeCurve,
	/// Draw node labels.
	pub show_labels: bool,
	/// Draw edge weights.
	pub show_edge_weights: bool,
}

impl Default for DrawingProperties {
	fn default() -> Self {
		Self {
			background_color: "#222".into(),
			corner_radius: 4.0,
			label_color: "#fff".into(),
			font: "sans-serif".into(),
			font_size: 11.0,
			edge_color: EdgeColorMode::Source,
			edge_curve: EdgeCurve::Curve,
			show_labels: true,
			show_edge_weights: true,
		}
	}
}

/// Node sizing and viewport fitting.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphProperties {
	/// Radius of the smallest node, in graph units.
	pub min_node_size: f64,
	/// Radius of the largest node, in graph units.
	pub max_node_size: f64,
	/// Fit every node into the viewport on each draw.
	pub auto_rescale: bool,
}

impl Default for GraphProperties {
	fn default() -> Self {
		Self {
			min_node_size: 2.0,
			max_node_size: 8.0,
			auto_rescale: true,
		}
	}
}

/// Everything applied to the engine when a view is mounted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewConfig {
	/// Colors, fonts, visibility toggles.
	pub drawing: DrawingProperties,
	/// Node sizes and rescaling.
	pub graph: GraphProperties,
}

impl ViewConfig {
	/// Rejects colors, fonts and sizes the canvas cannot use.
	pub fn validate(&self) -> Result<(), ViewError> {
		let d = &self.drawing;
		check_color("background_color", &d.background_color)?;
		check_color("label_color", &d.label_color)?;
		if let EdgeColorMode::Fixed(color) = &d.edge_color {
			check_color("edge_color", color)?;
		}
		if d.font.trim().is_empty() {
			return Err(invalid("font", "must not be empty"));
		}
		if !(d.font_size.is_finite() && d.font_size > 0.0) {
			return Err(invalid("font_size", format!("must be positive, got {}", d.font_size)));
		}
		if !(d.corner_radius.is_finite() && d.corner_radius >= 0.0) {
			return Err(invalid(
				"corner_radius",
				format!("must not be negative, got {}", d.corner_radius),
			));
		}

		let g = &self.graph;
		if !(g.min_node_size.is_finite() && g.min_node_size > 0.0) {
			return Err(invalid(
				"min_node_size",
				format!("must be positive, got {}", g.min_node_size),
			));
		}
		if !g.max_node_size.is_finite() || g.max_node_size < g.min_node_size {
			return Err(invalid(
				"max_node_size",
				format!("must be at least min_node_size ({})", g.min_node_size),
			));
		}
		Ok(())
	}
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ViewError {
	ViewError::InvalidConfig {
		field,
		reason: reason.into(),
	}
}

/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` and bare color names.
fn check_color(field: &'static str, value: &str) -> Result<(), ViewError> {
	let ok = if let Some(hex) = value.strip_prefix('#') {
		matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
	} else if let Some(args) = value
		.strip_prefix("rgba(")
		.or_else(|| value.strip_prefix("rgb("))
		.and_then(|rest| rest.strip_suffix(')'))
	{
		let parts: Vec<&str> = args.split(',').map(str::trim).collect();
		matches!(parts.len(), 3 | 4) && parts.iter().all(|p| p.parse::<f64>().is_ok())
	} else {
		!value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
	};
	if ok {
		Ok(())
	} else {
		Err(invalid(field, format!("`{value}` is not a CSS color")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rejected_field(config: &ViewConfig) -> &'static str {
		match config.validate() {
			Err(ViewError::InvalidConfig { field, .. }) => field,
			other => panic!("expected InvalidConfig, got {other:?}"),
		}
	}

	#[test]
	fn default_config_is_valid() {
		ViewConfig::default().validate().unwrap();
	}

	#[test]
	fn accepts_common_color_forms() {
		for color in ["#222", "#a0b1c2", "rgb(1,2,3)", "rgba(1, 2, 3, 0.5)", "white"] {
			check_color("c", color).unwrap_or_else(|e| panic!("`{color}` rejected: {e}"));
		}
	}

	#[test]
	fn rejects_bad_colors() {
		let mut config = ViewConfig::default();
		config.drawing.background_color = "#12".into();
		assert_eq!(rejected_field(&config), "background_color");

		let mut config = ViewConfig::default();
		config.drawing.edge_color = EdgeColorMode::Fixed("rgb(1,2)".into());
		assert_eq!(rejected_field(&config), "edge_color");
	}

	#[test]
	fn rejects_inverted_node_sizes() {
		let mut config = ViewConfig::default();
		config.graph.min_node_size = 10.0;
		config.graph.max_node_size = 4.0;
		assert_eq!(rejected_field(&config), "max_node_size");
	}

	#[test]
	fn rejects_non_positive_font_size_and_empty_font() {
		let mut config = ViewConfig::default();
		config.drawing.font_size = 0.0;
		assert_eq!(rejected_field(&config), "font_size");

		let mut config = ViewConfig::default();
		config.drawing.font = "  ".into();
		assert_eq!(rejected_field(&config), "font");
	}

	#[test]
	fn rejects_negative_corner_radius() {
		let mut config = ViewConfig::default();
		config.drawing.corner_radius = -1.0;
		assert_eq!(rejected_field(&config), "corner_radius");
	}
}

use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::{EdgeColorMode, EdgeCurve};
use super::state::{NodeKey, PlacedNode, SceneState};
use super::types::NodeId;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &SceneState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.drawing.background_color);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let placed = state.placed_nodes();
	let by_id: HashMap<&NodeId, &PlacedNode> = placed.iter().map(|p| (&p.node.id, p)).collect();
	draw_edges(state, ctx, &by_id);
	draw_nodes(state, ctx, &placed);
	ctx.restore();
}

fn draw_edges(
	state: &SceneState,
	ctx: &CanvasRenderingContext2d,
	by_id: &HashMap<&NodeId, &PlacedNode>,
) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (1.5 / k, 8.0 / k);
	let t = ease_out_cubic(state.hover.highlight_t);
	let drawing = &state.drawing;

	for edge in state.edges() {
		let (Some(a), Some(b)) = (by_id.get(&edge.from), by_id.get(&edge.to)) else {
			continue;
		};
		let (dx, dy) = (b.x - a.x, b.y - a.y);
		let dist = (dx * dx + dy * dy).sqrt();
		let self_loop = a.key == b.key;
		if dist < 0.001 && !self_loop {
			continue;
		}

		// t=0: every edge at base alpha; t=1: hovered neighborhood up, rest down
		let is_highlighted = state.is_highlighted(a.key) && state.is_highlighted(b.key);
		let (alpha, width) = if is_highlighted {
			(0.6 + 0.4 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};
		let color = match &drawing.edge_color {
			EdgeColorMode::Source => a.node.color.as_str(),
			EdgeColorMode::Target => b.node.color.as_str(),
			EdgeColorMode::Fixed(color) => color.as_str(),
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(color);
		ctx.set_fill_style_str(color);
		ctx.set_line_width(width);

		let (mid_x, mid_y) = if self_loop {
			let (lx, ly, lr) = loop_circle(a.x, a.y, a.radius, k);
			ctx.begin_path();
			let _ = ctx.arc(lx, ly, lr, 0.0, 2.0 * PI);
			ctx.stroke();
			(lx, ly - lr)
		} else {
			let (ux, uy) = (dx / dist, dy / dist);
			let (sx, sy) = (a.x + ux * a.radius, a.y + uy * a.radius);
			let (ex, ey) = (b.x - ux * b.radius, b.y - uy * b.radius);
			match drawing.edge_curve {
				EdgeCurve::Line => {
					ctx.begin_path();
					ctx.move_to(sx, sy);
					ctx.line_to(ex, ey);
					ctx.stroke();
					((sx + ex) / 2.0, (sy + ey) / 2.0)
				}
				EdgeCurve::Curve => {
					// control point off to the left of the chord
					let (cx, cy) = ((a.x + b.x) / 2.0 - uy * dist * 0.2, (a.y + b.y) / 2.0 + ux * dist * 0.2);
					ctx.begin_path();
					ctx.move_to(sx, sy);
					ctx.quadratic_curve_to(cx, cy, ex, ey);
					ctx.stroke();
					(
						0.25 * sx + 0.5 * cx + 0.25 * ex,
						0.25 * sy + 0.5 * cy + 0.25 * ey,
					)
				}
				EdgeCurve::Arrow => {
					ctx.begin_path();
					ctx.move_to(sx, sy);
					ctx.line_to(ex - ux * arrow_size, ey - uy * arrow_size);
					ctx.stroke();

					let (back_x, back_y) = (ex - ux * arrow_size, ey - uy * arrow_size);
					let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
					ctx.begin_path();
					ctx.move_to(ex, ey);
					ctx.line_to(back_x + px, back_y + py);
					ctx.line_to(back_x - px, back_y - py);
					ctx.close_path();
					ctx.fill();
					((sx + ex) / 2.0, (sy + ey) / 2.0)
				}
			}
		};

		if drawing.show_edge_weights {
			if let Some(weight) = edge.weight {
				ctx.set_fill_style_str(&drawing.label_color);
				ctx.set_font(&font(drawing.font_size * 0.9, &drawing.font, k));
				let _ = ctx.fill_text(&format_weight(weight), mid_x + 4.0 / k, mid_y + 4.0 / k);
			}
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &SceneState, ctx: &CanvasRenderingContext2d, placed: &[PlacedNode]) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let drawing = &state.drawing;

	for p in placed {
		if has_highlight && state.is_highlighted(p.key) {
			continue;
		}
		let (alpha, radius) = (1.0 - 0.7 * t, p.radius * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		node_disc(ctx, p, radius);
		if p.node.state.highlighted {
			highlight_ring(ctx, p, radius, k);
		}
		if p.node.state.selected {
			selection_box(state, ctx, p, radius);
		} else if drawing.show_labels {
			ctx.set_fill_style_str(&drawing.label_color);
			ctx.set_font(&font(drawing.font_size, &drawing.font, k));
			let _ = ctx.fill_text(p.node.label.as_str(), p.x + radius + 3.0 / k, p.y + 3.0 / k);
		}
		ctx.set_global_alpha(1.0);
	}

	if !has_highlight {
		return;
	}

	for p in placed {
		if !state.is_highlighted(p.key) {
			continue;
		}
		let is_hovered = state.is_hovered(p.key);
		let is_neighbor = is_neighbor(state, p.key);

		let (radius, glow_radius) = if is_hovered {
			(p.radius * (1.0 + 0.35 * t), p.radius * (1.8 + 1.2 * t))
		} else if is_neighbor {
			(p.radius * (1.0 + 0.2 * t), p.radius * (1.4 + 0.6 * t))
		} else {
			(p.radius, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			glow(ctx, p, radius, glow_radius, if is_hovered { 0.35 * t } else { 0.2 * t });
		}
		node_disc(ctx, p, radius);
		if p.node.state.highlighted {
			highlight_ring(ctx, p, radius, k);
		}

		if is_hovered || p.node.state.selected {
			selection_box(state, ctx, p, radius);
		} else if drawing.show_labels {
			ctx.set_fill_style_str(&drawing.label_color);
			ctx.set_font(&font(drawing.font_size, &drawing.font, k));
			let _ = ctx.fill_text(p.node.label.as_str(), p.x + radius + 3.0 / k, p.y + 3.0 / k);
		}
	}
}

fn is_neighbor(state: &SceneState, key: NodeKey) -> bool {
	state.hover.neighbors.contains(&key) || state.hover.prev_neighbors.contains(&key)
}

fn node_disc(ctx: &CanvasRenderingContext2d, p: &PlacedNode, radius: f64) {
	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&p.node.color);
	ctx.fill();
}

fn highlight_ring(ctx: &CanvasRenderingContext2d, p: &PlacedNode, radius: f64, k: f64) {
	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, radius + 3.0 / k, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str("rgba(255, 220, 90, 0.9)");
	ctx.set_line_width(2.0 / k);
	ctx.stroke();
}

fn glow(ctx: &CanvasRenderingContext2d, p: &PlacedNode, radius: f64, glow_radius: f64, alpha: f64) {
	let Ok(gradient) = ctx.create_radial_gradient(p.x, p.y, radius * 0.3, p.x, p.y, glow_radius)
	else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
	let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 255, 200, {})", alpha * 0.3));
	let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
	ctx.begin_path();
	let _ = ctx.arc(p.x, p.y, glow_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

/// Label inside a rounded box, for hovered and selected nodes.
fn selection_box(state: &SceneState, ctx: &CanvasRenderingContext2d, p: &PlacedNode, radius: f64) {
	let drawing = &state.drawing;
	let k = state.transform.k;
	let size = drawing.font_size / k.max(0.5);
	let pad = 4.0 / k;
	ctx.set_font(&font(drawing.font_size, &drawing.font, k));
	let text_width = ctx
		.measure_text(p.node.label.as_str())
		.map(|m| m.width())
		.unwrap_or(size * p.node.label.as_str().len() as f64 * 0.6);

	let (x, y) = (p.x - radius - pad, p.y - size / 2.0 - pad);
	let (w, h) = (2.0 * radius + text_width + 4.0 * pad, size + 2.0 * pad);
	let r = (drawing.corner_radius / k).min(h / 2.0);

	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.92)");
	ctx.fill();
	if p.node.state.selected {
		ctx.set_stroke_style_str(&p.node.color);
		ctx.set_line_width(2.0 / k);
		ctx.stroke();
	}

	node_disc(ctx, p, radius);
	ctx.set_fill_style_str(&drawing.background_color);
	let _ = ctx.fill_text(p.node.label.as_str(), p.x + radius + 2.0 * pad, p.y + size / 3.0);
}

/// Center and radius of the ring drawn for an edge from a node to itself.
/// The ring passes through the node center, so the disc hides its lower end.
fn loop_circle(x: f64, y: f64, radius: f64, k: f64) -> (f64, f64, f64) {
	let r = radius * 0.8 + 4.0 / k;
	(x, y - r, r)
}

fn font(size: f64, family: &str, k: f64) -> String {
	format!("{}px {}", size / k.max(0.5), family)
}

fn format_weight(weight: f64) -> String {
	if weight.fract() == 0.0 && weight.abs() < 1e15 {
		format!("{}", weight as i64)
	} else {
		format!("{:.2}", weight)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn whole_weights_print_without_decimals() {
		assert_eq!(format_weight(555.0), "555");
		assert_eq!(format_weight(0.126), "0.13");
	}

	#[test]
	fn font_shrinks_with_zoom_but_not_below_half() {
		assert_eq!(font(10.0, "serif", 2.0), "5px serif");
		assert_eq!(font(10.0, "serif", 0.1), "20px serif");
	}

	#[test]
	fn self_loop_ring_sits_above_and_touches_the_node() {
		for (radius, k) in [(8.0, 1.0), (2.0, 0.5), (8.0, 4.0)] {
			let (cx, cy, r) = loop_circle(10.0, 20.0, radius, k);
			assert_eq!(cx, 10.0);
			assert!(cy < 20.0);
			let d = 20.0 - cy;
			// the two circles intersect, so the ring visibly leaves the disc
			assert!(d < radius + r && d > (r - radius).abs());
		}
	}
}

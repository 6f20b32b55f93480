use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS, owner_color};
use super::view::RiverView;

const LEGEND_FONT: &str = "13px sans-serif";
const LEGEND_LINE: f64 = 18.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(view: &RiverView, ctx: &CanvasRenderingContext2d) {
	let state = &view.graph;
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_legend(view, ctx);
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap) = (1.5 / k, 8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let dashes = js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(gap));
	let solid = js_sys::Array::new();

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		let alpha = if is_highlighted {
			0.6 + 0.3 * t
		} else {
			0.6 - 0.45 * t
		};
		let width = if is_highlighted {
			line_width * (1.0 + 0.3 * t)
		} else {
			line_width * (1.0 - 0.3 * t)
		};

		// Claimed rivers are solid in the owner's color; free ones keep flowing
		match state.edge_owner(n1.index(), n2.index()) {
			Some(owner) => {
				ctx.set_global_alpha((alpha + 0.4).min(1.0));
				ctx.set_stroke_style_str(owner_color(owner));
				ctx.set_line_width(width * 2.5);
				let _ = ctx.set_line_dash(&solid);
			}
			None => {
				ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", alpha * 0.6));
				ctx.set_line_width(width);
				let _ = ctx.set_line_dash(&dashes);
				ctx.set_line_dash_offset(dash_offset);
			}
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		ctx.stroke();
		ctx.set_global_alpha(1.0);
	});
	let _ = ctx.set_line_dash(&solid);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if let Some(label) = &node.data.user_data.label {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.8));
			ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
			)
		} else if is_neighbor {
			(NODE_RADIUS * (1.0 + 0.2 * t), NODE_RADIUS * (1.4 + 0.6 * t))
		} else {
			(NODE_RADIUS, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if let Some(label) = &node.data.user_data.label {
			ctx.set_fill_style_str("white");
			ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
	});
}

/// Screen-space overlay in the top-right corner: progress, then one row per
/// punter in first-claim order.
fn draw_legend(view: &RiverView, ctx: &CanvasRenderingContext2d) {
	let progress = view.progress();
	if progress.scheduled == 0 && view.scores().is_empty() {
		return;
	}
	let x = view.graph.width - 220.0;
	let mut y = 24.0;

	ctx.set_font(LEGEND_FONT);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
	let done = progress.claimed + progress.dropped;
	let _ = ctx.fill_text(
		&format!("moves {done}/{} ({} dropped)", progress.scheduled, progress.dropped),
		x,
		y,
	);

	for (slot, entry) in view.scores().iter().enumerate() {
		y += LEGEND_LINE;
		ctx.set_fill_style_str(owner_color(slot));
		ctx.fill_rect(x, y - 10.0, 10.0, 10.0);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
		let _ = ctx.fill_text(
			&format!("{}: {} rivers, {} pts", entry.punter, entry.rivers, entry.score),
			x + 16.0,
			y,
		);
	}
}

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::graph::{Node, NodeKind, NodePayload};
use super::state::EvidenceMapState;
use super::style::{edge_style, node_radius, node_tone};

const DIMMED_ALPHA: f64 = 0.2;
const DASH: f64 = 6.0;
const GAP: f64 = 4.0;

/// Paint order; later layers cover earlier ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layer {
	Background,
	Connections,
	Nodes,
	MainLabel,
}

const LAYERS: [Layer; 4] = [
	Layer::Background,
	Layer::Connections,
	Layer::Nodes,
	Layer::MainLabel,
];

/// Draw the whole map: background, connections, nodes, then the verdict label.
pub fn render(state: &EvidenceMapState, ctx: &CanvasRenderingContext2d) {
	for layer in LAYERS {
		match layer {
			Layer::Background => draw_background(state, ctx),
			Layer::Connections => draw_connections(state, ctx),
			Layer::Nodes => draw_nodes(state, ctx),
			Layer::MainLabel => draw_main_label(state, ctx),
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_background(state: &EvidenceMapState, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(1.0);
	ctx.set_fill_style_str(&state.config.palette.background);
	ctx.fill_rect(0.0, 0.0, state.viewport.width, state.viewport.height);
}

fn draw_connections(state: &EvidenceMapState, ctx: &CanvasRenderingContext2d) {
	let palette = &state.config.palette;
	let focus = state.selection.node_id();

	for connection in state.graph.connections() {
		let (Some(from), Some(to)) = (
			state.graph.node(&connection.from),
			state.graph.node(&connection.to),
		) else {
			continue;
		};
		let style = edge_style(connection);
		let dimmed = focus.is_some_and(|id| !connection.touches(id));

		ctx.set_global_alpha(if dimmed {
			style.opacity * DIMMED_ALPHA
		} else {
			style.opacity
		});
		ctx.set_stroke_style_str(style.tone.color(palette));
		ctx.set_line_width(if dimmed { 1.0 } else { 2.0 });
		let dash = if style.dashed {
			js_sys::Array::of2(&JsValue::from_f64(DASH), &JsValue::from_f64(GAP))
		} else {
			js_sys::Array::new()
		};
		let _ = ctx.set_line_dash(&dash);

		ctx.begin_path();
		ctx.move_to(from.position.x, from.position.y);
		ctx.line_to(to.position.x, to.position.y);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &EvidenceMapState, ctx: &CanvasRenderingContext2d) {
	for node in state.graph.nodes() {
		let radius = node_radius(node.kind(), &state.config);
		let (x, y) = (node.position.x, node.position.y);

		if state.is_selected(&node.id) {
			draw_halo(ctx, x, y, radius);
		}

		ctx.set_global_alpha(if state.is_dimmed(&node.id) {
			DIMMED_ALPHA
		} else {
			1.0
		});
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node_tone(node, &state.config.thresholds).color(&state.config.palette));
		ctx.fill();

		if state.hovered.as_ref() == Some(&node.id) || state.is_selected(&node.id) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&state.config.palette.label);
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_halo(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) {
	let glow_radius = radius * 2.2;
	let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.5, x, y, glow_radius) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, "rgba(255, 255, 255, 0.35)");
	let _ = gradient.add_color_stop(0.6, "rgba(200, 220, 255, 0.1)");
	let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
	ctx.set_global_alpha(1.0);
	ctx.begin_path();
	let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill();
}

/// Only the verdict node is labelled; everything else lives in the detail panel.
fn draw_main_label(state: &EvidenceMapState, ctx: &CanvasRenderingContext2d) {
	let Some(main) = state.graph.main() else {
		return;
	};
	let NodePayload::Main(verdict) = &main.payload else {
		return;
	};
	let (x, y) = (main.position.x, main.position.y);
	let radius = node_radius(NodeKind::Main, &state.config);

	ctx.set_global_alpha(label_alpha(state, main));
	ctx.set_fill_style_str(&state.config.palette.label);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font("bold 18px sans-serif");
	let _ = ctx.fill_text(&format!("{:.0}", verdict.score()), x, y);
	ctx.set_font("12px sans-serif");
	let _ = ctx.fill_text(&verdict.verdict_text, x, y + radius + 14.0);
}

fn label_alpha(state: &EvidenceMapState, node: &Node) -> f64 {
	if state.is_dimmed(&node.id) {
		DIMMED_ALPHA
	} else {
		1.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn position(layer: Layer) -> usize {
		LAYERS.iter().position(|l| *l == layer).unwrap()
	}

	#[test]
	fn test_connections_are_painted_under_nodes() {
		assert_eq!(LAYERS[0], Layer::Background);
		assert!(position(Layer::Connections) < position(Layer::Nodes));
		assert_eq!(LAYERS[LAYERS.len() - 1], Layer::MainLabel);
	}
}

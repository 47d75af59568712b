use web_sys::CanvasRenderingContext2d;

use super::layout::{LinkBand, NodeBox, SankeyLayout};
use super::types::ViewportSize;

const BACKGROUND: &str = "#1a1a2e";
const LABEL_COLOR: &str = "rgba(255, 255, 255, 0.85)";
const LINK_ALPHA: f64 = 0.45;
const LABEL_GAP: f64 = 6.0;

pub fn render(layout: &SankeyLayout, size: ViewportSize, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, size.width, size.height);
	draw_links(&layout.links, ctx);
	draw_nodes(&layout.nodes, layout.columns, size, ctx);
}

fn draw_links(links: &[LinkBand], ctx: &CanvasRenderingContext2d) {
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_global_alpha(LINK_ALPHA);
	for band in links {
		if band.width <= 0.0 {
			continue;
		}
		// Horizontal tangents at both ends give the usual ribbon shape.
		let mid = (band.x0 + band.x1) / 2.0;
		ctx.set_stroke_style_str(&band.color);
		ctx.set_line_width(band.width);
		ctx.begin_path();
		ctx.move_to(band.x0, band.y0);
		ctx.bezier_curve_to(mid, band.y0, mid, band.y1, band.x1, band.y1);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(
	nodes: &[NodeBox],
	columns: usize,
	size: ViewportSize,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_font("12px sans-serif");
	ctx.set_text_baseline("middle");
	for node in nodes {
		ctx.set_fill_style_str(&node.color);
		ctx.fill_rect(node.x0, node.y0, node.x1 - node.x0, node.height());

		let y = (node.y0 + node.y1) / 2.0;
		ctx.set_fill_style_str(LABEL_COLOR);
		// Last column labels go on the left so they stay on screen.
		if columns > 1 && node.column + 1 == columns {
			ctx.set_text_align("right");
			let _ = ctx.fill_text(&node.name, node.x0 - LABEL_GAP, y);
		} else {
			ctx.set_text_align("left");
			let _ = ctx.fill_text_with_max_width(
				&node.name,
				node.x1 + LABEL_GAP,
				y,
				(size.width - node.x1 - LABEL_GAP).max(0.0),
			);
		}
	}
}

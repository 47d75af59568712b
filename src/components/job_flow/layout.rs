//! Column geometry for the flow diagram.
//!
//! Nodes are placed in columns by longest path from a root and stacked in input
//! order. A single vertical scale converts flow to pixels so node heights and
//! band widths stay comparable across the whole diagram.

use super::types::{Graph, GraphLink, ViewportSize};

pub const MARGIN: f64 = 24.0;
pub const NODE_WIDTH: f64 = 16.0;
pub const NODE_PADDING: f64 = 12.0;
pub const MIN_NODE_HEIGHT: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
	pub name: String,
	pub color: String,
	pub column: usize,
	pub x0: f64,
	pub y0: f64,
	pub x1: f64,
	pub y1: f64,
}

impl NodeBox {
	pub fn height(&self) -> f64 {
		self.y1 - self.y0
	}
}

/// A link drawn as a band whose centerline runs from `(x0, y0)` to `(x1, y1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkBand {
	pub color: String,
	pub width: f64,
	pub x0: f64,
	pub y0: f64,
	pub x1: f64,
	pub y1: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SankeyLayout {
	pub nodes: Vec<NodeBox>,
	pub links: Vec<LinkBand>,
	pub columns: usize,
}

pub fn compute(graph: &Graph, size: ViewportSize) -> SankeyLayout {
	let n = graph.nodes.len();
	if n == 0 || !size.is_drawable() {
		return SankeyLayout::default();
	}
	let links: Vec<_> = graph
		.links
		.iter()
		.filter(|l| l.source < n && l.target < n)
		.collect();

	let (mut inflow, mut outflow) = (vec![0.0; n], vec![0.0; n]);
	for l in &links {
		outflow[l.source] += l.value;
		inflow[l.target] += l.value;
	}
	// Unscalable totals are drawn like idle nodes.
	let values: Vec<f64> = (0..n)
		.map(|i| f64::max(inflow[i], outflow[i]))
		.map(|v| if v.is_finite() { v } else { 0.0 })
		.collect();

	let columns = assign_columns(n, &links);
	let column_count = columns.iter().max().map_or(1, |c| c + 1);

	let inner_w = (size.width - 2.0 * MARGIN).max(0.0);
	let inner_h = (size.height - 2.0 * MARGIN).max(0.0);
	let node_w = NODE_WIDTH.min(inner_w / column_count as f64);
	let step = if column_count > 1 {
		(inner_w - node_w) / (column_count - 1) as f64
	} else {
		0.0
	};

	let mut members: Vec<Vec<usize>> = vec![Vec::new(); column_count];
	for (i, &c) in columns.iter().enumerate() {
		members[c].push(i);
	}
	let max_members = members.iter().map(Vec::len).max().unwrap_or(1).max(1);
	// Gaps and idle nodes each take at most half the height of the fullest column.
	let share = inner_h / (2.0 * max_members as f64);
	let pad = NODE_PADDING.min(share);
	let min_h = MIN_NODE_HEIGHT.min(share);

	let scale = members
		.iter()
		.filter_map(|col| {
			let total: f64 = col.iter().map(|&i| values[i]).sum();
			if total <= 0.0 {
				return None;
			}
			let zeros = col.iter().filter(|&&i| values[i] <= 0.0).count() as f64;
			let gaps = col.len().saturating_sub(1) as f64 * pad;
			Some(((inner_h - gaps - zeros * min_h) / total).max(0.0))
		})
		.fold(f64::INFINITY, f64::min);
	let scale = if scale.is_finite() { scale } else { 0.0 };

	let height_of = |i: usize| {
		if values[i] > 0.0 {
			values[i] * scale
		} else {
			min_h
		}
	};

	let mut boxes: Vec<Option<NodeBox>> = vec![None; n];
	for (c, col) in members.iter().enumerate() {
		let stacked: f64 = col.iter().map(|&i| height_of(i)).sum::<f64>()
			+ col.len().saturating_sub(1) as f64 * pad;
		let mut y = MARGIN + ((inner_h - stacked) / 2.0).max(0.0);
		let x0 = MARGIN + c as f64 * step;
		for &i in col {
			let h = height_of(i);
			let node = &graph.nodes[i];
			boxes[i] = Some(NodeBox {
				name: node.name.clone(),
				color: node.color.clone(),
				column: c,
				x0,
				y0: y,
				x1: x0 + node_w,
				y1: y + h,
			});
			y += h + pad;
		}
	}
	let nodes: Vec<NodeBox> = boxes.into_iter().flatten().collect();

	let mut out_y: Vec<f64> = nodes.iter().map(|b| b.y0).collect();
	let mut in_y = out_y.clone();
	let bands = links
		.iter()
		.map(|l| {
			let width = if l.value.is_finite() {
				l.value * scale
			} else {
				0.0
			};
			let (src, tgt) = (&nodes[l.source], &nodes[l.target]);
			let y0 = out_y[l.source] + width / 2.0;
			out_y[l.source] += width;
			let y1 = in_y[l.target] + width / 2.0;
			in_y[l.target] += width;
			LinkBand {
				color: l.color.clone(),
				width,
				x0: src.x1,
				y0,
				x1: tgt.x0,
				y1,
			}
		})
		.collect();

	SankeyLayout {
		nodes,
		links: bands,
		columns: column_count,
	}
}

/// Longest-path depth from any root, with empty columns squeezed out.
/// Depth is capped at `n - 1` so cycles settle instead of growing forever.
fn assign_columns(n: usize, links: &[&GraphLink]) -> Vec<usize> {
	let mut depth = vec![0usize; n];
	for _ in 0..n {
		let mut changed = false;
		for l in links {
			if l.source == l.target {
				continue;
			}
			let d = (depth[l.source] + 1).min(n - 1);
			if d > depth[l.target] {
				depth[l.target] = d;
				changed = true;
			}
		}
		if !changed {
			break;
		}
	}

	let mut used = depth.clone();
	used.sort_unstable();
	used.dedup();
	depth
		.iter()
		.map(|d| used.binary_search(d).unwrap_or(0))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::job_flow::types::GraphNode;

	fn graph(names: &[&str], links: &[(usize, usize, f64)]) -> Graph {
		Graph {
			nodes: names
				.iter()
				.map(|n| GraphNode {
					name: n.to_string(),
					color: "green".into(),
				})
				.collect(),
			links: links
				.iter()
				.map(|&(source, target, value)| GraphLink {
					source,
					target,
					value,
					color: "red".into(),
				})
				.collect(),
		}
	}

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	const SIZE: ViewportSize = ViewportSize {
		width: 800.0,
		height: 600.0,
	};

	#[test]
	fn nothing_to_lay_out() {
		assert_eq!(compute(&Graph::default(), SIZE), SankeyLayout::default());
		let g = graph(&["A"], &[]);
		assert_eq!(
			compute(&g, ViewportSize::new(0.0, 600.0)),
			SankeyLayout::default()
		);
	}

	#[test]
	fn two_stages_fill_the_height() {
		let layout = compute(&graph(&["A", "B"], &[(0, 1, 5.0)]), SIZE);
		assert_eq!(layout.columns, 2);
		let (a, b) = (&layout.nodes[0], &layout.nodes[1]);
		assert_eq!((a.column, b.column), (0, 1));
		assert!(b.x0 > a.x1);
		assert!(close(a.height(), SIZE.height - 2.0 * MARGIN));
		assert!(close(a.height(), b.height()));

		let band = &layout.links[0];
		assert!(close(band.width, a.height()));
		assert!(close(band.x0, a.x1));
		assert!(close(band.x1, b.x0));
	}

	#[test]
	fn widths_and_heights_follow_value() {
		let layout = compute(&graph(&["A", "B", "C"], &[(0, 1, 3.0), (0, 2, 1.0)]), SIZE);
		let (b, c) = (&layout.nodes[1], &layout.nodes[2]);
		assert!(close(b.height(), 3.0 * c.height()));
		assert!(close(layout.links[0].width, 3.0 * layout.links[1].width));
	}

	#[test]
	fn bands_stack_inside_their_nodes() {
		let layout = compute(&graph(&["A", "B", "C"], &[(0, 1, 2.0), (0, 2, 2.0)]), SIZE);
		let a = &layout.nodes[0];
		let (first, second) = (&layout.links[0], &layout.links[1]);
		assert!(close(first.y0 - first.width / 2.0, a.y0));
		assert!(close(second.y0 - second.width / 2.0, a.y0 + first.width));
		assert!(close(second.y0 + second.width / 2.0, a.y1));
	}

	#[test]
	fn stays_inside_the_viewport() {
		let g = graph(
			&["extract", "clean", "join", "report", "archive", "idle"],
			&[
				(0, 1, 4.0),
				(0, 2, 2.0),
				(1, 2, 3.0),
				(2, 3, 5.0),
				(2, 4, 1.0),
			],
		);
		let size = ViewportSize::new(320.0, 240.0);
		let layout = compute(&g, size);
		assert_eq!(layout.nodes.len(), 6);
		for node in &layout.nodes {
			assert!(node.x0 >= 0.0 && node.x1 <= size.width, "{node:?}");
			assert!(node.y0 >= 0.0 && node.y1 <= size.height + 1e-9, "{node:?}");
			assert!(node.height() >= MIN_NODE_HEIGHT - 1e-9);
		}
		// join depends on clean, so it sits one column further right.
		assert_eq!(layout.nodes[1].column + 1, layout.nodes[2].column);
	}

	#[test]
	fn cycles_terminate() {
		let layout = compute(&graph(&["A", "B"], &[(0, 1, 1.0), (1, 0, 1.0)]), SIZE);
		assert_eq!(layout.nodes.len(), 2);
		assert_eq!(layout.links.len(), 2);
		assert!(layout.columns <= 2);
	}

	#[test]
	fn zero_flow_nodes_stay_visible() {
		let layout = compute(&graph(&["A", "B", "lonely"], &[(0, 1, 0.0)]), SIZE);
		for node in &layout.nodes {
			assert!(close(node.height(), MIN_NODE_HEIGHT));
		}
		assert!(close(layout.links[0].width, 0.0));
	}

	#[test]
	fn crowded_idle_column_still_fits() {
		let names: Vec<String> = (0..300).map(|i| format!("job-{i}")).collect();
		let names: Vec<&str> = names.iter().map(String::as_str).collect();
		let layout = compute(&graph(&names, &[]), SIZE);

		assert_eq!(layout.nodes.len(), 300);
		let bottom = layout.nodes.iter().map(|n| n.y1).fold(0.0, f64::max);
		assert!(bottom <= SIZE.height - MARGIN + 1e-9, "bottom at {bottom}");
		for pair in layout.nodes.windows(2) {
			assert!(pair[0].y1 <= pair[1].y0 + 1e-9);
			assert!(pair[0].height() > 0.0);
		}
	}

	#[test]
	fn overflowing_totals_never_produce_nan() {
		let layout = compute(
			&graph(&["A", "B"], &[(0, 1, 1e308), (0, 1, 1e308)]),
			SIZE,
		);
		for node in &layout.nodes {
			assert!(node.y0.is_finite() && node.y1.is_finite(), "{node:?}");
		}
		for band in &layout.links {
			assert!(band.width.is_finite() && band.y0.is_finite() && band.y1.is_finite());
		}
	}
}

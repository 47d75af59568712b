use serde::{Deserialize, Serialize};
use web_sys::Window;

use super::error::{GraphError, GraphResult};

/// A labeled stage of the job flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub name: String,
	pub color: String,
}

/// Weighted flow between two stages, addressed by node index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
	pub source: usize,
	pub target: usize,
	pub value: f64,
	pub color: String,
}

/// One complete snapshot of the job flow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl Graph {
	/// Decode and validate a response body.
	pub fn from_json(body: &str) -> GraphResult<Self> {
		if body.trim().is_empty() {
			return Err(GraphError::EmptyBody);
		}
		let graph: Graph = serde_json::from_str(body)?;
		graph.validate()?;
		Ok(graph)
	}

	/// Check that every link addresses existing nodes and carries a usable value.
	pub fn validate(&self) -> GraphResult<()> {
		let nodes = self.nodes.len();
		for (i, link) in self.links.iter().enumerate() {
			if link.source >= nodes || link.target >= nodes {
				return Err(GraphError::LinkOutOfRange {
					link: i,
					from: link.source,
					to: link.target,
					nodes,
				});
			}
		}
		for (i, link) in self.links.iter().enumerate() {
			if !link.value.is_finite() || link.value < 0.0 {
				return Err(GraphError::InvalidLinkValue {
					link: i,
					value: link.value,
				});
			}
		}
		// Per-node totals must stay finite too, or nothing can be scaled to fit.
		let (mut inflow, mut outflow) = (vec![0.0f64; nodes], vec![0.0f64; nodes]);
		for (i, link) in self.links.iter().enumerate() {
			outflow[link.source] += link.value;
			inflow[link.target] += link.value;
			if !outflow[link.source].is_finite() || !inflow[link.target].is_finite() {
				return Err(GraphError::InvalidLinkValue {
					link: i,
					value: link.value,
				});
			}
		}
		Ok(())
	}
}

/// Current dimensions of the display surface, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
	pub width: f64,
	pub height: f64,
}

impl ViewportSize {
	#[cfg(test)]
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Read the window's inner size. `None` if the browser reports non-numeric values.
	pub fn from_window(window: &Window) -> Option<Self> {
		let width = window.inner_width().ok()?.as_f64()?;
		let height = window.inner_height().ok()?.as_f64()?;
		Some(Self { width, height })
	}

	pub fn is_drawable(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}
}

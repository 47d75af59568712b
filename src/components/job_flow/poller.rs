use std::cell::{Cell, RefCell};

use log::debug;

use super::error::GraphError;
use super::lifecycle::Liveness;
use super::source::GraphSource;
use super::types::Graph;

/// What a single poll tick did with its response.
#[derive(Debug)]
pub enum TickOutcome {
	/// A new snapshot was handed to the publisher.
	Published,
	/// The snapshot equals what is already published.
	Unchanged,
	/// Fetching or decoding failed; the previous graph stays up.
	Skipped(GraphError),
	/// A later tick already published, so this older response was dropped.
	Superseded,
	/// The owner was torn down before the request or before the response.
	Detached,
}

#[cfg(test)]
impl TickOutcome {
	pub fn is_published(&self) -> bool {
		matches!(self, TickOutcome::Published)
	}
}

/// Fetch, decode, validate and publish graph snapshots.
///
/// Ticks may overlap when a request outlives the interval. Each tick is stamped
/// when issued and a response older than the last applied one is discarded.
pub struct GraphPoller<S> {
	source: S,
	liveness: Liveness,
	issued: Cell<u64>,
	applied: Cell<u64>,
	current: RefCell<Option<Graph>>,
}

impl<S: GraphSource> GraphPoller<S> {
	pub fn new(source: S, liveness: Liveness) -> Self {
		Self {
			source,
			liveness,
			issued: Cell::new(0),
			applied: Cell::new(0),
			current: RefCell::new(None),
		}
	}

	pub async fn tick(&self, publish: impl FnOnce(Graph)) -> TickOutcome {
		if !self.liveness.is_alive() {
			return TickOutcome::Detached;
		}
		let seq = self.issued.get() + 1;
		self.issued.set(seq);

		let result = match self.source.fetch().await {
			Ok(body) => Graph::from_json(&body),
			Err(e) => Err(e),
		};

		if !self.liveness.is_alive() {
			debug!("Dropping response for tick {} after teardown", seq);
			return TickOutcome::Detached;
		}

		let graph = match result {
			Ok(graph) => graph,
			Err(e) => return TickOutcome::Skipped(e),
		};

		if seq < self.applied.get() {
			debug!(
				"Tick {} superseded by tick {}",
				seq,
				self.applied.get()
			);
			return TickOutcome::Superseded;
		}
		self.applied.set(seq);

		if self.current.borrow().as_ref() == Some(&graph) {
			return TickOutcome::Unchanged;
		}
		debug!(
			"Tick {}: {} nodes, {} links",
			seq,
			graph.nodes.len(),
			graph.links.len()
		);
		*self.current.borrow_mut() = Some(graph.clone());
		publish(graph);
		TickOutcome::Published
	}
}

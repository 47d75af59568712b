use thiserror::Error;

/// Result alias for graph fetching and decoding.
pub type GraphResult<T> = Result<T, GraphError>;

/// Reasons a poll tick can fail to produce a publishable graph.
#[derive(Debug, Error)]
pub enum GraphError {
	/// The request never produced a response (unreachable, aborted, timed out).
	#[error("transport failure: {0}")]
	Transport(String),

	/// The endpoint answered with a non-success status.
	#[error("unexpected status {status}: {text}")]
	Status { status: u16, text: String },

	/// The response carried no body at all.
	#[error("empty response body")]
	EmptyBody,

	/// The body is not JSON or does not match the graph schema.
	#[error("malformed graph payload: {0}")]
	Decode(#[from] serde_json::Error),

	/// A link points outside the node list.
	#[error("link {link} ({from} -> {to}) is out of range for {nodes} nodes")]
	LinkOutOfRange {
		link: usize,
		from: usize,
		to: usize,
		nodes: usize,
	},

	/// A link carries a negative or non-finite value.
	#[error("link {link} has invalid value {value}")]
	InvalidLinkValue { link: usize, value: f64 },
}

use std::future::Future;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::AbortController;

use super::config::PollerConfig;
use super::error::{GraphError, GraphResult};

/// Something that can hand back the raw body of a graph snapshot.
pub trait GraphSource {
	fn fetch(&self) -> impl Future<Output = GraphResult<String>>;
}

/// Fetches snapshots over HTTP GET with the browser's fetch API.
#[derive(Clone, Debug)]
pub struct HttpGraphSource {
	endpoint: String,
	timeout_ms: Option<u32>,
}

impl HttpGraphSource {
	pub fn new(config: &PollerConfig) -> Self {
		Self {
			endpoint: config.endpoint.clone(),
			timeout_ms: config.request_timeout_ms,
		}
	}

	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}
}

impl GraphSource for HttpGraphSource {
	async fn fetch(&self) -> GraphResult<String> {
		let controller = AbortController::new()
			.map_err(|e| GraphError::Transport(format!("abort controller unavailable: {e:?}")))?;
		let signal = controller.signal();
		// Dropping the timeout at the end of this call cancels it.
		let _deadline = self.timeout_ms.map(|ms| {
			let endpoint = self.endpoint.clone();
			Timeout::new(ms, move || {
				debug!("Aborting request to {} after {}ms", endpoint, ms);
				controller.abort();
			})
		});

		let resp = Request::get(&self.endpoint)
			.abort_signal(Some(&signal))
			.send()
			.await
			.map_err(|e| GraphError::Transport(e.to_string()))?;

		if !resp.ok() {
			return Err(GraphError::Status {
				status: resp.status(),
				text: resp.status_text(),
			});
		}

		resp.text()
			.await
			.map_err(|e| GraphError::Transport(e.to_string()))
	}
}

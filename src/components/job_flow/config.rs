use std::time::Duration;

use log::warn;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3001/jobs";
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1000;

/// Where and how often the graph snapshot is polled.
#[derive(Clone, Debug, PartialEq)]
pub struct PollerConfig {
	pub endpoint: String,
	pub poll_interval_ms: u32,
	/// Abort a request that has not completed after this long.
	pub request_timeout_ms: Option<u32>,
	/// Run the first tick at mount instead of after one interval.
	pub fetch_on_mount: bool,
}

impl Default for PollerConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.into(),
			poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
			request_timeout_ms: None,
			fetch_on_mount: false,
		}
	}
}

impl PollerConfig {
	/// Defaults overridden by `JOB_FLOW_ENDPOINT`, `JOB_FLOW_POLL_MS` and
	/// `JOB_FLOW_TIMEOUT_MS` as seen at build time.
	pub fn from_build_env() -> Self {
		Self::default().with_overrides(
			option_env!("JOB_FLOW_ENDPOINT"),
			option_env!("JOB_FLOW_POLL_MS"),
			option_env!("JOB_FLOW_TIMEOUT_MS"),
		)
	}

	/// Apply raw string overrides; blank or unparseable values keep the current setting.
	pub fn with_overrides(
		mut self,
		endpoint: Option<&str>,
		poll_ms: Option<&str>,
		timeout_ms: Option<&str>,
	) -> Self {
		if let Some(endpoint) = endpoint.map(str::trim).filter(|e| !e.is_empty()) {
			self.endpoint = endpoint.into();
		}
		if let Some(ms) = poll_ms.and_then(|raw| parse_millis("JOB_FLOW_POLL_MS", raw)) {
			self.poll_interval_ms = ms;
		}
		if let Some(ms) = timeout_ms.and_then(|raw| parse_millis("JOB_FLOW_TIMEOUT_MS", raw)) {
			self.request_timeout_ms = Some(ms);
		}
		self
	}

	/// Tick period, never shorter than 1ms.
	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms.max(1) as u64)
	}
}

#[cfg(test)]
impl PollerConfig {
	pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.endpoint = endpoint.into();
		self
	}

	pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
		self.poll_interval_ms = ms;
		self
	}

	pub fn with_request_timeout_ms(mut self, ms: u32) -> Self {
		self.request_timeout_ms = Some(ms);
		self
	}

	pub fn with_fetch_on_mount(mut self, fetch_on_mount: bool) -> Self {
		self.fetch_on_mount = fetch_on_mount;
		self
	}
}

fn parse_millis(name: &str, raw: &str) -> Option<u32> {
	match raw.trim().parse::<u32>() {
		Ok(ms) => Some(ms),
		Err(e) => {
			warn!("Ignoring {}={:?}: {}", name, raw, e);
			None
		}
	}
}

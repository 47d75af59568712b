use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag that flips to dead when the owning component is torn down.
///
/// Every asynchronous completion checks it before touching component state, since
/// in-flight requests are not cancelled on unmount.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
	pub fn new() -> Self {
		Self(Arc::new(AtomicBool::new(true)))
	}

	pub fn is_alive(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	/// Mark the owner as gone. Idempotent.
	pub fn release(&self) {
		self.0.store(false, Ordering::Release);
	}
}

impl Default for Liveness {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn release_is_seen_by_every_clone() {
		let owner = Liveness::new();
		let task = owner.clone();
		assert!(task.is_alive());
		owner.release();
		assert!(!task.is_alive());
		owner.release();
		assert!(!owner.is_alive());
	}
}

use std::cell::Cell;

use super::lifecycle::Liveness;
use super::types::ViewportSize;

/// Republishes window dimensions for as long as its owner is mounted.
pub struct ViewportTracker {
	liveness: Liveness,
	last: Cell<Option<ViewportSize>>,
}

impl ViewportTracker {
	pub fn new(liveness: Liveness) -> Self {
		Self {
			liveness,
			last: Cell::new(None),
		}
	}

	/// Feed one resize notification. Returns whether `publish` was called.
	pub fn observe(&self, size: ViewportSize, publish: impl FnOnce(ViewportSize)) -> bool {
		if !self.liveness.is_alive() || self.last.get() == Some(size) {
			return false;
		}
		self.last.set(Some(size));
		publish(size);
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn publishes_exact_dimensions() {
		let tracker = ViewportTracker::new(Liveness::new());
		for (w, h) in [(1024.0, 768.0), (1.0, 1.0), (0.0, 0.0), (1920.5, 1080.25)] {
			let mut seen = None;
			assert!(tracker.observe(ViewportSize::new(w, h), |s| seen = Some(s)));
			assert_eq!(
				seen,
				Some(ViewportSize {
					width: w,
					height: h
				})
			);
		}
		assert_eq!(tracker.last.get(), Some(ViewportSize::new(1920.5, 1080.25)));
	}

	#[test]
	fn repeated_size_is_not_republished() {
		let tracker = ViewportTracker::new(Liveness::new());
		let mut count = 0;
		tracker.observe(ViewportSize::new(800.0, 600.0), |_| count += 1);
		tracker.observe(ViewportSize::new(800.0, 600.0), |_| count += 1);
		tracker.observe(ViewportSize::new(801.0, 600.0), |_| count += 1);
		assert_eq!(count, 2);
	}

	#[test]
	fn silent_after_teardown() {
		let liveness = Liveness::new();
		let tracker = ViewportTracker::new(liveness.clone());
		liveness.release();
		let mut called = false;
		assert!(!tracker.observe(ViewportSize::new(640.0, 480.0), |_| called = true));
		assert!(!called);
		assert_eq!(tracker.last.get(), None);
	}
}

use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::PollerConfig;
use super::layout;
use super::lifecycle::Liveness;
use super::poller::{GraphPoller, TickOutcome};
use super::render;
use super::source::{GraphSource, HttpGraphSource};
use super::types::{Graph, ViewportSize};
use super::viewport::ViewportTracker;

/// Full-window flow diagram of the job graph served at `config.endpoint`.
#[component]
pub fn JobFlowCanvas(
	#[prop(default = PollerConfig::from_build_env())] config: PollerConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let liveness = Liveness::new();

	let initial = current_viewport().unwrap_or_default();
	let (viewport, set_viewport) = signal(initial);
	let (graph, set_graph) = signal(Graph::default());

	mount_viewport_tracker(liveness.clone(), Some(initial), move |s| {
		set_viewport.set(s)
	});

	let source = HttpGraphSource::new(&config);
	info!(
		"Polling {} every {}ms",
		source.endpoint(),
		config.poll_interval().as_millis()
	);
	mount_poller(source, &config, liveness, move |g| set_graph.set(g));

	Effect::new(move |_| {
		let size = viewport.get();
		let layout = graph.with(|g| layout::compute(g, size));
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(size.width.max(0.0) as u32);
		canvas.set_height(size.height.max(0.0) as u32);
		let Some(ctx) = context_2d(&canvas) else {
			error!("Canvas has no 2d context");
			return;
		};
		render::render(&layout, size, &ctx);
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="job-flow-canvas"
			style="display: block;"
		/>
	}
}

/// Listen for window resizes until the current owner is cleaned up.
///
/// `initial` counts as already published, so only real changes reach `publish`.
pub(crate) fn mount_viewport_tracker(
	liveness: Liveness,
	initial: Option<ViewportSize>,
	publish: impl Fn(ViewportSize) + 'static,
) {
	let tracker = ViewportTracker::new(liveness.clone());
	if let Some(size) = initial {
		tracker.observe(size, |_| {});
	}
	let resize = window_event_listener(ev::resize, move |_| {
		if let Some(size) = current_viewport() {
			tracker.observe(size, &publish);
		}
	});

	on_cleanup(move || {
		liveness.release();
		resize.remove();
	});
}

/// Tick `source` on the configured interval until the current owner is cleaned up.
pub(crate) fn mount_poller<S>(
	source: S,
	config: &PollerConfig,
	liveness: Liveness,
	publish: impl Fn(Graph) + 'static,
) where
	S: GraphSource + 'static,
{
	let poller = Rc::new(GraphPoller::new(source, liveness.clone()));
	let publish = Rc::new(publish);
	let run_tick = move || {
		let (poller, publish) = (poller.clone(), publish.clone());
		spawn_local(async move {
			match poller.tick(|g| (*publish)(g)).await {
				TickOutcome::Skipped(e) => warn!("Poll skipped: {}", e),
				outcome => debug!("Tick finished: {:?}", outcome),
			}
		});
	};
	if config.fetch_on_mount {
		run_tick();
	}
	let interval = match set_interval_with_handle(run_tick, config.poll_interval()) {
		Ok(handle) => Some(handle),
		Err(e) => {
			error!("Could not start poll timer: {:?}", e);
			None
		}
	};

	on_cleanup(move || {
		liveness.release();
		if let Some(handle) = interval {
			handle.clear();
		}
		debug!("Poll timer stopped");
	});
}

fn current_viewport() -> Option<ViewportSize> {
	web_sys::window().as_ref().and_then(ViewportSize::from_window)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()?
		.dyn_into::<CanvasRenderingContext2d>()
		.ok()
}

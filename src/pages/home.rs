use leptos::prelude::*;

use crate::components::job_flow::JobFlowCanvas;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="fullscreen-graph">
			<JobFlowCanvas />
		</div>
	}
}

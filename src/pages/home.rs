use leptos::prelude::*;
use log::info;
use serde_json::json;

use crate::components::flow_canvas::{
	CanvasOptions, FlowCanvas, Node, PathType, SENTINEL_NODE_ID, XYPosition,
};

/// Starter diagram: two nodes and the non-interactive placeholder.
fn sample_nodes() -> Vec<Node> {
	let note = |id: &str, title: &str, x: f64, y: f64| {
		let data = json!({ "title": title, "connections": { "in": [], "out": [] } });
		Node::new(id, "custom-a", XYPosition::new(x, y))
			.with_size(220.0, 150.0)
			.with_data(data.as_object().cloned().unwrap_or_default())
	};
	let mut ghost = Node::new(SENTINEL_NODE_ID, "ghost", XYPosition::new(-1000.0, -1000.0));
	ghost.draggable = false;
	ghost.selectable = false;

	vec![
		note("start", "Start", 80.0, 120.0),
		note("review", "Review", 420.0, 160.0),
		ghost,
	]
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let node_types = vec!["custom-a".to_owned(), "custom-b".to_owned()];

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				<FlowCanvas
					graph_id="main"
					options=CanvasOptions::with_path_type(PathType::SmoothStep)
					initial_nodes=sample_nodes()
					node_types=node_types
					on_node_dropped=move |node: Node| {
						info!("node {} dropped, sub-graph `{}` requested", node.node_type, node.id)
					}
				/>
				<div class="graph-overlay">
					<h1>"Flow Canvas"</h1>
					<p class="subtitle">
						"Drag items from the toolbar. Shift-click to connect. Delete removes the selection."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}

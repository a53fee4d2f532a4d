use leptos::html::Div;
use leptos::prelude::*;
use log::info;
use web_sys::{DragEvent, KeyboardEvent, MouseEvent};

use super::canvas::Canvas;
use super::config::CanvasOptions;
use super::dnd::{DragAndDrop, DragPayload, DropOutcome};
use super::engine::FlowEngine;
use super::state::FlowState;
use super::types::{Connection, Edge, Node, XYPosition};

type CanvasSignal = RwSignal<Canvas<FlowState>, LocalStorage>;

/// A diagram pane with its toolbar. Each instance owns an isolated canvas scope.
#[component]
pub fn FlowCanvas(
	/// Scope name, also used to namespace duplicated node ids.
	#[prop(into)]
	graph_id: String,
	/// Canvas options such as the default edge path style.
	#[prop(optional)]
	options: CanvasOptions,
	/// Nodes present when the pane mounts.
	#[prop(optional)]
	initial_nodes: Vec<Node>,
	/// Type tags offered as draggable toolbar items.
	#[prop(optional)]
	node_types: Vec<String>,
	/// Handle to the pane element for host-side listeners.
	#[prop(optional)]
	pane_ref: Option<NodeRef<Div>>,
	/// Runs after a toolbar drop created a node.
	#[prop(optional, into)]
	on_node_dropped: Option<Callback<Node>>,
	/// Runs after the frozen flag flipped.
	#[prop(optional, into)]
	on_freeze_change: Option<Callback<bool>>,
) -> impl IntoView {
	let pane_ref = pane_ref.unwrap_or_else(NodeRef::new);
	let canvas: CanvasSignal = RwSignal::new_local(Canvas::new(
		graph_id,
		FlowState::with_nodes(initial_nodes),
		options,
	));
	let pointer = RwSignal::new(XYPosition::default());
	canvas.update_untracked(|c| c.on_pane_mouse_move(move |position| pointer.set(position)));
	let frozen = Signal::derive(move || canvas.with(|c| c.is_frozen()));
	let dnd = DragAndDrop::new();

	let sync_origin = move || {
		if let Some(pane) = pane_ref.get_untracked() {
			let rect = pane.get_bounding_client_rect();
			canvas.update_untracked(|c| {
				c.engine_mut().set_origin(XYPosition::new(rect.left(), rect.top()));
			});
		}
	};

	let on_drag_over = move |ev: DragEvent| dnd.on_drag_over(&ev);

	let on_drop = move |ev: DragEvent| {
		ev.prevent_default();
		sync_origin();
		if let Some(DropOutcome::Created(node)) = canvas.try_update(|c| dnd.on_drop(&ev, c)) {
			info!("created {} node {}", node.node_type, node.id);
			if let Some(callback) = on_node_dropped {
				callback.run(node);
			}
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		sync_origin();
		let client = XYPosition::new(ev.client_x() as f64, ev.client_y() as f64);
		canvas.with_untracked(|c| c.engine().pane_mouse_move(client));
	};

	let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
		"Delete" | "Backspace" => canvas.update(|c| c.delete_selection()),
		"Escape" => canvas.update(|c| c.engine_mut().clear_selection()),
		_ => {}
	};

	let toggle_freeze = Callback::new(move |_: ()| {
		if let Some(frozen) = canvas.try_update(|c| c.toggle_freeze()) {
			info!("canvas frozen: {frozen}");
			if let Some(callback) = on_freeze_change {
				callback.run(frozen);
			}
		}
	});

	let duplicate = Callback::new(move |_: ()| {
		canvas.update(|c| {
			c.duplicate_selected_node();
		});
	});

	let node_views = move || {
		canvas.with(|c| {
			c.nodes()
				.iter()
				.map(|node| node_view(node, c.engine(), canvas, dnd))
				.collect_view()
		})
	};

	let edge_views = move || {
		canvas.with(|c| {
			c.edges()
				.iter()
				.filter_map(|edge| edge_view(edge, c.engine(), canvas))
				.collect_view()
		})
	};

	view! {
		<div class="flow-canvas">
			<Toolbar
				node_types=node_types
				frozen=frozen
				on_toggle_freeze=toggle_freeze
				on_duplicate=duplicate
			/>
			<div
				node_ref=pane_ref
				class="flow-pane"
				class:frozen=move || frozen.get()
				tabindex="0"
				on:dragover=on_drag_over
				on:drop=on_drop
				on:mousemove=on_mousemove
				on:keydown=on_keydown
				style="position: relative; overflow: hidden; width: 100%; height: 100%;"
			>
				<svg
					class="flow-edges"
					style="position: absolute; inset: 0; width: 100%; height: 100%; pointer-events: none;"
				>
					{edge_views}
				</svg>
				{node_views}
				<div class="flow-pointer">
					{move || {
						let p = pointer.get();
						format!("{:.0}, {:.0}", p.x, p.y)
					}}
				</div>
			</div>
		</div>
	}
}

fn node_view(
	node: &Node,
	state: &FlowState,
	canvas: CanvasSignal,
	dnd: DragAndDrop<'static>,
) -> impl IntoView + use<> {
	let screen = state.graph_to_screen(node.position);
	let mut style = format!(
		"position: absolute; left: {}px; top: {}px; transform: scale({}); transform-origin: 0 0;",
		screen.x, screen.y, state.transform.k
	);
	if let Some(width) = node.width {
		style.push_str(&format!(" width: {width}px;"));
	}
	if let Some(height) = node.height {
		style.push_str(&format!(" height: {height}px;"));
	}
	let class = if state.is_selected(&node.id) {
		"flow-node selected"
	} else {
		"flow-node"
	};
	let draggable = if node.draggable { "true" } else { "false" };
	let title = node.title().to_owned();
	let snapshot = serde_json::to_value(node).unwrap_or_default();

	let id = node.id.clone();
	let on_click = move |ev: MouseEvent| {
		ev.stop_propagation();
		canvas.update(|c| {
			if ev.shift_key() {
				if let [source] = c.engine().selected_ids().as_slice() {
					let intent = c
						.engine()
						.connect_intent(Connection::new(source.clone(), id.clone()));
					if let Some(event) = intent {
						c.handle_event(event);
					}
					return;
				}
			}
			c.engine_mut().select_node(&id, ev.ctrl_key() || ev.meta_key());
		});
	};

	let on_drag_start =
		move |ev: DragEvent| dnd.on_drag_start(&ev, &DragPayload::Snapshot(snapshot.clone()));

	view! {
		<div
			class=class
			style=style
			draggable=draggable
			on:click=on_click
			on:dragstart=on_drag_start
		>
			<span class="flow-node-title">{title}</span>
		</div>
	}
}

fn edge_view(
	edge: &Edge,
	state: &FlowState,
	canvas: CanvasSignal,
) -> Option<impl IntoView + use<>> {
	let centre = |node: &Node| {
		state.graph_to_screen(node.position.offset(
			node.width.unwrap_or_default() / 2.0,
			node.height.unwrap_or_default() / 2.0,
		))
	};
	let from = centre(state.find_node(&edge.source)?);
	let to = centre(state.find_node(&edge.target)?);
	let mut class = String::from("flow-edge");
	if edge.data.animated {
		class.push_str(" animated");
	}
	if state.is_edge_selected(&edge.id) {
		class.push_str(" selected");
	}
	// The pane's svg layer ignores the pointer; only the wide hit stroke catches clicks.
	let hit_style = if edge.selectable {
		"pointer-events: stroke;"
	} else {
		"pointer-events: none;"
	};
	let hit_width = edge.interaction_width.to_string();

	let id = edge.id.clone();
	let on_click = move |ev: MouseEvent| {
		ev.stop_propagation();
		canvas.update(|c| {
			c.engine_mut().select_edge(&id, ev.ctrl_key() || ev.meta_key());
		});
	};

	let (x1, y1) = (from.x.to_string(), from.y.to_string());
	let (x2, y2) = (to.x.to_string(), to.y.to_string());
	Some(view! {
		<g class=class data-path=edge.data.path_type.as_str() on:click=on_click>
			<line
				class="flow-edge-hit"
				x1=x1.clone()
				y1=y1.clone()
				x2=x2.clone()
				y2=y2.clone()
				stroke="transparent"
				stroke-width=hit_width
				style=hit_style
			/>
			<line class="flow-edge-path" x1=x1 y1=y1 x2=x2 y2=y2 />
		</g>
	})
}

/// Node palette plus the freeze and duplicate actions.
#[component]
pub fn Toolbar(
	/// Draggable type tags.
	node_types: Vec<String>,
	/// Current frozen flag.
	#[prop(into)]
	frozen: Signal<bool>,
	/// Freeze button handler.
	on_toggle_freeze: Callback<()>,
	/// Duplicate button handler.
	on_duplicate: Callback<()>,
) -> impl IntoView {
	let dnd = DragAndDrop::new();
	let items = node_types
		.into_iter()
		.map(|node_type| {
			let payload = DragPayload::NodeType(node_type.clone());
			view! {
				<div
					class="toolbar-item"
					draggable="true"
					on:dragstart=move |ev: DragEvent| dnd.on_drag_start(&ev, &payload)
				>
					{node_type}
				</div>
			}
		})
		.collect_view();

	view! {
		<aside class="flow-toolbar">
			{items}
			<button on:click=move |_| on_toggle_freeze.run(())>
				{move || if frozen.get() { "Unfreeze" } else { "Freeze" }}
			</button>
			<button on:click=move |_| on_duplicate.run(())>"Duplicate"</button>
		</aside>
	}
}

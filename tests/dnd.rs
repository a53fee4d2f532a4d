mod common;

use common::{MemoryTransfer, SyntheticDragEvent, canvas, node};
use flow_canvas::{
	DROPPED_NODE_HEIGHT, DROPPED_NODE_WIDTH, DragAndDrop, DragPayload, DropOutcome, FixedClock,
	NODE_TYPE_FORMAT, NodeIdSource, SNAPSHOT_FORMAT, ViewTransform, XYPosition,
};
use serde_json::json;

#[test]
fn drag_over_allows_a_move_drop() {
	let transfer = MemoryTransfer::default();
	let event = SyntheticDragEvent::at(0.0, 0.0, transfer.clone());
	DragAndDrop::new().on_drag_over(&event);
	assert!(event.default_prevented.get());
	assert_eq!(transfer.0.borrow().drop_effect.as_deref(), Some("move"));
}

#[test]
fn drag_over_without_transfer_still_prevents_default() {
	let event = SyntheticDragEvent::default();
	DragAndDrop::new().on_drag_over(&event);
	assert!(event.default_prevented.get());
}

#[test]
fn node_type_drop_creates_a_node_in_flow_space() {
	let clock = FixedClock::new(0);
	let mut canvas = canvas(vec![], &clock);
	// (100, 200) -> ((100 - 0) / 2, (200 - 20) / 2) = (50, 90)
	canvas.engine_mut().set_transform(ViewTransform {
		x: 0.0,
		y: 20.0,
		k: 2.0,
	});
	let ids = NodeIdSource::new();
	let dnd = DragAndDrop::with_ids(&ids);
	let event = SyntheticDragEvent::at(
		100.0,
		200.0,
		MemoryTransfer::with(&[(NODE_TYPE_FORMAT, "custom-a")]),
	);

	let outcome = dnd.on_drop(&event, &mut canvas);

	assert_eq!(canvas.nodes().len(), 1);
	let created = &canvas.nodes()[0];
	assert_eq!(outcome, DropOutcome::Created(created.clone()));
	assert_eq!(created.id, "dnd-node-0");
	assert_eq!(created.node_type, "custom-a");
	assert_eq!(created.position, XYPosition::new(50.0, 90.0));
	assert_eq!(created.width, Some(DROPPED_NODE_WIDTH));
	assert_eq!(created.height, Some(DROPPED_NODE_HEIGHT));
	assert_eq!((DROPPED_NODE_WIDTH, DROPPED_NODE_HEIGHT), (220.0, 150.0));
	assert_eq!(created.data["title"], "New Node");
	assert_eq!(created.data["content"], "Double-click to open...");
}

#[test]
fn snapshot_drop_inserts_nothing() {
	let clock = FixedClock::new(0);
	let mut canvas = canvas(vec![node("a", 0.0, 0.0)], &clock);
	let event = SyntheticDragEvent::at(
		10.0,
		10.0,
		MemoryTransfer::with(&[(SNAPSHOT_FORMAT, r#"{"id":"a"}"#), (NODE_TYPE_FORMAT, "custom-a")]),
	);

	assert_eq!(DragAndDrop::new().on_drop(&event, &mut canvas), DropOutcome::Snapshot);
	assert_eq!(canvas.nodes().len(), 1);
}

#[test]
fn empty_drops_are_ignored() {
	let clock = FixedClock::new(0);
	let mut canvas = canvas(vec![], &clock);
	let dnd = DragAndDrop::new();

	let bare = SyntheticDragEvent::default();
	assert_eq!(dnd.on_drop(&bare, &mut canvas), DropOutcome::Ignored);

	let blank = SyntheticDragEvent::at(0.0, 0.0, MemoryTransfer::with(&[(NODE_TYPE_FORMAT, "")]));
	assert_eq!(dnd.on_drop(&blank, &mut canvas), DropOutcome::Ignored);
	assert!(canvas.nodes().is_empty());
}

#[test]
fn drop_ids_do_not_collide_across_canvases() {
	let clock = FixedClock::new(0);
	let mut main = canvas(vec![], &clock);
	let mut sub = canvas(vec![], &clock);
	let dnd = DragAndDrop::new();
	let drop = || SyntheticDragEvent::at(0.0, 0.0, MemoryTransfer::with(&[(NODE_TYPE_FORMAT, "t")]));

	let DropOutcome::Created(first) = dnd.on_drop(&drop(), &mut main) else {
		panic!("expected a node");
	};
	let DropOutcome::Created(second) = DragAndDrop::new().on_drop(&drop(), &mut sub) else {
		panic!("expected a node");
	};
	assert_ne!(first.id, second.id);
}

#[test]
fn dropped_ids_differ_from_duplicate_ids() {
	let clock = FixedClock::new(0);
	let mut canvas = canvas(vec![], &clock);
	let ids = NodeIdSource::new();
	let drop = SyntheticDragEvent::at(0.0, 0.0, MemoryTransfer::with(&[(NODE_TYPE_FORMAT, "t")]));
	let DropOutcome::Created(dropped) = DragAndDrop::with_ids(&ids).on_drop(&drop, &mut canvas) else {
		panic!("expected a node");
	};
	canvas.engine_mut().select_node(&dropped.id, false);
	let duplicate = canvas.duplicate_selected_node().unwrap();
	assert_eq!(dropped.id, "dnd-node-0");
	assert_eq!(duplicate, "node-main-0");
}

#[test]
fn drag_start_routes_payload_by_intent() {
	let dnd = DragAndDrop::new();

	let toolbar = MemoryTransfer::default();
	dnd.on_drag_start(
		&SyntheticDragEvent::at(0.0, 0.0, toolbar.clone()),
		&DragPayload::NodeType("custom-b".into()),
	);
	assert_eq!(toolbar.raw(NODE_TYPE_FORMAT).as_deref(), Some("custom-b"));
	assert_eq!(toolbar.raw(SNAPSHOT_FORMAT), None);
	assert_eq!(toolbar.0.borrow().effect_allowed.as_deref(), Some("move"));

	let existing = MemoryTransfer::default();
	let snapshot = json!({ "id": "a", "data": { "title": "A" } });
	dnd.on_drag_start(
		&SyntheticDragEvent::at(0.0, 0.0, existing.clone()),
		&DragPayload::Snapshot(snapshot.clone()),
	);
	let raw = existing.raw(SNAPSHOT_FORMAT).unwrap();
	assert_eq!(serde_json::from_str::<serde_json::Value>(&raw).unwrap(), snapshot);
	assert_eq!(existing.raw(NODE_TYPE_FORMAT), None);
	assert_eq!(existing.0.borrow().effect_allowed.as_deref(), Some("copy"));
}

#[test]
fn dragged_snapshot_is_passed_through_on_drop() {
	let clock = FixedClock::new(0);
	let mut canvas = canvas(vec![node("a", 0.0, 0.0)], &clock);
	let dnd = DragAndDrop::new();
	let transfer = MemoryTransfer::default();
	let snapshot = serde_json::to_value(canvas.find_node("a").unwrap()).unwrap();
	dnd.on_drag_start(
		&SyntheticDragEvent::at(0.0, 0.0, transfer.clone()),
		&DragPayload::Snapshot(snapshot),
	);

	let outcome = dnd.on_drop(&SyntheticDragEvent::at(5.0, 5.0, transfer), &mut canvas);
	assert_eq!(outcome, DropOutcome::Snapshot);
	assert_eq!(canvas.nodes().len(), 1);
}

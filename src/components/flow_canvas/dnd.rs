//! Drag-and-drop between the toolbar, existing nodes and the pane.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};
use serde_json::{Value, json};

use super::canvas::Canvas;
use super::clock::Clock;
use super::engine::FlowEngine;
use super::types::{Node, NodeData, XYPosition};

/// Data-transfer format carrying a plain node type tag.
pub const NODE_TYPE_FORMAT: &str = "application/vueflow";
/// Data-transfer format carrying a serialized node snapshot.
pub const SNAPSHOT_FORMAT: &str = "application/vueflow-snapshot";
/// Width of nodes created by a drop.
pub const DROPPED_NODE_WIDTH: f64 = 220.0;
/// Height of nodes created by a drop.
pub const DROPPED_NODE_HEIGHT: f64 = 150.0;

/// The slice of the DOM `DataTransfer` the bridge needs.
pub trait FlowDataTransfer {
	/// Channel content, `None` when absent or empty.
	fn get_data(&self, format: &str) -> Option<String>;
	/// Writes a channel.
	fn set_data(&self, format: &str, data: &str);
	/// Sets the drop effect shown while hovering a target.
	fn set_drop_effect(&self, effect: &str);
	/// Sets the effects the drag source allows.
	fn set_effect_allowed(&self, effect: &str);
}

/// The slice of the DOM `DragEvent` the bridge needs.
pub trait FlowDragEvent {
	/// Data transfer handle type.
	type Transfer: FlowDataTransfer;
	/// Suppresses the platform default.
	fn prevent_default(&self);
	/// Pointer position in client coordinates.
	fn client_position(&self) -> XYPosition;
	/// The attached data transfer, if any.
	fn data_transfer(&self) -> Option<Self::Transfer>;
}

impl FlowDataTransfer for web_sys::DataTransfer {
	fn get_data(&self, format: &str) -> Option<String> {
		web_sys::DataTransfer::get_data(self, format)
			.ok()
			.filter(|data| !data.is_empty())
	}

	fn set_data(&self, format: &str, data: &str) {
		if let Err(err) = web_sys::DataTransfer::set_data(self, format, data) {
			warn!("could not write {format} to the data transfer: {err:?}");
		}
	}

	fn set_drop_effect(&self, effect: &str) {
		web_sys::DataTransfer::set_drop_effect(self, effect);
	}

	fn set_effect_allowed(&self, effect: &str) {
		web_sys::DataTransfer::set_effect_allowed(self, effect);
	}
}

impl FlowDragEvent for web_sys::DragEvent {
	type Transfer = web_sys::DataTransfer;

	fn prevent_default(&self) {
		web_sys::Event::prevent_default(self);
	}

	fn client_position(&self) -> XYPosition {
		XYPosition::new(self.client_x() as f64, self.client_y() as f64)
	}

	fn data_transfer(&self) -> Option<web_sys::DataTransfer> {
		web_sys::DragEvent::data_transfer(self)
	}
}

/// What a drag source puts on the wire.
#[derive(Clone, Debug, PartialEq)]
pub enum DragPayload {
	/// A toolbar item: create a node of this type on drop.
	NodeType(String),
	/// An existing node's snapshot, interpreted by whoever accepts the drop.
	Snapshot(Value),
}

/// Result of [`DragAndDrop::on_drop`].
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
	/// A node was created and inserted.
	Created(Node),
	/// A snapshot was dropped; another collaborator owns it.
	Snapshot,
	/// Nothing recognisable was dropped.
	Ignored,
}

/// Process-lifetime counter for drop-created node ids.
#[derive(Debug, Default)]
pub struct NodeIdSource {
	next: AtomicU64,
}

static SHARED_IDS: NodeIdSource = NodeIdSource::new();

impl NodeIdSource {
	/// A fresh counter starting at zero.
	pub const fn new() -> Self {
		Self {
			next: AtomicU64::new(0),
		}
	}

	/// The instance shared by every bridge in the process.
	pub fn shared() -> &'static NodeIdSource {
		&SHARED_IDS
	}

	/// Mints `dnd-node-{n}`.
	pub fn next_id(&self) -> String {
		format!("dnd-node-{}", self.next.fetch_add(1, Ordering::Relaxed))
	}
}

/// Translates drag events into canvas mutations.
#[derive(Clone, Copy, Debug)]
pub struct DragAndDrop<'a> {
	ids: &'a NodeIdSource,
}

impl Default for DragAndDrop<'static> {
	fn default() -> Self {
		Self::new()
	}
}

impl DragAndDrop<'static> {
	/// A bridge minting ids from [`NodeIdSource::shared`].
	pub fn new() -> Self {
		Self::with_ids(NodeIdSource::shared())
	}
}

impl<'a> DragAndDrop<'a> {
	/// A bridge minting ids from `ids`.
	pub fn with_ids(ids: &'a NodeIdSource) -> Self {
		Self { ids }
	}

	/// Allows dropping on the pane.
	pub fn on_drag_over<Ev: FlowDragEvent>(&self, event: &Ev) {
		event.prevent_default();
		if let Some(transfer) = event.data_transfer() {
			transfer.set_drop_effect("move");
		}
	}

	/// Creates a node for a dropped type tag. Snapshot drops are left to the
	/// node that accepted them.
	pub fn on_drop<Ev, E, C>(&self, event: &Ev, canvas: &mut Canvas<E, C>) -> DropOutcome
	where
		Ev: FlowDragEvent,
		E: FlowEngine,
		C: Clock,
	{
		let Some(transfer) = event.data_transfer() else {
			return DropOutcome::Ignored;
		};
		if transfer.get_data(SNAPSHOT_FORMAT).is_some() {
			debug!("[{}] snapshot drop passed through", canvas.graph_id());
			return DropOutcome::Snapshot;
		}
		let Some(node_type) = transfer.get_data(NODE_TYPE_FORMAT) else {
			debug!("[{}] drop without a known payload ignored", canvas.graph_id());
			return DropOutcome::Ignored;
		};

		let position = canvas.project(event.client_position());
		let node = Node {
			width: Some(DROPPED_NODE_WIDTH),
			height: Some(DROPPED_NODE_HEIGHT),
			..Node::new(self.ids.next_id(), node_type, position).with_data(placeholder_data())
		};
		debug!(
			"[{}] dropped {} `{}` at ({}, {})",
			canvas.graph_id(),
			node.node_type,
			node.id,
			position.x,
			position.y
		);
		canvas.add_nodes(vec![node.clone()]);
		DropOutcome::Created(node)
	}

	/// Writes `payload` to the matching channel.
	pub fn on_drag_start<Ev: FlowDragEvent>(&self, event: &Ev, payload: &DragPayload) {
		let Some(transfer) = event.data_transfer() else {
			return;
		};
		match payload {
			DragPayload::Snapshot(snapshot) => match serde_json::to_string(snapshot) {
				Ok(raw) => {
					transfer.set_data(SNAPSHOT_FORMAT, &raw);
					transfer.set_effect_allowed("copy");
				}
				Err(err) => warn!("could not serialize drag snapshot: {err}"),
			},
			DragPayload::NodeType(node_type) => {
				transfer.set_data(NODE_TYPE_FORMAT, node_type);
				transfer.set_effect_allowed("move");
			}
		}
	}
}

fn placeholder_data() -> NodeData {
	let mut data = NodeData::new();
	data.insert("title".to_owned(), json!("New Node"));
	data.insert("content".to_owned(), json!("Double-click to open..."));
	data
}

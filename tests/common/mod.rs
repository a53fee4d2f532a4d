#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use flow_canvas::{
	Canvas, CanvasOptions, Edge, FixedClock, FlowDataTransfer, FlowDragEvent, FlowEngine,
	FlowState, Node, XYPosition,
};

#[derive(Debug, Default)]
pub struct TransferState {
	pub data: HashMap<String, String>,
	pub drop_effect: Option<String>,
	pub effect_allowed: Option<String>,
}

/// A data transfer handle whose clones share state, like the DOM one.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransfer(pub Rc<RefCell<TransferState>>);

impl MemoryTransfer {
	pub fn with(entries: &[(&str, &str)]) -> Self {
		let transfer = Self::default();
		for (format, data) in entries {
			transfer.set_data(format, data);
		}
		transfer
	}

	pub fn raw(&self, format: &str) -> Option<String> {
		self.0.borrow().data.get(format).cloned()
	}
}

impl FlowDataTransfer for MemoryTransfer {
	fn get_data(&self, format: &str) -> Option<String> {
		self.raw(format).filter(|data| !data.is_empty())
	}

	fn set_data(&self, format: &str, data: &str) {
		self.0.borrow_mut().data.insert(format.to_owned(), data.to_owned());
	}

	fn set_drop_effect(&self, effect: &str) {
		self.0.borrow_mut().drop_effect = Some(effect.to_owned());
	}

	fn set_effect_allowed(&self, effect: &str) {
		self.0.borrow_mut().effect_allowed = Some(effect.to_owned());
	}
}

#[derive(Debug, Default)]
pub struct SyntheticDragEvent {
	pub client: XYPosition,
	pub transfer: Option<MemoryTransfer>,
	pub default_prevented: std::cell::Cell<bool>,
}

impl SyntheticDragEvent {
	pub fn at(x: f64, y: f64, transfer: MemoryTransfer) -> Self {
		Self {
			client: XYPosition::new(x, y),
			transfer: Some(transfer),
			..Self::default()
		}
	}
}

impl FlowDragEvent for SyntheticDragEvent {
	type Transfer = MemoryTransfer;

	fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	fn client_position(&self) -> XYPosition {
		self.client
	}

	fn data_transfer(&self) -> Option<MemoryTransfer> {
		self.transfer.clone()
	}
}

pub fn node(id: &str, x: f64, y: f64) -> Node {
	Node::new(id, "custom-a", XYPosition::new(x, y))
}

pub fn canvas<'c>(nodes: Vec<Node>, clock: &'c FixedClock) -> Canvas<FlowState, &'c FixedClock> {
	Canvas::with_clock("main", FlowState::with_nodes(nodes), CanvasOptions::default(), clock)
}

/// A removal call seen by [`RecordingEngine`].
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
	RemoveEdges(Vec<String>),
	RemoveNodes(Vec<String>),
}

/// Delegates to a `FlowState`, logs removals in call order and reports
/// `selection` as-is, without the selectable check `FlowState` applies.
#[derive(Debug, Default)]
pub struct RecordingEngine {
	pub inner: FlowState,
	pub calls: Vec<EngineCall>,
	pub selection: Vec<String>,
}

impl FlowEngine for RecordingEngine {
	fn add_nodes(&mut self, nodes: Vec<Node>) {
		self.inner.add_nodes(nodes);
	}

	fn add_edges(&mut self, edges: Vec<Edge>) {
		self.inner.add_edges(edges);
	}

	fn remove_nodes(&mut self, ids: &[String]) {
		self.calls.push(EngineCall::RemoveNodes(ids.to_vec()));
		self.inner.remove_nodes(ids);
	}

	fn remove_edges(&mut self, ids: &[String]) {
		self.calls.push(EngineCall::RemoveEdges(ids.to_vec()));
		self.inner.remove_edges(ids);
	}

	fn nodes(&self) -> &[Node] {
		self.inner.nodes()
	}

	fn edges(&self) -> &[Edge] {
		self.inner.edges()
	}

	fn selected_nodes(&self) -> Vec<Node> {
		self.selection
			.iter()
			.filter_map(|id| self.inner.find_node(id))
			.cloned()
			.collect()
	}

	fn visit_nodes_mut(&mut self, visit: &mut dyn FnMut(&mut Node)) {
		self.inner.visit_nodes_mut(visit);
	}

	fn screen_to_flow_coordinate(&self, position: XYPosition) -> XYPosition {
		self.inner.screen_to_flow_coordinate(position)
	}

	fn on_pane_mouse_move(&mut self, listener: Box<dyn Fn(XYPosition)>) {
		self.inner.on_pane_mouse_move(listener);
	}
}

pub fn recording_canvas<'c>(
	nodes: Vec<Node>,
	clock: &'c FixedClock,
) -> Canvas<RecordingEngine, &'c FixedClock> {
	let engine = RecordingEngine {
		inner: FlowState::with_nodes(nodes),
		..RecordingEngine::default()
	};
	Canvas::with_clock("main", engine, CanvasOptions::default(), clock)
}

//! Graph mutations with identity, cascade and interactivity rules on top of a
//! [`FlowEngine`].

use log::debug;
use serde_json::json;

use super::clock::{Clock, SystemClock};
use super::config::CanvasOptions;
use super::engine::{EngineEvent, FlowEngine};
use super::state::FlowState;
use super::types::{Connection, Edge, EdgeData, Node, XYPosition};

/// Offset applied to a duplicate relative to its original, on both axes.
pub const DUPLICATE_OFFSET: f64 = 40.0;
/// Renderer tag of every edge created by [`Canvas::connect`].
pub const EDGE_TYPE: &str = "custom";
/// Pointer hit width of new edges.
pub const EDGE_INTERACTION_WIDTH: f64 = 30.0;

/// One canvas scope: an engine plus the frozen flag and the duplication counter.
#[derive(Debug)]
pub struct Canvas<E, C = SystemClock> {
	graph_id: String,
	engine: E,
	options: CanvasOptions,
	clock: C,
	frozen: bool,
	node_id_counter: u64,
}

impl<E: FlowEngine> Canvas<E> {
	/// An interactive canvas over `engine`, stamping edges with wall-clock time.
	pub fn new(graph_id: impl Into<String>, engine: E, options: CanvasOptions) -> Self {
		Self::with_clock(graph_id, engine, options, SystemClock)
	}
}

impl<E: FlowEngine, C: Clock> Canvas<E, C> {
	/// Like [`Canvas::new`] with an explicit clock.
	pub fn with_clock(
		graph_id: impl Into<String>,
		engine: E,
		options: CanvasOptions,
		clock: C,
	) -> Self {
		let node_id_counter = engine.nodes().len() as u64;
		Self {
			graph_id: graph_id.into(),
			engine,
			options,
			clock,
			frozen: false,
			node_id_counter,
		}
	}

	/// Scope name used to namespace generated node ids.
	pub fn graph_id(&self) -> &str {
		&self.graph_id
	}

	/// Construction-time options.
	pub fn options(&self) -> &CanvasOptions {
		&self.options
	}

	/// Whether node interaction is currently disabled.
	pub fn is_frozen(&self) -> bool {
		self.frozen
	}

	/// The underlying engine.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// The underlying engine, mutably.
	pub fn engine_mut(&mut self) -> &mut E {
		&mut self.engine
	}

	/// Dispatches an event raised by the engine.
	pub fn handle_event(&mut self, event: EngineEvent) {
		match event {
			EngineEvent::Connect(connection) => {
				self.connect(connection);
			}
		}
	}

	/// Creates an edge for an already validated connection and returns its id.
	pub fn connect(&mut self, connection: Connection) -> String {
		let id = self.edge_id(&connection);
		debug!("[{}] connect {} -> {} as {id}", self.graph_id, connection.source, connection.target);
		let edge = Edge {
			id: id.clone(),
			source: connection.source,
			target: connection.target,
			source_handle: connection.source_handle,
			target_handle: connection.target_handle,
			edge_type: EDGE_TYPE.to_owned(),
			interaction_width: EDGE_INTERACTION_WIDTH,
			selectable: true,
			data: EdgeData {
				animated: true,
				path_type: self.options.path_type,
			},
		};
		self.engine.add_edges(vec![edge]);
		id
	}

	/// Removes a node and, first, every edge touching it.
	pub fn delete_node(&mut self, node_id: &str) {
		if node_id.is_empty() {
			return;
		}
		let incident: Vec<String> = self
			.engine
			.edges()
			.iter()
			.filter(|edge| edge.touches(node_id))
			.map(|edge| edge.id.clone())
			.collect();
		if !incident.is_empty() {
			debug!("[{}] removing {} edge(s) of {node_id}", self.graph_id, incident.len());
			self.engine.remove_edges(&incident);
		}
		self.engine.remove_nodes(&[node_id.to_owned()]);
	}

	/// Removes a single edge.
	pub fn delete_edge(&mut self, edge_id: &str) {
		if edge_id.is_empty() {
			return;
		}
		self.engine.remove_edges(&[edge_id.to_owned()]);
	}

	/// Flips the frozen flag and applies it to every current node except the
	/// sentinel. Returns the new flag.
	pub fn toggle_freeze(&mut self) -> bool {
		self.frozen = !self.frozen;
		let interactive = !self.frozen;
		self.engine.visit_nodes_mut(&mut |node| {
			if !node.is_sentinel() {
				node.draggable = interactive;
				node.selectable = interactive;
			}
		});
		debug!("[{}] frozen = {}", self.graph_id, self.frozen);
		self.frozen
	}

	/// Copies the single selected node next to itself. Returns the new id, or
	/// `None` when the selection is not exactly one non-sentinel node.
	pub fn duplicate_selected_node(&mut self) -> Option<String> {
		let selected = self.engine.selected_nodes();
		let [original] = selected.as_slice() else {
			debug!("[{}] duplicate needs exactly one selected node, got {}", self.graph_id, selected.len());
			return None;
		};
		if original.is_sentinel() {
			return None;
		}

		let mut data = original.data.clone();
		data.insert("connections".to_owned(), json!({ "in": [], "out": [] }));
		let node = Node {
			id: self.next_node_id(),
			node_type: original.node_type.clone(),
			position: original.position.offset(DUPLICATE_OFFSET, DUPLICATE_OFFSET),
			width: original.width.filter(|width| *width != 0.0),
			height: original.height.filter(|height| *height != 0.0),
			data,
			draggable: true,
			selectable: true,
		};
		let id = node.id.clone();
		debug!("[{}] duplicated {} as {id}", self.graph_id, original.id);
		self.engine.add_nodes(vec![node]);
		Some(id)
	}

	/// Inserts nodes as given.
	pub fn add_nodes(&mut self, nodes: Vec<Node>) {
		self.engine.add_nodes(nodes);
	}

	/// Inserts edges as given.
	pub fn add_edges(&mut self, edges: Vec<Edge>) {
		self.engine.add_edges(edges);
	}

	/// Looks up a node.
	pub fn find_node(&self, id: &str) -> Option<&Node> {
		self.engine.find_node(id)
	}

	/// Current nodes.
	pub fn nodes(&self) -> &[Node] {
		self.engine.nodes()
	}

	/// Current edges.
	pub fn edges(&self) -> &[Edge] {
		self.engine.edges()
	}

	/// Currently selected nodes.
	pub fn selected_nodes(&self) -> Vec<Node> {
		self.engine.selected_nodes()
	}

	/// Maps a client position into flow space.
	pub fn project(&self, position: XYPosition) -> XYPosition {
		self.engine.screen_to_flow_coordinate(position)
	}

	/// Registers a pane pointer-move listener on the engine.
	pub fn on_pane_mouse_move(&mut self, listener: impl Fn(XYPosition) + 'static) {
		self.engine.on_pane_mouse_move(Box::new(listener));
	}

	fn edge_id(&self, connection: &Connection) -> String {
		let base = format!(
			"edge--{}({})--{}({})--{}",
			connection.source,
			connection.source_handle.as_deref().unwrap_or_default(),
			connection.target,
			connection.target_handle.as_deref().unwrap_or_default(),
			self.clock.now_millis(),
		);
		let taken = |id: &str| self.engine.edges().iter().any(|edge| edge.id == id);
		let mut id = base.clone();
		let mut suffix = 1;
		while taken(&id) {
			id = format!("{base}-{suffix}");
			suffix += 1;
		}
		id
	}

	fn next_node_id(&mut self) -> String {
		loop {
			let id = format!("node-{}-{}", self.graph_id, self.node_id_counter);
			self.node_id_counter += 1;
			if self.engine.find_node(&id).is_none() {
				return id;
			}
		}
	}
}

impl<C: Clock> Canvas<FlowState, C> {
	/// Deletes the selected edges, then the selected nodes with their edges.
	pub fn delete_selection(&mut self) {
		for id in self.engine.selected_edge_ids() {
			self.delete_edge(&id);
		}
		for id in self.engine.selected_ids() {
			self.delete_node(&id);
		}
	}
}

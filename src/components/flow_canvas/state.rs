use std::collections::HashSet;
use std::fmt;

use log::warn;

use super::engine::{EngineEvent, FlowEngine};
use super::types::{Connection, Edge, Node, XYPosition};

/// Pan/zoom of the pane: `screen = flow * k + (x, y)`, relative to the pane origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Horizontal pan in pixels.
	pub x: f64,
	/// Vertical pan in pixels.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

type MouseMoveListener = Box<dyn Fn(XYPosition)>;

/// In-memory diagram engine backing one canvas scope.
#[derive(Default)]
pub struct FlowState {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	selected: HashSet<String>,
	selected_edges: HashSet<String>,
	/// Current pan/zoom.
	pub transform: ViewTransform,
	/// Top-left corner of the pane in client coordinates.
	pub origin: XYPosition,
	mouse_move: Vec<MouseMoveListener>,
}

impl fmt::Debug for FlowState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FlowState")
			.field("nodes", &self.nodes.len())
			.field("edges", &self.edges.len())
			.field("selected", &self.selected)
			.field("selected_edges", &self.selected_edges)
			.field("transform", &self.transform)
			.field("origin", &self.origin)
			.finish_non_exhaustive()
	}
}

impl FlowState {
	/// An empty engine with an identity transform.
	pub fn new() -> Self {
		Self::default()
	}

	/// An engine seeded with `nodes`.
	pub fn with_nodes(nodes: Vec<Node>) -> Self {
		let mut state = Self::new();
		state.add_nodes(nodes);
		state
	}

	/// Records where the pane sits on screen.
	pub fn set_origin(&mut self, origin: XYPosition) {
		self.origin = origin;
	}

	/// Replaces the pan/zoom.
	pub fn set_transform(&mut self, transform: ViewTransform) {
		self.transform = transform;
	}

	/// Inverse of [`screen_to_graph`](Self::screen_to_graph).
	pub fn graph_to_screen(&self, position: XYPosition) -> XYPosition {
		XYPosition::new(
			position.x * self.transform.k + self.transform.x,
			position.y * self.transform.k + self.transform.y,
		)
	}

	/// Maps a pane-local point into flow space.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> XYPosition {
		XYPosition::new(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Adds `id` to the selection if the node exists and is selectable.
	/// Without `additive` the previous selection, nodes and edges, is replaced.
	pub fn select_node(&mut self, id: &str, additive: bool) -> bool {
		let Some(node) = self.find_node(id) else {
			return false;
		};
		if !node.selectable {
			return false;
		}
		if !additive {
			self.clear_selection();
		}
		self.selected.insert(id.to_owned())
	}

	/// Edge counterpart of [`select_node`](Self::select_node).
	pub fn select_edge(&mut self, id: &str, additive: bool) -> bool {
		let Some(edge) = self.edges.iter().find(|edge| edge.id == id) else {
			return false;
		};
		if !edge.selectable {
			return false;
		}
		if !additive {
			self.clear_selection();
		}
		self.selected_edges.insert(id.to_owned())
	}

	/// Empties the selection.
	pub fn clear_selection(&mut self) {
		self.selected.clear();
		self.selected_edges.clear();
	}

	/// Whether `id` is currently selected.
	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.contains(id)
	}

	/// Ids of the selected nodes, in node order.
	pub fn selected_ids(&self) -> Vec<String> {
		self.nodes
			.iter()
			.filter(|node| self.selected.contains(&node.id))
			.map(|node| node.id.clone())
			.collect()
	}

	/// Whether the edge `id` is currently selected.
	pub fn is_edge_selected(&self, id: &str) -> bool {
		self.selected_edges.contains(id)
	}

	/// Ids of the selected edges, in edge order.
	pub fn selected_edge_ids(&self) -> Vec<String> {
		self.edges
			.iter()
			.filter(|edge| self.selected_edges.contains(&edge.id))
			.map(|edge| edge.id.clone())
			.collect()
	}

	/// Validates a proposed connection. Only connections between two distinct
	/// existing nodes are passed on.
	pub fn connect_intent(&self, connection: Connection) -> Option<EngineEvent> {
		let legal = connection.source != connection.target
			&& self.find_node(&connection.source).is_some()
			&& self.find_node(&connection.target).is_some();
		legal.then_some(EngineEvent::Connect(connection))
	}

	/// Feeds a client-space pointer position to the pane listeners.
	pub fn pane_mouse_move(&self, client: XYPosition) {
		let position = self.screen_to_flow_coordinate(client);
		for listener in &self.mouse_move {
			listener(position);
		}
	}
}

impl FlowEngine for FlowState {
	fn add_nodes(&mut self, nodes: Vec<Node>) {
		for mut node in nodes {
			if self.find_node(&node.id).is_some() {
				warn!("node `{}` already exists, skipping insert", node.id);
				continue;
			}
			if node.is_sentinel() {
				node.draggable = false;
				node.selectable = false;
			}
			self.nodes.push(node);
		}
	}

	fn add_edges(&mut self, edges: Vec<Edge>) {
		for edge in edges {
			if self.edges.iter().any(|e| e.id == edge.id) {
				warn!("edge `{}` already exists, skipping insert", edge.id);
				continue;
			}
			if self.find_node(&edge.source).is_none() || self.find_node(&edge.target).is_none() {
				warn!("edge `{}` references a missing node, skipping insert", edge.id);
				continue;
			}
			self.edges.push(edge);
		}
	}

	fn remove_nodes(&mut self, ids: &[String]) {
		self.nodes.retain(|node| !ids.contains(&node.id));
		self.selected.retain(|id| !ids.contains(id));
	}

	fn remove_edges(&mut self, ids: &[String]) {
		self.edges.retain(|edge| !ids.contains(&edge.id));
		self.selected_edges.retain(|id| !ids.contains(id));
	}

	fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	fn edges(&self) -> &[Edge] {
		&self.edges
	}

	fn selected_nodes(&self) -> Vec<Node> {
		self.nodes
			.iter()
			.filter(|node| self.selected.contains(&node.id))
			.cloned()
			.collect()
	}

	fn visit_nodes_mut(&mut self, visit: &mut dyn FnMut(&mut Node)) {
		self.nodes.iter_mut().for_each(visit);
	}

	fn screen_to_flow_coordinate(&self, position: XYPosition) -> XYPosition {
		self.screen_to_graph(position.x - self.origin.x, position.y - self.origin.y)
	}

	fn on_pane_mouse_move(&mut self, listener: Box<dyn Fn(XYPosition)>) {
		self.mouse_move.push(listener);
	}
}

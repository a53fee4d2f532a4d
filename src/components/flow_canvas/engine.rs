//! The capability surface the canvas consumes from the diagram engine.

use super::types::{Connection, Edge, Node, XYPosition};

/// Primitive graph operations of one canvas scope.
///
/// Implementations store nodes and edges and know the viewport; they do not
/// cascade removals, mint identifiers or enforce interactivity rules. The
/// [`Canvas`](super::Canvas) facade layers those on top.
pub trait FlowEngine {
	/// Inserts nodes.
	fn add_nodes(&mut self, nodes: Vec<Node>);

	/// Inserts edges.
	fn add_edges(&mut self, edges: Vec<Edge>);

	/// Removes nodes by id. Unknown ids are ignored. Incident edges are left alone.
	fn remove_nodes(&mut self, ids: &[String]);

	/// Removes edges by id. Unknown ids are ignored.
	fn remove_edges(&mut self, ids: &[String]);

	/// Current nodes.
	fn nodes(&self) -> &[Node];

	/// Current edges.
	fn edges(&self) -> &[Edge];

	/// Snapshot of the currently selected nodes.
	fn selected_nodes(&self) -> Vec<Node>;

	/// Looks up a node by id.
	fn find_node(&self, id: &str) -> Option<&Node> {
		self.nodes().iter().find(|node| node.id == id)
	}

	/// Runs `visit` over every node, allowing in-place edits.
	fn visit_nodes_mut(&mut self, visit: &mut dyn FnMut(&mut Node));

	/// Maps a client (screen) position into flow space.
	fn screen_to_flow_coordinate(&self, position: XYPosition) -> XYPosition;

	/// Registers a listener for pointer movement over the pane. Listeners
	/// receive flow coordinates.
	fn on_pane_mouse_move(&mut self, listener: Box<dyn Fn(XYPosition)>);
}

/// Events the engine raises towards the canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineEvent {
	/// A validated connect intent between two existing nodes.
	Connect(Connection),
}

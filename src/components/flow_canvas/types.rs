//! Node, edge and connection records used across the canvas modules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::CanvasError;

/// Reserved placeholder node. Never interactive, never duplicated.
pub const SENTINEL_NODE_ID: &str = "ghost-node";

/// Opaque node payload.
pub type NodeData = Map<String, Value>;

/// A point in either screen or flow space, depending on who hands it out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XYPosition {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl XYPosition {
	/// Shorthand constructor.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Returns this point shifted by `(dx, dy)`.
	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}
}

/// A diagram node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique within one canvas instance.
	pub id: String,
	/// Selects the node's rendering and behaviour.
	#[serde(rename = "type")]
	pub node_type: String,
	/// Top-left corner in flow space.
	pub position: XYPosition,
	/// Declared width, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<f64>,
	/// Declared height, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<f64>,
	/// Arbitrary payload, may carry a `connections` sub-structure.
	#[serde(default)]
	pub data: NodeData,
	/// Whether the pointer may move the node.
	#[serde(default = "interactive")]
	pub draggable: bool,
	/// Whether the node may join the selection.
	#[serde(default = "interactive")]
	pub selectable: bool,
}

fn interactive() -> bool {
	true
}

impl Node {
	/// A new interactive node with an empty payload and no declared size.
	pub fn new(id: impl Into<String>, node_type: impl Into<String>, position: XYPosition) -> Self {
		Self {
			id: id.into(),
			node_type: node_type.into(),
			position,
			width: None,
			height: None,
			data: NodeData::new(),
			draggable: true,
			selectable: true,
		}
	}

	/// Builder-style payload setter.
	pub fn with_data(mut self, data: NodeData) -> Self {
		self.data = data;
		self
	}

	/// Builder-style size setter.
	pub fn with_size(mut self, width: f64, height: f64) -> Self {
		self.width = Some(width);
		self.height = Some(height);
		self
	}

	/// True for the reserved placeholder node.
	pub fn is_sentinel(&self) -> bool {
		self.id == SENTINEL_NODE_ID
	}

	/// Node label used by the DOM projection.
	pub fn title(&self) -> &str {
		self.data
			.get("title")
			.and_then(Value::as_str)
			.unwrap_or(&self.node_type)
	}
}

/// How an edge path is drawn by the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathType {
	/// Cubic bezier curve.
	#[default]
	Bezier,
	/// Orthogonal segments with rounded corners.
	SmoothStep,
	/// Orthogonal segments with sharp corners.
	Step,
	/// Single straight segment.
	Straight,
}

impl PathType {
	/// Wire name understood by the renderer.
	pub fn as_str(self) -> &'static str {
		match self {
			PathType::Bezier => "bezier",
			PathType::SmoothStep => "smoothstep",
			PathType::Step => "step",
			PathType::Straight => "straight",
		}
	}
}

impl fmt::Display for PathType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PathType {
	type Err = CanvasError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"bezier" => Ok(PathType::Bezier),
			"smoothstep" => Ok(PathType::SmoothStep),
			"step" => Ok(PathType::Step),
			"straight" => Ok(PathType::Straight),
			other => Err(CanvasError::UnknownPathType(other.to_owned())),
		}
	}
}

/// Edge payload consumed by the custom edge renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
	/// Flowing-dash animation toggle.
	pub animated: bool,
	/// Path style.
	pub path_type: PathType,
}

/// A diagram edge. Endpoints are node ids, not references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Derived from endpoints, handles and creation time.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Handle on the source node.
	#[serde(default)]
	pub source_handle: Option<String>,
	/// Handle on the target node.
	#[serde(default)]
	pub target_handle: Option<String>,
	/// Renderer tag.
	#[serde(rename = "type")]
	pub edge_type: String,
	/// Width of the invisible pointer hit area.
	pub interaction_width: f64,
	/// Whether the edge may join the selection.
	pub selectable: bool,
	/// Renderer payload.
	pub data: EdgeData,
}

impl Edge {
	/// True when `node_id` is either endpoint.
	pub fn touches(&self, node_id: &str) -> bool {
		self.source == node_id || self.target == node_id
	}
}

/// A proposed connection, as emitted by the engine's connect intent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Handle on the source node.
	#[serde(default)]
	pub source_handle: Option<String>,
	/// Handle on the target node.
	#[serde(default)]
	pub target_handle: Option<String>,
}

impl Connection {
	/// A handle-less connection between two nodes.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			source_handle: None,
			target_handle: None,
		}
	}

	/// Builder-style handle setter.
	pub fn with_handles(
		mut self,
		source_handle: Option<&str>,
		target_handle: Option<&str>,
	) -> Self {
		self.source_handle = source_handle.map(str::to_owned);
		self.target_handle = target_handle.map(str::to_owned);
		self
	}
}

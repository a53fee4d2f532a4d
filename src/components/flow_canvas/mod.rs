mod canvas;
mod clock;
mod component;
mod config;
mod dnd;
mod engine;
mod error;
mod state;
mod types;

pub use canvas::{Canvas, DUPLICATE_OFFSET, EDGE_INTERACTION_WIDTH, EDGE_TYPE};
pub use clock::{Clock, FixedClock, SystemClock};
pub use component::{FlowCanvas, Toolbar};
pub use config::CanvasOptions;
pub use dnd::{
	DROPPED_NODE_HEIGHT, DROPPED_NODE_WIDTH, DragAndDrop, DragPayload, DropOutcome,
	FlowDataTransfer, FlowDragEvent, NODE_TYPE_FORMAT, NodeIdSource, SNAPSHOT_FORMAT,
};
pub use engine::{EngineEvent, FlowEngine};
pub use error::CanvasError;
pub use state::{FlowState, ViewTransform};
pub use types::{
	Connection, Edge, EdgeData, Node, NodeData, PathType, SENTINEL_NODE_ID, XYPosition,
};

use serde::{Deserialize, Serialize};

use super::error::CanvasError;
use super::types::PathType;

/// Per-canvas settings chosen at construction time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasOptions {
	/// Path style stamped onto every new edge.
	pub path_type: PathType,
}

impl CanvasOptions {
	/// Options with the given default edge path style.
	pub fn with_path_type(path_type: PathType) -> Self {
		Self { path_type }
	}

	/// Parses options handed over by the host page, e.g. `{"pathType":"smoothstep"}`.
	/// Missing fields fall back to their defaults.
	pub fn from_json(raw: &str) -> Result<Self, CanvasError> {
		Ok(serde_json::from_str(raw)?)
	}
}

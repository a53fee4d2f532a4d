use thiserror::Error;

/// Failures of the configuration surface. Graph mutations never fail; they
/// degrade to no-ops instead.
#[derive(Debug, Error)]
pub enum CanvasError {
	/// A path type name the renderer does not know.
	#[error("unknown edge path type `{0}`")]
	UnknownPathType(String),
	/// Canvas options that are not valid JSON for [`CanvasOptions`](super::CanvasOptions).
	#[error("invalid canvas options: {0}")]
	InvalidOptions(#[from] serde_json::Error),
}

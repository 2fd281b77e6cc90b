use thiserror::Error;

/// Errors surfaced while building or reconfiguring an editor session.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] beadweave_core::CoreError),
}

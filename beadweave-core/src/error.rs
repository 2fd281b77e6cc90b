use thiserror::Error;

/// Errors originating from the core layout engine.
///
/// Every layout and history algorithm is total; these only surface from the
/// validating constructors hosts use to build configuration.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid grid size: {0} (must be in {min}..={max})", min = crate::layout::GRID_MIN_SIZE, max = crate::layout::GRID_MAX_SIZE)]
    InvalidGridSize(usize),

    #[error("invalid rotation: {0}° (must be 0, 90, 180, or 270)")]
    InvalidRotation(i32),

    #[error("invalid fringe length: {0} (must be in {min}..={max})", min = crate::fringe::FRINGE_MIN_LENGTH, max = crate::fringe::FRINGE_MAX_LENGTH)]
    InvalidFringeLength(usize),

    #[error("invalid canvas: {reason}")]
    InvalidCanvas { reason: String },

    #[error("invalid bead id: {0:?}")]
    InvalidBeadId(String),
}

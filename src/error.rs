//! Error types for the simulation core
//!
//! Numeric degeneracies (coincident bodies, zero vectors) are guarded inside
//! the physics and never surface here. These errors are caller contract
//! violations: bad level data, bad tuning, or a control signal that does not
//! apply in the current phase.

use thiserror::Error;

/// Result type alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Main error type for simulation operations
#[derive(Error, Debug)]
pub enum SimError {
    /// Level selection outside the loaded level set
    #[error("unknown level {index} (have {count})")]
    UnknownLevel { index: usize, count: usize },

    /// Level data failed validation
    #[error("invalid level '{name}': {reason}")]
    InvalidLevel { name: String, reason: String },

    /// Physics tuning value out of range
    #[error("invalid tuning value {field} = {value}")]
    InvalidTuning { field: &'static str, value: f32 },

    /// Malformed level or tuning document
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Level or tuning file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Body exists but may not be dragged (obstacles, goals)
    #[error("body {0} cannot be moved")]
    NotDraggable(u32),

    /// No body with this id in the current level
    #[error("no body with id {0}")]
    UnknownBody(u32),

    /// Bodies can only be repositioned while the run is not active
    #[error("cannot reposition bodies while the simulation is running")]
    RunInProgress,
}

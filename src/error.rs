//! Error types for floe.
//!
//! Rejected point moves and zero-effect heat events are not errors; these
//! variants cover precondition breaches and configuration problems.

use thiserror::Error;

/// Result type alias using [`FloeError`].
pub type Result<T> = std::result::Result<T, FloeError>;

/// Errors that can occur while building or correcting a boundary.
#[derive(Error, Debug)]
pub enum FloeError {
    /// A polygon needs at least three points.
    #[error("polygon has {count} points, at least 3 are required")]
    TooFewPoints {
        /// Number of points supplied.
        count: usize,
    },

    /// Subdivision interval must be finite and positive.
    #[error("invalid subdivision interval {0}")]
    InvalidInterval(f32),

    /// Subdivision would produce more points than allowed.
    #[error("subdivision exceeds {max} points")]
    SubdivisionTooDense {
        /// The configured cap.
        max: usize,
    },

    /// A point coordinate is NaN or infinite.
    #[error("point {index} is not finite")]
    NonFinitePoint {
        /// Index of the offending point.
        index: usize,
    },

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Restored sheet state is inconsistent.
    #[error("corrupt sheet state: {0}")]
    CorruptState(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

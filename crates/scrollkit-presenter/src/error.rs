#![forbid(unsafe_code)]

//! Caller-facing errors.

use scrollkit_core::snap::SnapPointError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PresenterError>;

/// Synchronous caller errors.
///
/// Everything that happens after a request is accepted is reported through
/// the completion events instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresenterError {
    #[error("zoom factor must be finite, got {0}")]
    NonFiniteZoomFactor(f64),

    #[error("min zoom factor {min} exceeds max zoom factor {max}")]
    InvalidZoomFactorBounds { min: f64, max: f64 },

    #[error("offset must be finite, got {0}")]
    NonFiniteOffset(f64),

    #[error("velocity and decay rates must be finite")]
    NonFiniteVelocity,

    #[error("invalid snap point: {0}")]
    SnapPoint(#[from] SnapPointError),

    #[error("snap point index {index} out of range (len {len})")]
    SnapPointIndex { index: usize, len: usize },
}

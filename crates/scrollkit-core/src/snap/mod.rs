#![forbid(unsafe_code)]

//! Snap points: definitions, consolidated wrappers and applicable zones.
//!
//! Each dimension (horizontal offset, vertical offset, zoom factor) owns one
//! [`SnapPointSet`]. The set keeps the caller's definitions in caller order and
//! a second, sorted list of [`SnapPointWrapper`]s in which definitions that
//! resolve to the same effective target are combined.
//!
//! Every wrapper carries two zones:
//!
//! - the **applicable zone**, used when a gesture or a programmatic request
//!   settles normally, and
//! - the **impulse zone**, used when inertia starts from a discrete impulse
//!   (a wheel tick or a controller nudge). Optional ranges are ignored there
//!   and the value the view is currently resting on can be excluded so the
//!   impulse is able to leave it.
//!
//! # Invariants
//!
//! 1. Wrappers are sorted by [`SnapTarget::sort_key`].
//! 2. Applicable zones of consecutive irregular wrappers never overlap: the
//!    end of one is at most the start of the next.
//! 3. Evaluation is zone-local. A value outside every zone is returned
//!    unchanged.
//! 4. Evaluating an already snapped value returns the same value.

mod point;
mod set;
mod wrapper;

use std::fmt;

pub use point::{
    ApplicableRange, ScrollSnapPoint, SnapPoint, SnapPointShape, SnapPointsAlignment,
    ZoomSnapPoint,
};
pub use set::{SnapPointSet, rest_value};
pub use wrapper::{SnapModifier, SnapPointWrapper, SnapTarget, SnapZone};

/// Tolerance used when comparing a resting value to a snap value.
pub const SNAP_EPSILON: f64 = 1e-4;

/// Errors raised while defining or inserting snap points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPointError {
    /// A value, offset or bound is NaN or infinite.
    NonFiniteValue,
    /// An optional applicable range is negative.
    NegativeApplicableRange(f64),
    /// A repeated point's interval is zero or negative.
    NonPositiveInterval(f64),
    /// A repeated point's start is not before its end.
    InvertedRange { start: f64, end: f64 },
    /// A repeated point's offset lies outside `[start, end]`.
    OffsetOutsideRange { offset: f64, start: f64, end: f64 },
    /// Two distinct repeated points cover overlapping ranges.
    Overlap { start: f64, end: f64 },
}

impl fmt::Display for SnapPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteValue => write!(f, "snap point values must be finite"),
            Self::NegativeApplicableRange(range) => {
                write!(f, "applicable range {} must not be negative", range)
            }
            Self::NonPositiveInterval(interval) => {
                write!(f, "repeated snap point interval {} must be positive", interval)
            }
            Self::InvertedRange { start, end } => {
                write!(f, "repeated snap point start {} must be below end {}", start, end)
            }
            Self::OffsetOutsideRange { offset, start, end } => write!(
                f,
                "repeated snap point offset {} outside range [{}, {}]",
                offset, start, end
            ),
            Self::Overlap { start, end } => write!(
                f,
                "repeated snap point range [{}, {}] overlaps an existing repeated snap point",
                start, end
            ),
        }
    }
}

impl std::error::Error for SnapPointError {}

#![forbid(unsafe_code)]

//! Snap point definitions supplied by callers.

use std::fmt::Debug;

use super::SnapPointError;
use super::wrapper::SnapTarget;

/// How far around an irregular snap point its pull extends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApplicableRange {
    /// The point pulls until it meets a neighbor's zone.
    Mandatory,
    /// The point only pulls within `±range` of its value.
    Optional(f64),
}

impl ApplicableRange {
    /// Keep the wider of two ranges. `Mandatory` is unbounded.
    #[must_use]
    pub fn widest(self, other: ApplicableRange) -> ApplicableRange {
        match (self, other) {
            (Self::Optional(a), Self::Optional(b)) => Self::Optional(a.max(b)),
            _ => Self::Mandatory,
        }
    }
}

/// Which viewport edge a scroll snap point aligns with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapPointsAlignment {
    #[default]
    Near,
    Center,
    Far,
}

impl SnapPointsAlignment {
    /// Fraction of the viewport length subtracted from the snap value.
    #[inline]
    pub const fn ratio(self) -> f64 {
        match self {
            Self::Near => 0.0,
            Self::Center => 0.5,
            Self::Far => 1.0,
        }
    }
}

/// Value layout of a snap point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPointShape {
    /// A single snap value.
    Irregular { value: f64, range: ApplicableRange },
    /// Values at `offset + k * interval` inside `[start, end]`. Always mandatory
    /// within its range.
    Repeated {
        offset: f64,
        interval: f64,
        start: f64,
        end: f64,
    },
}

impl SnapPointShape {
    fn irregular(value: f64, range: ApplicableRange) -> Result<Self, SnapPointError> {
        if !value.is_finite() {
            return Err(SnapPointError::NonFiniteValue);
        }
        if let ApplicableRange::Optional(r) = range {
            if !r.is_finite() {
                return Err(SnapPointError::NonFiniteValue);
            }
            if r < 0.0 {
                return Err(SnapPointError::NegativeApplicableRange(r));
            }
        }
        Ok(Self::Irregular { value, range })
    }

    fn repeated(offset: f64, interval: f64, start: f64, end: f64) -> Result<Self, SnapPointError> {
        if ![offset, interval, start, end].iter().all(|v| v.is_finite()) {
            return Err(SnapPointError::NonFiniteValue);
        }
        if interval <= 0.0 {
            return Err(SnapPointError::NonPositiveInterval(interval));
        }
        if start >= end {
            return Err(SnapPointError::InvertedRange { start, end });
        }
        if offset < start || offset > end {
            return Err(SnapPointError::OffsetOutsideRange { offset, start, end });
        }
        Ok(Self::Repeated {
            offset,
            interval,
            start,
            end,
        })
    }

    /// Target after shifting every value by `-shift`.
    pub(crate) fn resolve(&self, shift: f64) -> SnapTarget {
        match *self {
            Self::Irregular { value, range } => SnapTarget::Irregular {
                value: value - shift,
                range,
            },
            Self::Repeated {
                offset,
                interval,
                start,
                end,
            } => SnapTarget::repeated(offset - shift, interval, start - shift, end - shift),
        }
    }
}

/// Common behavior of scroll and zoom snap points.
pub trait SnapPoint: Clone + Debug {
    /// Raw value layout.
    fn shape(&self) -> &SnapPointShape;

    /// Fraction of the viewport the resolved values are shifted by.
    fn alignment_ratio(&self) -> f64 {
        0.0
    }

    /// Whether the resolved target depends on the viewport length.
    fn is_viewport_aligned(&self) -> bool {
        self.alignment_ratio() != 0.0
    }

    /// Resolve to an effective target for the given viewport length.
    fn resolve(&self, viewport_length: f64) -> SnapTarget {
        let viewport = if viewport_length.is_finite() {
            viewport_length
        } else {
            0.0
        };
        self.shape().resolve(viewport * self.alignment_ratio())
    }
}

/// A snap point on the horizontal or vertical offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSnapPoint {
    shape: SnapPointShape,
    alignment: SnapPointsAlignment,
}

impl ScrollSnapPoint {
    /// A mandatory irregular point.
    pub fn irregular(value: f64, alignment: SnapPointsAlignment) -> Result<Self, SnapPointError> {
        Self::irregular_with_range(value, ApplicableRange::Mandatory, alignment)
    }

    /// An irregular point with an explicit applicable range.
    pub fn irregular_with_range(
        value: f64,
        range: ApplicableRange,
        alignment: SnapPointsAlignment,
    ) -> Result<Self, SnapPointError> {
        Ok(Self {
            shape: SnapPointShape::irregular(value, range)?,
            alignment,
        })
    }

    /// A repeated point.
    pub fn repeated(
        offset: f64,
        interval: f64,
        start: f64,
        end: f64,
        alignment: SnapPointsAlignment,
    ) -> Result<Self, SnapPointError> {
        Ok(Self {
            shape: SnapPointShape::repeated(offset, interval, start, end)?,
            alignment,
        })
    }

    #[inline]
    pub fn alignment(&self) -> SnapPointsAlignment {
        self.alignment
    }
}

impl SnapPoint for ScrollSnapPoint {
    fn shape(&self) -> &SnapPointShape {
        &self.shape
    }

    fn alignment_ratio(&self) -> f64 {
        self.alignment.ratio()
    }
}

/// A snap point on the zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSnapPoint {
    shape: SnapPointShape,
}

impl ZoomSnapPoint {
    /// A mandatory irregular point.
    pub fn irregular(value: f64) -> Result<Self, SnapPointError> {
        Self::irregular_with_range(value, ApplicableRange::Mandatory)
    }

    /// An irregular point with an explicit applicable range.
    pub fn irregular_with_range(value: f64, range: ApplicableRange) -> Result<Self, SnapPointError> {
        Ok(Self {
            shape: SnapPointShape::irregular(value, range)?,
        })
    }

    /// A repeated point.
    pub fn repeated(offset: f64, interval: f64, start: f64, end: f64) -> Result<Self, SnapPointError> {
        Ok(Self {
            shape: SnapPointShape::repeated(offset, interval, start, end)?,
        })
    }
}

impl SnapPoint for ZoomSnapPoint {
    fn shape(&self) -> &SnapPointShape {
        &self.shape
    }
}

#![forbid(unsafe_code)]

//! View-change payloads carried by queued operations.

use scrollkit_core::geometry::{Point, Vector2};

use crate::bring_into_view::BringIntoViewContext;
use crate::options::{ViewChangeOptions, ViewKind};

/// Anticipated view a queued change was resolved against when it was
/// requested. Offsets are not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnticipatedBase {
    pub offsets: Point,
    pub zoom_factor: f64,
}

/// Offsets change. `None` axes keep the anticipated value (absolute) or
/// move by zero (relative).
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetsChange {
    pub kind: ViewKind,
    pub horizontal: Option<f64>,
    pub vertical: Option<f64>,
    pub options: ViewChangeOptions,
    pub bring_into_view: Option<BringIntoViewContext>,
    /// Set for non-animated changes folded into the anticipated view.
    pub anticipated_base: Option<AnticipatedBase>,
}

impl OffsetsChange {
    pub fn new(
        kind: ViewKind,
        horizontal: Option<f64>,
        vertical: Option<f64>,
        options: ViewChangeOptions,
    ) -> Self {
        Self {
            kind,
            horizontal,
            vertical,
            options,
            bring_into_view: None,
            anticipated_base: None,
        }
    }

    /// Fold a later request of the same kind and options into this one.
    pub fn merge(&mut self, later: &OffsetsChange) {
        match self.kind {
            ViewKind::RelativeToCurrentView => {
                self.horizontal = add_axis(self.horizontal, later.horizontal);
                self.vertical = add_axis(self.vertical, later.vertical);
            }
            ViewKind::Absolute => {
                self.horizontal = later.horizontal.or(self.horizontal);
                self.vertical = later.vertical.or(self.vertical);
            }
        }
    }

    /// Both axes carry a value.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.horizontal.is_some() && self.vertical.is_some()
    }
}

fn add_axis(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
    }
}

/// Additional scroll velocity with optional per-axis decay overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetsChangeWithVelocity {
    pub velocity: Vector2,
    pub horizontal_decay_rate: Option<f64>,
    pub vertical_decay_rate: Option<f64>,
}

impl OffsetsChangeWithVelocity {
    /// Replace the horizontal component and decay rate.
    pub fn absorb_horizontal(&mut self, velocity: f64, decay_rate: Option<f64>) {
        self.velocity.x = velocity;
        if decay_rate.is_some() {
            self.horizontal_decay_rate = decay_rate;
        }
    }

    /// Replace the vertical component and decay rate.
    pub fn absorb_vertical(&mut self, velocity: f64, decay_rate: Option<f64>) {
        self.velocity.y = velocity;
        if decay_rate.is_some() {
            self.vertical_decay_rate = decay_rate;
        }
    }
}

/// Zoom factor change about an optional center point.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomFactorChange {
    pub kind: ViewKind,
    pub zoom_factor: f64,
    pub center_point: Option<Point>,
    pub options: ViewChangeOptions,
    pub anticipated_base: Option<AnticipatedBase>,
}

impl ZoomFactorChange {
    pub fn new(
        kind: ViewKind,
        zoom_factor: f64,
        center_point: Option<Point>,
        options: ViewChangeOptions,
    ) -> Self {
        Self {
            kind,
            zoom_factor,
            center_point,
            options,
            anticipated_base: None,
        }
    }
}

/// Additional zoom velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomFactorChangeWithVelocity {
    pub velocity: f64,
    pub center_point: Option<Point>,
    pub inertia_decay_rate: Option<f64>,
}

/// Payload of a queued operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewChangePayload {
    Offsets(OffsetsChange),
    OffsetsWithVelocity(OffsetsChangeWithVelocity),
    ZoomFactor(ZoomFactorChange),
    ZoomFactorWithVelocity(ZoomFactorChangeWithVelocity),
}

impl ViewChangePayload {
    /// Whether this payload changes the zoom factor.
    #[inline]
    pub fn is_zoom(&self) -> bool {
        matches!(self, Self::ZoomFactor(_) | Self::ZoomFactorWithVelocity(_))
    }
}

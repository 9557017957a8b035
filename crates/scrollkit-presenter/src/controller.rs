#![forbid(unsafe_code)]

//! Scroll controller plumbing.
//!
//! A scroll controller is an external widget (a scrollbar, a pager) bound to
//! one orientation. It issues requests into the presenter and receives the
//! current values and completion notifications back.

use scrollkit_core::motion::SnapDimension;

use crate::events::CorrelationId;
use crate::operation::OperationTrigger;
use crate::options::ViewChangeOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollOrientation {
    Horizontal,
    Vertical,
}

impl ScrollOrientation {
    /// Trigger recorded on operations this controller causes.
    #[inline]
    pub const fn trigger(self) -> OperationTrigger {
        match self {
            Self::Horizontal => OperationTrigger::HORIZONTAL_CONTROLLER_REQUEST,
            Self::Vertical => OperationTrigger::VERTICAL_CONTROLLER_REQUEST,
        }
    }

    #[inline]
    pub const fn snap_dimension(self) -> SnapDimension {
        match self {
            Self::Horizontal => SnapDimension::Horizontal,
            Self::Vertical => SnapDimension::Vertical,
        }
    }
}

/// Request raised by a scroll controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollControllerRequest {
    ScrollTo {
        offset: f64,
        options: ViewChangeOptions,
    },
    ScrollBy {
        delta: f64,
        options: ViewChangeOptions,
    },
    AddScrollVelocity {
        velocity: f64,
        inertia_decay_rate: Option<f64>,
    },
}

/// Values pushed to a controller whenever the view or the extent changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollControllerValues {
    pub min_offset: f64,
    pub max_offset: f64,
    pub offset: f64,
    pub viewport_length: f64,
}

/// Outbound calls into a scroll controller.
pub trait ScrollController {
    fn set_values(&mut self, values: ScrollControllerValues);

    fn set_is_scrollable(&mut self, is_scrollable: bool);

    /// A request this controller issued has finished.
    fn notify_requested_scroll_completed(&mut self, correlation_id: CorrelationId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_maps_to_trigger() {
        assert_eq!(
            ScrollOrientation::Horizontal.trigger(),
            OperationTrigger::HORIZONTAL_CONTROLLER_REQUEST
        );
        assert!(OperationTrigger::CONTROLLER.contains(ScrollOrientation::Vertical.trigger()));
    }
}

#![forbid(unsafe_code)]

//! Motion engine contract.
//!
//! The motion engine owns the authoritative position and scale and animates
//! them on its own clock. A presenter talks to it through the
//! [`MotionEngine`] trait and learns about progress only through
//! [`EngineEvent`]s delivered later, in order, on the presenter's thread.
//!
//! Every `try_update_*` call returns a [`RequestId`] that later events carry
//! so the presenter can match them to the call that caused them. Request ids
//! increase monotonically for the lifetime of one engine instance.

use std::fmt;

use crate::animation::{PositionAnimation, ScalarAnimation};
use crate::geometry::{Point, Size, Vector2};
use crate::snap::SnapModifier;

/// Engine-assigned identifier of one update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u32);

impl RequestId {
    /// Carried by events that were not caused by an update call.
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A pointer is driving the content.
    Interacting,
    /// The content is coasting after a release or an added velocity.
    Inertia,
    /// A keyframe animation is running.
    CustomAnimation,
}

/// Asynchronous notification from the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    IdleStateEntered {
        request_id: RequestId,
    },
    InertiaStateEntered {
        request_id: RequestId,
        natural_rest_position: Point,
        modified_rest_position: Option<Point>,
        natural_rest_scale: f64,
        modified_rest_scale: Option<f64>,
        /// Inertia began from a discrete impulse rather than a release.
        is_from_impulse: bool,
    },
    InteractingStateEntered {
        request_id: RequestId,
    },
    CustomAnimationStateEntered {
        request_id: RequestId,
    },
    RequestIgnored {
        request_id: RequestId,
    },
    ValuesChanged {
        request_id: RequestId,
        position: Point,
        scale: f64,
    },
}

impl EngineEvent {
    #[inline]
    pub fn request_id(&self) -> RequestId {
        match *self {
            Self::IdleStateEntered { request_id }
            | Self::InertiaStateEntered { request_id, .. }
            | Self::InteractingStateEntered { request_id }
            | Self::CustomAnimationStateEntered { request_id }
            | Self::RequestIgnored { request_id }
            | Self::ValuesChanged { request_id, .. } => request_id,
        }
    }

    /// State entered by this event, if it is a state transition.
    pub fn entered_state(&self) -> Option<InteractionState> {
        match self {
            Self::IdleStateEntered { .. } => Some(InteractionState::Idle),
            Self::InertiaStateEntered { .. } => Some(InteractionState::Inertia),
            Self::InteractingStateEntered { .. } => Some(InteractionState::Interacting),
            Self::CustomAnimationStateEntered { .. } => Some(InteractionState::CustomAnimation),
            Self::RequestIgnored { .. } | Self::ValuesChanged { .. } => None,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IdleStateEntered { .. } => "idle",
            Self::InertiaStateEntered { .. } => "inertia",
            Self::InteractingStateEntered { .. } => "interacting",
            Self::CustomAnimationStateEntered { .. } => "custom_animation",
            Self::RequestIgnored { .. } => "request_ignored",
            Self::ValuesChanged { .. } => "values_changed",
        }
    }
}

/// Limits pushed to the engine.
///
/// Positions range from the origin to the zoomed extent minus the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionBounds {
    /// Unzoomed content extent.
    pub extent: Size,
    pub viewport: Size,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl MotionBounds {
    /// Largest valid position at `scale`.
    pub fn max_position(&self, scale: f64) -> Point {
        Point::new(
            (self.extent.width * scale - self.viewport.width).max(0.0),
            (self.extent.height * scale - self.viewport.height).max(0.0),
        )
    }

    /// Clamp a position into `[0, max_position(scale)]`.
    pub fn clamp_position(&self, position: Point, scale: f64) -> Point {
        let max = self.max_position(scale);
        Point::new(position.x.clamp(0.0, max.x), position.y.clamp(0.0, max.y))
    }

    /// Clamp a scale into `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale.max(self.min_scale))
    }
}

impl Default for MotionBounds {
    fn default() -> Self {
        Self {
            extent: Size::ZERO,
            viewport: Size::ZERO,
            min_scale: 0.1,
            max_scale: 10.0,
        }
    }
}

/// Dimension an inertia modifier list applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapDimension {
    Horizontal,
    Vertical,
    Zoom,
}

impl SnapDimension {
    pub const ALL: [SnapDimension; 3] = [Self::Horizontal, Self::Vertical, Self::Zoom];
}

/// Synchronous engine failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionEngineError {
    /// The engine refused to take over the given pointer.
    RedirectionRejected { pointer_id: u32 },
    /// The operation is not supported by this engine.
    Unsupported(&'static str),
}

impl fmt::Display for MotionEngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RedirectionRejected { pointer_id } => {
                write!(f, "redirection of pointer {} rejected", pointer_id)
            }
            Self::Unsupported(what) => write!(f, "unsupported engine operation: {}", what),
        }
    }
}

impl std::error::Error for MotionEngineError {}

/// Operations a presenter issues against the motion engine.
///
/// Implementations must never call back into the presenter synchronously.
/// Events are queued and delivered through the presenter's
/// `handle_engine_event` entry point.
pub trait MotionEngine {
    fn try_update_position(&mut self, position: Point) -> RequestId;

    fn try_update_position_by(&mut self, delta: Vector2) -> RequestId;

    fn try_update_position_with_animation(&mut self, animation: &PositionAnimation) -> RequestId;

    fn try_update_position_with_additional_velocity(&mut self, velocity: Vector2) -> RequestId;

    fn try_update_scale(&mut self, scale: f64, center: Point) -> RequestId;

    fn try_update_scale_with_animation(
        &mut self,
        animation: &ScalarAnimation,
        center: Point,
    ) -> RequestId;

    fn try_update_scale_with_additional_velocity(&mut self, velocity: f64, center: Point)
    -> RequestId;

    fn set_position_inertia_decay_rate(&mut self, decay: Vector2);

    fn set_scale_inertia_decay_rate(&mut self, decay: f64);

    fn set_bounds(&mut self, bounds: MotionBounds);

    /// Replace the inertia modifiers of one dimension.
    fn configure_inertia_modifiers(&mut self, dimension: SnapDimension, modifiers: &[SnapModifier]);

    /// Hand an active pointer over to the engine.
    fn try_redirect_for_manipulation(&mut self, pointer_id: u32) -> Result<(), MotionEngineError>;
}

#![forbid(unsafe_code)]

//! Caller-visible identifiers, results and notifications.

use std::fmt;

use scrollkit_core::geometry::Vector2;
use scrollkit_core::motion::InteractionState;

/// Caller-visible handle of one logical view change.
///
/// Coalesced requests share one id and complete exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CorrelationId(pub i32);

impl CorrelationId {
    /// Returned when a request was dropped without being queued.
    pub const NO_OP: Self = Self(-1);

    #[inline]
    pub const fn is_no_op(self) -> bool {
        self.0 == Self::NO_OP.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic correlation id source. Wraps to 0 after `i32::MAX`.
#[derive(Debug, Clone, Default)]
pub struct CorrelationIdGenerator {
    latest: i32,
}

impl CorrelationIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start after `latest`; used to exercise wrap-around.
    pub fn starting_after(latest: i32) -> Self {
        Self {
            latest: latest.max(0),
        }
    }

    #[must_use]
    pub fn next_id(&mut self) -> CorrelationId {
        self.latest = if self.latest == i32::MAX {
            0
        } else {
            self.latest + 1
        };
        CorrelationId(self.latest)
    }
}

/// Final outcome of a view change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewChangeResult {
    Completed,
    /// Superseded by interaction, detach, content removal or a newer request.
    Interrupted,
    /// The engine declined the update call.
    Ignored,
}

impl ViewChangeResult {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
            Self::Ignored => "ignored",
        }
    }
}

/// Notifications raised by the presenter, drained by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent {
    /// An offsets change was handed to the engine.
    ScrollStarting {
        correlation_id: CorrelationId,
        horizontal_offset: f64,
        vertical_offset: f64,
        zoom_factor: f64,
    },
    ScrollCompleted {
        correlation_id: CorrelationId,
        result: ViewChangeResult,
    },
    /// A zoom factor change was handed to the engine.
    ZoomStarting {
        correlation_id: CorrelationId,
        horizontal_offset: f64,
        vertical_offset: f64,
        zoom_factor: f64,
    },
    ZoomCompleted {
        correlation_id: CorrelationId,
        result: ViewChangeResult,
    },
    StateChanged {
        state: InteractionState,
    },
    /// The engine reported new confirmed values.
    ViewChanged {
        horizontal_offset: f64,
        vertical_offset: f64,
        zoom_factor: f64,
    },
    /// A bring-into-view request resolved its target offsets.
    BringingIntoView {
        correlation_id: CorrelationId,
        target_horizontal_offset: f64,
        target_vertical_offset: f64,
        applied_offset: Vector2,
    },
}

impl PresenterEvent {
    /// Correlation id and result of a completion event.
    pub fn completion(&self) -> Option<(CorrelationId, ViewChangeResult)> {
        match *self {
            Self::ScrollCompleted {
                correlation_id,
                result,
            }
            | Self::ZoomCompleted {
                correlation_id,
                result,
            } => Some((correlation_id, result)),
            _ => None,
        }
    }
}

#![forbid(unsafe_code)]

//! Completion reconciler.
//!
//! Mirrors the engine's interaction state and turns each [`EngineEvent`]
//! into at most one state change plus one [`CompletionSweep`] the queue
//! applies.
//!
//! ```text
//!           ┌──────────────┐  pointer down   ┌─────────────┐
//!           │     Idle     │ ──────────────▶ │ Interacting │
//!           └──────────────┘                 └─────────────┘
//!              ▲        ▲                          │ release
//!              │        │ rest reached             ▼
//!              │        └──────────────────  ┌─────────────┐
//!              │                             │   Inertia   │
//!              │  animation done             └─────────────┘
//!           ┌──────────────────┐
//!           │ CustomAnimation  │ ◀── any state, on animated dispatch
//!           └──────────────────┘
//! ```
//!
//! # Sweep rules
//!
//! | Event                    | matching          | prior non-animated | prior animated | undispatched |
//! |--------------------------|-------------------|--------------------|----------------|--------------|
//! | Idle (id ≠ 0)            | Completed         | Completed          | Interrupted    | untouched    |
//! | Interacting              | n/a               | Completed          | Interrupted    | Interrupted  |
//! | RequestIgnored           | Ignored           | untouched          | untouched      | untouched    |
//! | ValuesChanged (id ≠ 0)   | Completed (non-animated only) | Completed | untouched   | untouched    |
//!
//! The prior predicates are independent: an operation is judged only by
//! whether it is animated, never by a priority between the two sweeps.

use scrollkit_core::motion::{EngineEvent, InteractionState, RequestId};
use tracing::debug;

use crate::events::ViewChangeResult;

/// Which operations a sweep looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepTarget {
    /// The operation dispatched with this id, and dispatched operations
    /// with a smaller id ("prior").
    Request(RequestId),
    /// Every operation in the queue.
    AllInFlight,
}

/// Results to apply to each category of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionSweep {
    pub target: SweepTarget,
    pub matching: Option<ViewChangeResult>,
    /// Whether an animated operation may be completed by the match.
    pub match_animated: bool,
    pub prior_non_animated: Option<ViewChangeResult>,
    pub prior_animated: Option<ViewChangeResult>,
    /// Result for operations not yet dispatched (`AllInFlight` only).
    pub pending: Option<ViewChangeResult>,
}

impl CompletionSweep {
    pub fn idle(request_id: RequestId) -> Self {
        Self {
            target: SweepTarget::Request(request_id),
            matching: Some(ViewChangeResult::Completed),
            match_animated: true,
            prior_non_animated: Some(ViewChangeResult::Completed),
            prior_animated: Some(ViewChangeResult::Interrupted),
            pending: None,
        }
    }

    pub fn interacting() -> Self {
        Self {
            target: SweepTarget::AllInFlight,
            matching: None,
            match_animated: false,
            prior_non_animated: Some(ViewChangeResult::Completed),
            prior_animated: Some(ViewChangeResult::Interrupted),
            pending: Some(ViewChangeResult::Interrupted),
        }
    }

    pub fn request_ignored(request_id: RequestId) -> Self {
        Self {
            target: SweepTarget::Request(request_id),
            matching: Some(ViewChangeResult::Ignored),
            match_animated: true,
            prior_non_animated: None,
            prior_animated: None,
            pending: None,
        }
    }

    pub fn values_changed(request_id: RequestId) -> Self {
        Self {
            target: SweepTarget::Request(request_id),
            matching: Some(ViewChangeResult::Completed),
            match_animated: false,
            prior_non_animated: Some(ViewChangeResult::Completed),
            prior_animated: None,
            pending: None,
        }
    }
}

/// Outcome of feeding one engine event to the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// New state, when it differs from the previous one.
    pub entered_state: Option<InteractionState>,
    pub sweep: Option<CompletionSweep>,
}

/// Interaction state machine driven by engine events.
#[derive(Debug, Clone, Default)]
pub struct CompletionReconciler {
    state: InteractionState,
}

impl CompletionReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Return to `Idle` without a sweep, used when the engine goes away.
    pub fn reset(&mut self) -> Option<InteractionState> {
        let changed = self.state != InteractionState::Idle;
        self.state = InteractionState::Idle;
        changed.then_some(InteractionState::Idle)
    }

    /// Single transition function for every engine callback.
    pub fn transition(&mut self, event: &EngineEvent) -> Transition {
        let request_id = event.request_id();
        let sweep = match event {
            EngineEvent::IdleStateEntered { .. } if !request_id.is_none() => {
                Some(CompletionSweep::idle(request_id))
            }
            EngineEvent::InteractingStateEntered { .. } => Some(CompletionSweep::interacting()),
            EngineEvent::RequestIgnored { .. } => Some(CompletionSweep::request_ignored(request_id)),
            EngineEvent::ValuesChanged { .. } if !request_id.is_none() => {
                Some(CompletionSweep::values_changed(request_id))
            }
            _ => None,
        };

        let entered_state = event.entered_state().filter(|&next| next != self.state);
        if let Some(next) = entered_state {
            debug!(
                target: "scrollkit.reconciler",
                from = ?self.state,
                to = ?next,
                request_id = request_id.0,
                "interaction state changed"
            );
            self.state = next;
        }

        Transition {
            entered_state,
            sweep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollkit_core::geometry::Point;

    fn idle(id: u32) -> EngineEvent {
        EngineEvent::IdleStateEntered {
            request_id: RequestId(id),
        }
    }

    #[test]
    fn idle_with_request_sweeps() {
        let mut r = CompletionReconciler::new();
        let t = r.transition(&idle(4));
        assert_eq!(t.entered_state, None);
        assert_eq!(t.sweep, Some(CompletionSweep::idle(RequestId(4))));
    }

    #[test]
    fn idle_without_request_only_changes_state() {
        let mut r = CompletionReconciler::new();
        r.transition(&EngineEvent::InteractingStateEntered {
            request_id: RequestId::NONE,
        });
        let t = r.transition(&idle(0));
        assert_eq!(t.entered_state, Some(InteractionState::Idle));
        assert_eq!(t.sweep, None);
    }

    #[test]
    fn interacting_sweeps_everything() {
        let mut r = CompletionReconciler::new();
        let t = r.transition(&EngineEvent::InteractingStateEntered {
            request_id: RequestId::NONE,
        });
        assert_eq!(t.entered_state, Some(InteractionState::Interacting));
        let sweep = t.sweep.unwrap();
        assert_eq!(sweep.target, SweepTarget::AllInFlight);
        assert_eq!(sweep.prior_non_animated, Some(ViewChangeResult::Completed));
        assert_eq!(sweep.prior_animated, Some(ViewChangeResult::Interrupted));
        assert_eq!(r.state(), InteractionState::Interacting);
    }

    #[test]
    fn inertia_and_custom_animation_only_change_state() {
        let mut r = CompletionReconciler::new();
        let t = r.transition(&EngineEvent::CustomAnimationStateEntered {
            request_id: RequestId(2),
        });
        assert_eq!(t.entered_state, Some(InteractionState::CustomAnimation));
        assert_eq!(t.sweep, None);
        let t = r.transition(&EngineEvent::InertiaStateEntered {
            request_id: RequestId(3),
            natural_rest_position: Point::ZERO,
            modified_rest_position: None,
            natural_rest_scale: 1.0,
            modified_rest_scale: None,
            is_from_impulse: true,
        });
        assert_eq!(t.entered_state, Some(InteractionState::Inertia));
        assert_eq!(t.sweep, None);
    }

    #[test]
    fn values_changed_and_ignored() {
        let mut r = CompletionReconciler::new();
        let t = r.transition(&EngineEvent::ValuesChanged {
            request_id: RequestId(5),
            position: Point::ZERO,
            scale: 1.0,
        });
        assert_eq!(t.sweep, Some(CompletionSweep::values_changed(RequestId(5))));
        let t = r.transition(&EngineEvent::ValuesChanged {
            request_id: RequestId::NONE,
            position: Point::ZERO,
            scale: 1.0,
        });
        assert_eq!(t.sweep, None);
        let t = r.transition(&EngineEvent::RequestIgnored {
            request_id: RequestId(6),
        });
        assert_eq!(t.sweep.map(|s| s.matching), Some(Some(ViewChangeResult::Ignored)));
        assert_eq!(r.state(), InteractionState::Idle);
    }

    #[test]
    fn reset_reports_change_once() {
        let mut r = CompletionReconciler::new();
        assert_eq!(r.reset(), None);
        r.transition(&EngineEvent::CustomAnimationStateEntered {
            request_id: RequestId(1),
        });
        assert_eq!(r.reset(), Some(InteractionState::Idle));
    }
}

#![forbid(unsafe_code)]

//! Deterministic motion engine.
//!
//! [`SimulatedTracker`] implements [`MotionEngine`] on a fixed frame clock.
//! Calls never raise events synchronously into the presenter; they are
//! queued and handed out by [`SimulatedTracker::drain_events`], the way a
//! real compositor delivers them on a later turn of the UI loop.
//!
//! Behavior in brief:
//!
//! - Instant updates clamp to the bounds and report `ValuesChanged` only when
//!   something moved, so a no-op update stays silent.
//! - Animations enter `CustomAnimation`, report a value every frame, and
//!   return to `Idle` with the animation's request id.
//! - Added velocity enters `Inertia`, resolves its rest point through the
//!   configured inertia modifiers, and coasts there over a few frames.
//! - While a pointer interaction is active every update is ignored.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use scrollkit_core::animation::{PositionAnimation, ScalarAnimation};
use scrollkit_core::geometry::{Point, Vector2};
use scrollkit_core::motion::{
    EngineEvent, InteractionState, MotionBounds, MotionEngine, MotionEngineError, RequestId,
    SnapDimension,
};
use scrollkit_core::snap::{SnapModifier, rest_value};
use tracing::trace;

/// Frames an inertia coast takes to settle.
const INERTIA_FRAMES: u32 = 6;

/// Every call the presenter made, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    UpdatePosition(Point),
    UpdatePositionBy(Vector2),
    AnimatePosition { target: Point, duration: Duration },
    AddPositionVelocity(Vector2),
    UpdateScale { scale: f64, center: Point },
    AnimateScale { target: f64, duration: Duration, center: Point },
    AddScaleVelocity { velocity: f64, center: Point },
    PositionDecay(Vector2),
    ScaleDecay(f64),
    Bounds(MotionBounds),
    Modifiers { dimension: SnapDimension, count: usize },
    Redirect(u32),
}

impl EngineCall {
    /// Whether this call moves the view.
    pub fn is_update(&self) -> bool {
        matches!(
            self,
            Self::UpdatePosition(_)
                | Self::UpdatePositionBy(_)
                | Self::AnimatePosition { .. }
                | Self::AddPositionVelocity(_)
                | Self::UpdateScale { .. }
                | Self::AnimateScale { .. }
                | Self::AddScaleVelocity { .. }
        )
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Position {
        request_id: RequestId,
        from: Point,
        animation: PositionAnimation,
        elapsed: Duration,
    },
    Scale {
        request_id: RequestId,
        from_scale: f64,
        from_position: Point,
        center: Point,
        animation: ScalarAnimation,
        elapsed: Duration,
    },
    Inertia {
        request_id: RequestId,
        position: Point,
        scale: f64,
        frames_left: u32,
    },
}

/// Simulated motion engine.
#[derive(Debug, Clone)]
pub struct SimulatedTracker {
    position: Point,
    scale: f64,
    bounds: MotionBounds,
    position_decay: Vector2,
    scale_decay: f64,
    modifiers: HashMap<SnapDimension, Vec<SnapModifier>>,
    state: InteractionState,
    last_request_id: u32,
    motion: Option<Motion>,
    pending: VecDeque<EngineEvent>,
    calls: Vec<EngineCall>,
    ignore_next: bool,
    reject_redirection: bool,
    frame: Duration,
}

impl Default for SimulatedTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTracker {
    pub fn new() -> Self {
        Self {
            position: Point::ZERO,
            scale: 1.0,
            bounds: MotionBounds::default(),
            position_decay: Vector2::new(0.95, 0.95),
            scale_decay: 0.985,
            modifiers: HashMap::new(),
            state: InteractionState::Idle,
            last_request_id: 0,
            motion: None,
            pending: VecDeque::new(),
            calls: Vec::new(),
            ignore_next: false,
            reject_redirection: false,
            frame: Duration::from_millis(16),
        }
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn bounds(&self) -> MotionBounds {
        self.bounds
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Calls that move the view, in issue order.
    pub fn update_calls(&self) -> Vec<EngineCall> {
        self.calls.iter().filter(|c| c.is_update()).cloned().collect()
    }

    pub fn modifiers(&self, dimension: SnapDimension) -> &[SnapModifier] {
        self.modifiers.get(&dimension).map_or(&[], Vec::as_slice)
    }

    pub fn position_decay(&self) -> Vector2 {
        self.position_decay
    }

    pub fn scale_decay(&self) -> f64 {
        self.scale_decay
    }

    /// Whether an animation or a coast is running.
    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take every event raised since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.pending.drain(..).collect()
    }

    // -------------------------------------------------------------------------
    // Fault injection and user input
    // -------------------------------------------------------------------------

    /// Answer the next update with `RequestIgnored`.
    pub fn ignore_next_request(&mut self) {
        self.ignore_next = true;
    }

    pub fn set_reject_redirection(&mut self, reject: bool) {
        self.reject_redirection = reject;
    }

    /// A pointer takes over. Running motion stops.
    pub fn begin_interaction(&mut self) {
        self.motion = None;
        self.enter(InteractionState::Interacting, RequestId::NONE);
    }

    /// The pointer lifts without velocity.
    pub fn end_interaction(&mut self) {
        self.enter(InteractionState::Idle, RequestId::NONE);
    }

    /// The pointer lifts with velocity; the view coasts to a rest point
    /// chosen by the regular (non-impulse) snap zones.
    pub fn end_interaction_with_velocity(&mut self, velocity: Vector2) {
        let natural = self.natural_rest_position(velocity);
        self.start_position_inertia(RequestId::NONE, natural, false);
    }

    // -------------------------------------------------------------------------
    // Clock
    // -------------------------------------------------------------------------

    /// Advance one frame of the simulated clock.
    pub fn advance_frame(&mut self) {
        let Some(motion) = self.motion.take() else {
            return;
        };
        match motion {
            Motion::Position {
                request_id,
                from,
                animation,
                elapsed,
            } => {
                let elapsed = elapsed + self.frame;
                let value = self.bounds.clamp_position(animation.sample(from, elapsed), self.scale);
                self.set_values(request_id, value, self.scale);
                if animation.is_complete(elapsed) {
                    self.enter(InteractionState::Idle, request_id);
                } else {
                    self.motion = Some(Motion::Position {
                        request_id,
                        from,
                        animation,
                        elapsed,
                    });
                }
            }
            Motion::Scale {
                request_id,
                from_scale,
                from_position,
                center,
                animation,
                elapsed,
            } => {
                let elapsed = elapsed + self.frame;
                let scale = self.bounds.clamp_scale(animation.sample(from_scale, elapsed));
                let position = self.scaled_position(from_position, from_scale, scale, center);
                self.set_values(request_id, position, scale);
                if animation.is_complete(elapsed) {
                    self.enter(InteractionState::Idle, request_id);
                } else {
                    self.motion = Some(Motion::Scale {
                        request_id,
                        from_scale,
                        from_position,
                        center,
                        animation,
                        elapsed,
                    });
                }
            }
            Motion::Inertia {
                request_id,
                position,
                scale,
                frames_left,
            } => {
                let (next_position, next_scale) = if frames_left <= 1 {
                    (position, scale)
                } else {
                    let t = 1.0 / f64::from(frames_left);
                    (self.position.lerp(position, t), self.scale + (scale - self.scale) * t)
                };
                self.set_values(request_id, next_position, next_scale);
                if frames_left <= 1 {
                    self.enter(InteractionState::Idle, request_id);
                } else {
                    self.motion = Some(Motion::Inertia {
                        request_id,
                        position,
                        scale,
                        frames_left: frames_left - 1,
                    });
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Allocate a request id. The flag is `false` when the request was
    /// answered with `RequestIgnored`.
    fn admit(&mut self) -> (RequestId, bool) {
        self.last_request_id += 1;
        let request_id = RequestId(self.last_request_id);
        if self.ignore_next || self.state == InteractionState::Interacting {
            self.ignore_next = false;
            trace!(target: "scrollkit.harness", request_id = request_id.0, "request ignored");
            self.pending.push_back(EngineEvent::RequestIgnored { request_id });
            return (request_id, false);
        }
        (request_id, true)
    }

    fn enter(&mut self, state: InteractionState, request_id: RequestId) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.pending.push_back(match state {
            InteractionState::Idle => EngineEvent::IdleStateEntered { request_id },
            InteractionState::Interacting => EngineEvent::InteractingStateEntered { request_id },
            InteractionState::CustomAnimation => {
                EngineEvent::CustomAnimationStateEntered { request_id }
            }
            InteractionState::Inertia => EngineEvent::InertiaStateEntered {
                request_id,
                natural_rest_position: self.position,
                modified_rest_position: None,
                natural_rest_scale: self.scale,
                modified_rest_scale: None,
                is_from_impulse: false,
            },
        });
    }

    fn set_values(&mut self, request_id: RequestId, position: Point, scale: f64) {
        if position == self.position && scale == self.scale {
            return;
        }
        self.position = position;
        self.scale = scale;
        self.pending.push_back(EngineEvent::ValuesChanged {
            request_id,
            position,
            scale,
        });
    }

    /// Apply an instant update: stop running motion, move, settle.
    fn jump(&mut self, request_id: RequestId, position: Point, scale: f64) {
        self.motion = None;
        self.set_values(request_id, position, scale);
        self.enter(InteractionState::Idle, request_id);
    }

    fn scaled_position(&self, from: Point, from_scale: f64, scale: f64, center: Point) -> Point {
        let ratio = if from_scale > 0.0 { scale / from_scale } else { 1.0 };
        self.bounds.clamp_position(
            Point::new(
                ratio * (from.x + center.x) - center.x,
                ratio * (from.y + center.y) - center.y,
            ),
            scale,
        )
    }

    fn natural_rest_position(&self, velocity: Vector2) -> Point {
        let secs = self.frame.as_secs_f64();
        Point::new(
            self.position.x + velocity.x * secs / (1.0 - self.position_decay.x.min(0.999)),
            self.position.y + velocity.y * secs / (1.0 - self.position_decay.y.min(0.999)),
        )
    }

    fn start_position_inertia(&mut self, request_id: RequestId, natural: Point, impulse: bool) {
        let modified_x = rest_value(self.modifiers(SnapDimension::Horizontal), natural.x, impulse);
        let modified_y = rest_value(self.modifiers(SnapDimension::Vertical), natural.y, impulse);
        let modified = (modified_x.is_some() || modified_y.is_some()).then(|| {
            Point::new(modified_x.unwrap_or(natural.x), modified_y.unwrap_or(natural.y))
        });
        let rest = self
            .bounds
            .clamp_position(modified.unwrap_or(natural), self.scale);
        self.state = InteractionState::Inertia;
        self.pending.push_back(EngineEvent::InertiaStateEntered {
            request_id,
            natural_rest_position: natural,
            modified_rest_position: modified,
            natural_rest_scale: self.scale,
            modified_rest_scale: None,
            is_from_impulse: impulse,
        });
        self.motion = Some(Motion::Inertia {
            request_id,
            position: rest,
            scale: self.scale,
            frames_left: INERTIA_FRAMES,
        });
    }
}

impl MotionEngine for SimulatedTracker {
    fn try_update_position(&mut self, position: Point) -> RequestId {
        self.calls.push(EngineCall::UpdatePosition(position));
        let (request_id, accepted) = self.admit();
        if accepted {
            let target = self.bounds.clamp_position(position, self.scale);
            self.jump(request_id, target, self.scale);
        }
        request_id
    }

    fn try_update_position_by(&mut self, delta: Vector2) -> RequestId {
        self.calls.push(EngineCall::UpdatePositionBy(delta));
        let (request_id, accepted) = self.admit();
        if accepted {
            let target = self.bounds.clamp_position(self.position + delta, self.scale);
            self.jump(request_id, target, self.scale);
        }
        request_id
    }

    fn try_update_position_with_animation(&mut self, animation: &PositionAnimation) -> RequestId {
        self.calls.push(EngineCall::AnimatePosition {
            target: animation.final_value(),
            duration: animation.duration(),
        });
        let (request_id, accepted) = self.admit();
        if accepted {
            self.motion = Some(Motion::Position {
                request_id,
                from: self.position,
                animation: *animation,
                elapsed: Duration::ZERO,
            });
            self.enter(InteractionState::CustomAnimation, request_id);
        }
        request_id
    }

    fn try_update_position_with_additional_velocity(&mut self, velocity: Vector2) -> RequestId {
        self.calls.push(EngineCall::AddPositionVelocity(velocity));
        let (request_id, accepted) = self.admit();
        if accepted {
            let natural = self.natural_rest_position(velocity);
            self.start_position_inertia(request_id, natural, true);
        }
        request_id
    }

    fn try_update_scale(&mut self, scale: f64, center: Point) -> RequestId {
        self.calls.push(EngineCall::UpdateScale { scale, center });
        let (request_id, accepted) = self.admit();
        if accepted {
            let scale = self.bounds.clamp_scale(scale);
            let position = self.scaled_position(self.position, self.scale, scale, center);
            self.jump(request_id, position, scale);
        }
        request_id
    }

    fn try_update_scale_with_animation(
        &mut self,
        animation: &ScalarAnimation,
        center: Point,
    ) -> RequestId {
        self.calls.push(EngineCall::AnimateScale {
            target: animation.final_value(),
            duration: animation.duration(),
            center,
        });
        let (request_id, accepted) = self.admit();
        if accepted {
            self.motion = Some(Motion::Scale {
                request_id,
                from_scale: self.scale,
                from_position: self.position,
                center,
                animation: *animation,
                elapsed: Duration::ZERO,
            });
            self.enter(InteractionState::CustomAnimation, request_id);
        }
        request_id
    }

    fn try_update_scale_with_additional_velocity(&mut self, velocity: f64, center: Point) -> RequestId {
        self.calls.push(EngineCall::AddScaleVelocity { velocity, center });
        let (request_id, accepted) = self.admit();
        if accepted {
            let secs = self.frame.as_secs_f64();
            let natural = self.scale + velocity * secs / (1.0 - self.scale_decay.min(0.999));
            let modified = rest_value(self.modifiers(SnapDimension::Zoom), natural, true);
            let scale = self.bounds.clamp_scale(modified.unwrap_or(natural));
            let position = self.scaled_position(self.position, self.scale, scale, center);
            self.state = InteractionState::Inertia;
            self.pending.push_back(EngineEvent::InertiaStateEntered {
                request_id,
                natural_rest_position: self.position,
                modified_rest_position: None,
                natural_rest_scale: natural,
                modified_rest_scale: modified,
                is_from_impulse: true,
            });
            self.motion = Some(Motion::Inertia {
                request_id,
                position,
                scale,
                frames_left: INERTIA_FRAMES,
            });
        }
        request_id
    }

    fn set_position_inertia_decay_rate(&mut self, decay: Vector2) {
        self.calls.push(EngineCall::PositionDecay(decay));
        self.position_decay = decay;
    }

    fn set_scale_inertia_decay_rate(&mut self, decay: f64) {
        self.calls.push(EngineCall::ScaleDecay(decay));
        self.scale_decay = decay;
    }

    fn set_bounds(&mut self, bounds: MotionBounds) {
        self.calls.push(EngineCall::Bounds(bounds));
        self.bounds = bounds;
        let scale = bounds.clamp_scale(self.scale);
        let position = bounds.clamp_position(self.position, scale);
        self.set_values(RequestId::NONE, position, scale);
    }

    fn configure_inertia_modifiers(&mut self, dimension: SnapDimension, modifiers: &[SnapModifier]) {
        self.calls.push(EngineCall::Modifiers {
            dimension,
            count: modifiers.len(),
        });
        self.modifiers.insert(dimension, modifiers.to_vec());
    }

    fn try_redirect_for_manipulation(&mut self, pointer_id: u32) -> Result<(), MotionEngineError> {
        self.calls.push(EngineCall::Redirect(pointer_id));
        if self.reject_redirection {
            return Err(MotionEngineError::RedirectionRejected { pointer_id });
        }
        self.begin_interaction();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollkit_core::geometry::Size;

    fn tracker() -> SimulatedTracker {
        let mut t = SimulatedTracker::new();
        t.set_bounds(MotionBounds {
            extent: Size::new(1000.0, 1000.0),
            viewport: Size::new(100.0, 100.0),
            min_scale: 0.5,
            max_scale: 4.0,
        });
        t.drain_events();
        t
    }

    #[test]
    fn request_ids_start_at_one() {
        let mut t = tracker();
        assert_eq!(t.try_update_position(Point::new(10.0, 0.0)), RequestId(1));
        assert_eq!(t.try_update_position(Point::new(20.0, 0.0)), RequestId(2));
    }

    #[test]
    fn instant_update_reports_values_once() {
        let mut t = tracker();
        let id = t.try_update_position(Point::new(50.0, 5000.0));
        assert_eq!(
            t.drain_events(),
            vec![EngineEvent::ValuesChanged {
                request_id: id,
                position: Point::new(50.0, 900.0),
                scale: 1.0,
            }]
        );
        t.try_update_position(Point::new(50.0, 900.0));
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn animation_runs_to_idle() {
        let mut t = tracker();
        let anim = PositionAnimation::new(Point::new(100.0, 0.0), Duration::from_millis(48));
        let id = t.try_update_position_with_animation(&anim);
        assert_eq!(
            t.drain_events(),
            vec![EngineEvent::CustomAnimationStateEntered { request_id: id }]
        );
        for _ in 0..3 {
            t.advance_frame();
        }
        let events = t.drain_events();
        assert_eq!(
            events.last(),
            Some(&EngineEvent::IdleStateEntered { request_id: id })
        );
        assert_eq!(t.position(), Point::new(100.0, 0.0));
        assert!(!t.is_moving());
    }

    #[test]
    fn interaction_ignores_updates() {
        let mut t = tracker();
        t.begin_interaction();
        t.drain_events();
        let id = t.try_update_position(Point::new(10.0, 10.0));
        assert_eq!(t.drain_events(), vec![EngineEvent::RequestIgnored { request_id: id }]);
        assert_eq!(t.position(), Point::ZERO);
    }

    #[test]
    fn velocity_coasts_to_modified_rest() {
        let mut t = tracker();
        t.configure_inertia_modifiers(SnapDimension::Vertical, &[]);
        let id = t.try_update_position_with_additional_velocity(Vector2::new(0.0, 100.0));
        let events = t.drain_events();
        assert!(matches!(
            events[0],
            EngineEvent::InertiaStateEntered { request_id, is_from_impulse: true, .. } if request_id == id
        ));
        for _ in 0..INERTIA_FRAMES {
            t.advance_frame();
        }
        assert_eq!(t.state(), InteractionState::Idle);
        assert!((t.position().y - 32.0).abs() < 1e-9);
    }

    #[test]
    fn scale_inertia_settles_exactly_on_clamped_bound() {
        let mut t = tracker();
        t.try_update_scale(2.5, Point::ZERO);
        t.try_update_scale_with_additional_velocity(-1000.0, Point::ZERO);
        for _ in 0..INERTIA_FRAMES {
            t.advance_frame();
        }
        assert_eq!(t.state(), InteractionState::Idle);
        assert_eq!(t.scale(), 0.5);
        assert_eq!(t.position(), Point::ZERO);
    }

    #[test]
    fn scale_about_center_keeps_center_fixed() {
        let mut t = tracker();
        t.try_update_scale(2.0, Point::new(50.0, 50.0));
        assert_eq!(t.scale(), 2.0);
        assert_eq!(t.position(), Point::new(50.0, 50.0));
    }

    #[test]
    fn redirection_can_be_rejected() {
        let mut t = tracker();
        t.set_reject_redirection(true);
        assert_eq!(
            t.try_redirect_for_manipulation(7),
            Err(MotionEngineError::RedirectionRejected { pointer_id: 7 })
        );
        t.set_reject_redirection(false);
        assert!(t.try_redirect_for_manipulation(7).is_ok());
        assert_eq!(t.state(), InteractionState::Interacting);
    }
}

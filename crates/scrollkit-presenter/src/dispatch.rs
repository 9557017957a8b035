#![forbid(unsafe_code)]

//! Operation dispatch.
//!
//! Turns a queued operation whose countdown ran out into one motion engine
//! call. Targets are resolved against the anticipated view so that requests
//! issued back to back compose, then snapped and clamped.
//!
//! # Failure Modes
//!
//! | Situation                         | Behavior                              |
//! |-----------------------------------|---------------------------------------|
//! | Bring-into-view element missing   | Offsets stay at the anticipated view  |
//! | Zoom target outside bounds        | Clamped to `[min, max]` zoom factor   |
//! | Offsets outside the content       | Clamped to `[0, scrollable extent]`   |

use scrollkit_core::animation::{PositionAnimation, ScalarAnimation};
use scrollkit_core::geometry::{Point, Size, Vector2};
use scrollkit_core::motion::{InteractionState, MotionBounds, MotionEngine, RequestId};
use tracing::{debug, trace};

use crate::anticipated::AnticipatedView;
use crate::bring_into_view::{ElementLocator, ViewportGeometry, compute_target_offsets};
use crate::config::PresenterConfig;
use crate::events::{CorrelationId, PresenterEvent};
use crate::operation::{AsyncViewChangeOperation, OperationTrigger, OperationType};
use crate::options::ViewKind;
use crate::snap_points::SnapPointSets;
use crate::view_change::{
    AnticipatedBase, OffsetsChange, OffsetsChangeWithVelocity, ViewChangePayload,
    ZoomFactorChange, ZoomFactorChangeWithVelocity,
};

/// Confirmed view and layout geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Offsets last reported by the engine.
    pub offsets: Point,
    /// Zoom factor last reported by the engine.
    pub zoom_factor: f64,
    pub viewport: Size,
    /// Unzoomed content extent.
    pub extent: Size,
    /// Offset of the content inside the presenter's layout slot.
    pub content_layout_offset: Vector2,
    pub min_zoom_factor: f64,
    pub max_zoom_factor: f64,
}

impl ViewState {
    pub fn new(min_zoom_factor: f64, max_zoom_factor: f64) -> Self {
        Self {
            offsets: Point::ZERO,
            zoom_factor: 1.0,
            viewport: Size::ZERO,
            extent: Size::ZERO,
            content_layout_offset: Vector2::ZERO,
            min_zoom_factor,
            max_zoom_factor,
        }
    }

    pub fn bounds(&self) -> MotionBounds {
        MotionBounds {
            extent: self.extent,
            viewport: self.viewport,
            min_scale: self.min_zoom_factor,
            max_scale: self.max_zoom_factor,
        }
    }

    /// Largest valid offsets at `zoom_factor`.
    #[inline]
    pub fn max_offsets(&self, zoom_factor: f64) -> Point {
        self.bounds().max_position(zoom_factor)
    }

    /// Default zoom center: the viewport center in content-local space.
    pub fn default_zoom_center(&self) -> Point {
        Point::new(
            self.viewport.width / 2.0 - self.content_layout_offset.x,
            self.viewport.height / 2.0 - self.content_layout_offset.y,
        )
    }
}

/// Everything one dispatch reads or writes.
pub(crate) struct DispatchContext<'a> {
    pub engine: &'a mut dyn MotionEngine,
    pub anticipated: &'a mut AnticipatedView,
    pub view: &'a ViewState,
    pub snap_points: &'a SnapPointSets,
    pub config: &'a PresenterConfig,
    pub locator: Option<&'a dyn ElementLocator>,
    pub state: InteractionState,
    pub events: &'a mut Vec<PresenterEvent>,
}

impl DispatchContext<'_> {
    /// Issue the engine call for `op` and return its request id.
    pub fn dispatch(&mut self, op: &mut AsyncViewChangeOperation) -> RequestId {
        let op_type = op.op_type();
        let trigger = op.trigger();
        let correlation_id = op.correlation_id();
        match op.payload_mut() {
            ViewChangePayload::Offsets(change) => {
                self.dispatch_offsets(op_type, correlation_id, change)
            }
            ViewChangePayload::OffsetsWithVelocity(change) => {
                self.dispatch_offsets_velocity(trigger, change)
            }
            ViewChangePayload::ZoomFactor(change) => {
                self.dispatch_zoom(op_type, correlation_id, change)
            }
            ViewChangePayload::ZoomFactorWithVelocity(change) => self.dispatch_zoom_velocity(change),
        }
    }

    fn dispatch_offsets(
        &mut self,
        op_type: OperationType,
        correlation_id: CorrelationId,
        change: &mut OffsetsChange,
    ) -> RequestId {
        let anticipating = change.anticipated_base.is_some();
        let (base, zoom_factor) = match change.anticipated_base {
            Some(base) => (base.offsets, base.zoom_factor),
            None => {
                let zoom_factor = self.anticipated.zoom_factor(self.view.zoom_factor);
                let offsets = clamp_offsets(
                    self.anticipated.offsets(self.view.offsets),
                    self.view.max_offsets(zoom_factor),
                );
                (offsets, zoom_factor)
            }
        };
        let max = self.view.max_offsets(zoom_factor);

        if change.bring_into_view.is_some() {
            self.resolve_bring_into_view(correlation_id, change, base, zoom_factor, max);
        }

        if op_type == OperationType::UpdatePositionBy {
            let delta = Vector2::new(
                change.horizontal.unwrap_or(0.0),
                change.vertical.unwrap_or(0.0),
            );
            // Only the clamped step is sent so that queued deltas sum before clamping.
            let target = clamp_offsets(base + delta, max);
            let request_id = self
                .engine
                .try_update_position_by(target - clamp_offsets(base, max));
            if !anticipating {
                self.anticipated.set_offsets(target);
            }
            self.emit_scroll_starting(correlation_id, target, zoom_factor);
            return request_id;
        }

        let target = clamp_offsets(resolve_offsets(change, base, self.snap_points), max);
        trace!(
            target: "scrollkit.presenter",
            correlation_id = correlation_id.0,
            from_x = base.x,
            from_y = base.y,
            to_x = target.x,
            to_y = target.y,
            "offsets target resolved"
        );

        let request_id = if op_type.is_animated() {
            let duration = self.config.offsets_animation_duration(base.distance(target));
            let animation = PositionAnimation::new(target, duration);
            let request_id = self.engine.try_update_position_with_animation(&animation);
            self.anticipated.reset();
            request_id
        } else {
            let request_id = self.engine.try_update_position(target);
            if !anticipating {
                self.anticipated.set_offsets(target);
            }
            request_id
        };
        self.emit_scroll_starting(correlation_id, target, zoom_factor);
        request_id
    }

    fn resolve_bring_into_view(
        &mut self,
        correlation_id: CorrelationId,
        change: &mut OffsetsChange,
        base: Point,
        zoom_factor: f64,
        max: Point,
    ) {
        let Some(context) = change.bring_into_view.as_mut() else {
            return;
        };
        let Some(rect) = self.locator.and_then(|locator| context.content_rect(locator)) else {
            debug!(
                target: "scrollkit.presenter",
                correlation_id = correlation_id.0,
                element = context.element.0,
                "bring-into-view element not found"
            );
            change.horizontal = None;
            change.vertical = None;
            return;
        };
        let geometry = ViewportGeometry {
            current: base,
            viewport: self.view.viewport,
            zoom_factor,
            max_offsets: max,
        };
        let target = compute_target_offsets(context, rect, &geometry);
        context.applied_offset = target - base;
        change.horizontal = Some(target.x);
        change.vertical = Some(target.y);
        self.events.push(PresenterEvent::BringingIntoView {
            correlation_id,
            target_horizontal_offset: target.x,
            target_vertical_offset: target.y,
            applied_offset: context.applied_offset,
        });
    }

    fn dispatch_offsets_velocity(
        &mut self,
        trigger: OperationTrigger,
        change: &OffsetsChangeWithVelocity,
    ) -> RequestId {
        let mut velocity = change.velocity;
        if trigger.intersects(OperationTrigger::CONTROLLER) && self.state != InteractionState::Inertia {
            let floor = self.config.min_controller_velocity;
            velocity.x = raise_to_floor(velocity.x, floor);
            velocity.y = raise_to_floor(velocity.y, floor);
        }
        let decay = Vector2::new(
            decay_or(change.horizontal_decay_rate, self.config.position_inertia_decay_rate),
            decay_or(change.vertical_decay_rate, self.config.position_inertia_decay_rate),
        );
        self.engine.set_position_inertia_decay_rate(decay);
        self.anticipated.reset();
        self.engine.try_update_position_with_additional_velocity(velocity)
    }

    fn dispatch_zoom(
        &mut self,
        op_type: OperationType,
        correlation_id: CorrelationId,
        change: &ZoomFactorChange,
    ) -> RequestId {
        let anticipating = change.anticipated_base.is_some();
        let base = change.anticipated_base.unwrap_or_else(|| AnticipatedBase {
            offsets: self.anticipated.offsets(self.view.offsets),
            zoom_factor: self.anticipated.zoom_factor(self.view.zoom_factor),
        });
        let resolved = resolve_zoom(self.view, change, base, self.snap_points);
        trace!(
            target: "scrollkit.presenter",
            correlation_id = correlation_id.0,
            from = base.zoom_factor,
            to = resolved.zoom_factor,
            "zoom target resolved"
        );

        let request_id = if op_type.is_animated() {
            let duration = self
                .config
                .zoom_animation_duration((resolved.zoom_factor - base.zoom_factor).abs());
            let animation = ScalarAnimation::new(resolved.zoom_factor, duration);
            let request_id = self
                .engine
                .try_update_scale_with_animation(&animation, resolved.center);
            self.anticipated.reset();
            request_id
        } else {
            let request_id = self.engine.try_update_scale(resolved.zoom_factor, resolved.center);
            if !anticipating {
                self.anticipated.set_zoom_factor(resolved.zoom_factor);
                self.anticipated.set_offsets(resolved.offsets);
            }
            request_id
        };
        self.events.push(PresenterEvent::ZoomStarting {
            correlation_id,
            horizontal_offset: resolved.offsets.x,
            vertical_offset: resolved.offsets.y,
            zoom_factor: resolved.zoom_factor,
        });
        request_id
    }

    fn dispatch_zoom_velocity(&mut self, change: &ZoomFactorChangeWithVelocity) -> RequestId {
        let center = change
            .center_point
            .unwrap_or_else(|| self.view.default_zoom_center());
        self.engine.set_scale_inertia_decay_rate(decay_or(
            change.inertia_decay_rate,
            self.config.scale_inertia_decay_rate,
        ));
        self.anticipated.reset();
        self.engine
            .try_update_scale_with_additional_velocity(change.velocity, center)
    }

    fn emit_scroll_starting(&mut self, correlation_id: CorrelationId, target: Point, zoom_factor: f64) {
        self.events.push(PresenterEvent::ScrollStarting {
            correlation_id,
            horizontal_offset: target.x,
            vertical_offset: target.y,
            zoom_factor,
        });
    }
}

/// Fold a non-animated change into the anticipated view at request time
/// and record the view it was resolved against on the change.
///
/// Offsets accumulate unclamped, so queued relative deltas sum before the
/// result is clamped.
pub(crate) fn anticipate(
    anticipated: &mut AnticipatedView,
    view: &ViewState,
    snap_points: &SnapPointSets,
    payload: &mut ViewChangePayload,
) {
    let base = AnticipatedBase {
        offsets: anticipated.offsets(view.offsets),
        zoom_factor: anticipated.zoom_factor(view.zoom_factor),
    };
    match payload {
        ViewChangePayload::Offsets(change) if change.bring_into_view.is_none() => {
            anticipated.set_offsets(resolve_offsets(change, base.offsets, snap_points));
            change.anticipated_base = Some(base);
        }
        ViewChangePayload::ZoomFactor(change) => {
            let resolved = resolve_zoom(view, change, base, snap_points);
            anticipated.set_zoom_factor(resolved.zoom_factor);
            anticipated.set_offsets(resolved.offsets);
            change.anticipated_base = Some(base);
        }
        _ => {}
    }
}

/// Absolute target of `change` resolved against `base`, snapped unless the
/// change ignores snap points. Not clamped.
fn resolve_offsets(change: &OffsetsChange, base: Point, snap_points: &SnapPointSets) -> Point {
    let target = match change.kind {
        ViewKind::Absolute => Point::new(
            change.horizontal.unwrap_or(base.x),
            change.vertical.unwrap_or(base.y),
        ),
        ViewKind::RelativeToCurrentView => Point::new(
            base.x + change.horizontal.unwrap_or(0.0),
            base.y + change.vertical.unwrap_or(0.0),
        ),
    };
    if change.options.ignores_snap_points() {
        target
    } else {
        snap_points.snap_offsets(target, change.horizontal.is_some(), change.vertical.is_some())
    }
}

struct ZoomResolution {
    zoom_factor: f64,
    /// Post-zoom offsets, clamped.
    offsets: Point,
    center: Point,
}

fn resolve_zoom(
    view: &ViewState,
    change: &ZoomFactorChange,
    base: AnticipatedBase,
    snap_points: &SnapPointSets,
) -> ZoomResolution {
    let center = change
        .center_point
        .unwrap_or_else(|| view.default_zoom_center());
    let old_offsets = clamp_offsets(base.offsets, view.max_offsets(base.zoom_factor));

    let mut zoom_factor = match change.kind {
        ViewKind::Absolute => change.zoom_factor,
        ViewKind::RelativeToCurrentView => base.zoom_factor + change.zoom_factor,
    };
    if !change.options.ignores_snap_points() {
        zoom_factor = snap_points.snap_zoom_factor(zoom_factor);
    }
    let zoom_factor = view.bounds().clamp_scale(zoom_factor);

    let ratio = if base.zoom_factor > 0.0 {
        zoom_factor / base.zoom_factor
    } else {
        1.0
    };
    let offsets = clamp_offsets(
        Point::new(
            ratio * (old_offsets.x + center.x) - center.x,
            ratio * (old_offsets.y + center.y) - center.y,
        ),
        view.max_offsets(zoom_factor),
    );
    ZoomResolution {
        zoom_factor,
        offsets,
        center,
    }
}

pub(crate) fn clamp_offsets(offsets: Point, max: Point) -> Point {
    Point::new(offsets.x.clamp(0.0, max.x), offsets.y.clamp(0.0, max.y))
}

/// Nonzero components below `floor` in magnitude are raised to it.
fn raise_to_floor(value: f64, floor: f64) -> f64 {
    if value != 0.0 && value.abs() < floor {
        floor.copysign(value)
    } else {
        value
    }
}

fn decay_or(rate: Option<f64>, default: f64) -> f64 {
    rate.map_or(default, |rate| rate.clamp(0.0, 1.0))
}

#![forbid(unsafe_code)]

//! The scroll presenter.
//!
//! [`ScrollPresenter`] owns the operation queue, the completion reconciler,
//! the anticipated view, and the snap points of one scrollable surface, and
//! drives a [`MotionEngine`] through them.
//!
//! # Threading
//!
//! Everything runs on the host's UI thread. The host calls [`tick`] once per
//! frame, forwards every engine event through [`handle_engine_event`], and
//! drains [`PresenterEvent`]s with [`drain_events`].
//!
//! # Invariants
//!
//! 1. Every accepted request (non no-op correlation id) produces exactly one
//!    completion event.
//! 2. Completion events for request ids from the same engine are raised in
//!    increasing request id order.
//! 3. Nothing reaches the engine while no content is set.
//!
//! [`tick`]: ScrollPresenter::tick
//! [`handle_engine_event`]: ScrollPresenter::handle_engine_event
//! [`drain_events`]: ScrollPresenter::drain_events

use scrollkit_core::geometry::{Point, Size, Vector2};
use scrollkit_core::motion::{EngineEvent, InteractionState, MotionEngine, SnapDimension};
use scrollkit_core::snap::{ScrollSnapPoint, SnapPointSet, ZoomSnapPoint};
use tracing::{debug, info, warn};

use crate::anticipated::AnticipatedView;
use crate::bring_into_view::{BringIntoViewContext, BringIntoViewRequest, ElementLocator};
use crate::config::PresenterConfig;
use crate::controller::{
    ScrollController, ScrollControllerRequest, ScrollControllerValues, ScrollOrientation,
};
use crate::dispatch::{self, DispatchContext, ViewState, clamp_offsets};
use crate::error::{PresenterError, Result};
use crate::events::{CorrelationId, CorrelationIdGenerator, PresenterEvent, ViewChangeResult};
use crate::operation::{AsyncViewChangeOperation, OperationTrigger, OperationType};
use crate::options::{AnimationSettings, OptionsResolver, ViewChangeOptions, ViewKind};
use crate::queue::{Completion, OperationQueue};
use crate::reconciler::CompletionReconciler;
use crate::snap_points::SnapPointSets;
use crate::view_change::{
    OffsetsChange, OffsetsChangeWithVelocity, ViewChangePayload, ZoomFactorChange,
    ZoomFactorChangeWithVelocity,
};

/// Asynchronous scroll and zoom presenter over a motion engine.
pub struct ScrollPresenter<E: MotionEngine> {
    config: PresenterConfig,
    engine: Option<E>,
    content: Option<Size>,
    view: ViewState,
    anticipated: AnticipatedView,
    queue: OperationQueue,
    reconciler: CompletionReconciler,
    resolver: OptionsResolver,
    snap_points: SnapPointSets,
    correlation_ids: CorrelationIdGenerator,
    horizontal_controller: Option<Box<dyn ScrollController>>,
    vertical_controller: Option<Box<dyn ScrollController>>,
    locator: Option<Box<dyn ElementLocator>>,
    events: Vec<PresenterEvent>,
}

impl<E: MotionEngine> std::fmt::Debug for ScrollPresenter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollPresenter")
            .field("attached", &self.engine.is_some())
            .field("content", &self.content)
            .field("view", &self.view)
            .field("state", &self.reconciler.state())
            .field("queued", &self.queue.len())
            .field("pending_events", &self.events.len())
            .finish()
    }
}

impl<E: MotionEngine> Default for ScrollPresenter<E> {
    fn default() -> Self {
        Self::new(PresenterConfig::default())
    }
}

impl<E: MotionEngine> ScrollPresenter<E> {
    pub fn new(config: PresenterConfig) -> Self {
        let resolver = OptionsResolver::default().with_override(config.animations_enabled_override);
        Self {
            view: ViewState::new(config.min_zoom_factor, config.max_zoom_factor),
            config,
            engine: None,
            content: None,
            anticipated: AnticipatedView::new(),
            queue: OperationQueue::new(),
            reconciler: CompletionReconciler::new(),
            resolver,
            snap_points: SnapPointSets::new(),
            correlation_ids: CorrelationIdGenerator::new(),
            horizontal_controller: None,
            vertical_controller: None,
            locator: None,
            events: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Engine lifecycle
    // -------------------------------------------------------------------------

    /// Attach a motion engine.
    ///
    /// Only the newest operation requested while detached survives; older
    /// ones complete as interrupted.
    pub fn attach(&mut self, engine: E) {
        if self.engine.is_some() {
            self.detach();
        }
        self.engine = Some(engine);
        self.configure_engine();
        let retired = self.queue.retire_delayed_except_newest();
        self.reanticipate();
        info!(
            target: "scrollkit.presenter",
            retired = retired.len(),
            queued = self.queue.len(),
            "motion engine attached"
        );
        self.process_completions(retired);
    }

    /// Detach the engine, interrupting every pending operation.
    pub fn detach(&mut self) -> Option<E> {
        let engine = self.engine.take()?;
        let drained = self.queue.drain_all(ViewChangeResult::Interrupted);
        info!(
            target: "scrollkit.presenter",
            interrupted = drained.len(),
            "motion engine detached"
        );
        self.process_completions(drained);
        if let Some(state) = self.reconciler.reset() {
            self.events.push(PresenterEvent::StateChanged { state });
        }
        self.anticipated.reset();
        Some(engine)
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    fn configure_engine(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        engine.set_bounds(self.view.bounds());
        let decay = self.config.position_inertia_decay_rate;
        engine.set_position_inertia_decay_rate(Vector2::new(decay, decay));
        engine.set_scale_inertia_decay_rate(self.config.scale_inertia_decay_rate);
        self.snap_points.configure(engine, &SnapDimension::ALL);
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Set or remove the content. Removing it interrupts every pending
    /// operation.
    pub fn set_content(&mut self, extent: Option<Size>) {
        if extent.is_none() && self.content.is_some() {
            let drained = self.queue.drain_all(ViewChangeResult::Interrupted);
            self.process_completions(drained);
            self.anticipated.reset();
        }
        self.content = extent;
        self.view.extent = extent.unwrap_or(Size::ZERO);
        self.on_geometry_changed();
    }

    pub fn set_viewport_size(&mut self, viewport: Size) {
        if self.view.viewport == viewport {
            return;
        }
        self.view.viewport = viewport;
        let regenerated = self.snap_points.set_viewport(viewport);
        if let Some(engine) = self.engine.as_mut() {
            self.snap_points.configure(engine, &regenerated);
        }
        self.on_geometry_changed();
    }

    pub fn set_content_layout_offset(&mut self, offset: Vector2) {
        if self.view.content_layout_offset == offset {
            return;
        }
        self.view.content_layout_offset = offset;
        self.on_geometry_changed();
    }

    pub fn set_min_zoom_factor(&mut self, min_zoom_factor: f64) -> Result<()> {
        self.set_zoom_factor_bounds(min_zoom_factor, self.view.max_zoom_factor)
    }

    pub fn set_max_zoom_factor(&mut self, max_zoom_factor: f64) -> Result<()> {
        self.set_zoom_factor_bounds(self.view.min_zoom_factor, max_zoom_factor)
    }

    fn set_zoom_factor_bounds(&mut self, min: f64, max: f64) -> Result<()> {
        for value in [min, max] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PresenterError::NonFiniteZoomFactor(value));
            }
        }
        if min > max {
            return Err(PresenterError::InvalidZoomFactorBounds { min, max });
        }
        self.view.min_zoom_factor = min;
        self.view.max_zoom_factor = max;
        self.on_geometry_changed();
        Ok(())
    }

    /// Layout moved under queued operations: restart their countdowns and
    /// republish limits.
    fn on_geometry_changed(&mut self) {
        self.queue.reset_queued_countdowns();
        if let Some(engine) = self.engine.as_mut() {
            engine.set_bounds(self.view.bounds());
        }
        self.push_controller_values();
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// Scroll to absolute offsets.
    pub fn scroll_to(
        &mut self,
        horizontal_offset: f64,
        vertical_offset: f64,
        options: ViewChangeOptions,
    ) -> Result<CorrelationId> {
        check_offset(horizontal_offset)?;
        check_offset(vertical_offset)?;
        Ok(self.request_offsets(
            ViewKind::Absolute,
            Some(horizontal_offset),
            Some(vertical_offset),
            options,
            OperationTrigger::DIRECT_CALL,
        ))
    }

    /// Scroll by a delta from the anticipated offsets.
    pub fn scroll_by(
        &mut self,
        horizontal_delta: f64,
        vertical_delta: f64,
        options: ViewChangeOptions,
    ) -> Result<CorrelationId> {
        check_offset(horizontal_delta)?;
        check_offset(vertical_delta)?;
        Ok(self.request_offsets(
            ViewKind::RelativeToCurrentView,
            Some(horizontal_delta),
            Some(vertical_delta),
            options,
            OperationTrigger::DIRECT_CALL,
        ))
    }

    /// Add velocity to the current motion, starting inertia.
    ///
    /// `inertia_decay_rate` components are clamped to `[0, 1]`; `None` keeps
    /// the configured default.
    pub fn add_scroll_velocity(
        &mut self,
        velocity: Vector2,
        inertia_decay_rate: Option<Vector2>,
    ) -> Result<CorrelationId> {
        if !velocity.is_finite() || inertia_decay_rate.is_some_and(|d| !d.is_finite()) {
            return Err(PresenterError::NonFiniteVelocity);
        }
        if self.content.is_none() {
            return Ok(CorrelationId::NO_OP);
        }
        let change = OffsetsChangeWithVelocity {
            velocity,
            horizontal_decay_rate: inertia_decay_rate.map(|d| d.x),
            vertical_decay_rate: inertia_decay_rate.map(|d| d.y),
        };
        Ok(self.admit(
            OperationType::UpdatePositionWithVelocity,
            OperationTrigger::DIRECT_CALL,
            ViewChangePayload::OffsetsWithVelocity(change),
        ))
    }

    /// Zoom to an absolute factor about `center_point`, or the viewport
    /// center when `None`.
    pub fn zoom_to(
        &mut self,
        zoom_factor: f64,
        center_point: Option<Point>,
        options: ViewChangeOptions,
    ) -> Result<CorrelationId> {
        self.request_zoom(ViewKind::Absolute, zoom_factor, center_point, options)
    }

    /// Zoom by a delta from the anticipated zoom factor.
    pub fn zoom_by(
        &mut self,
        zoom_delta: f64,
        center_point: Option<Point>,
        options: ViewChangeOptions,
    ) -> Result<CorrelationId> {
        self.request_zoom(ViewKind::RelativeToCurrentView, zoom_delta, center_point, options)
    }

    pub fn add_zoom_velocity(
        &mut self,
        velocity: f64,
        center_point: Option<Point>,
        inertia_decay_rate: Option<f64>,
    ) -> Result<CorrelationId> {
        if !velocity.is_finite()
            || inertia_decay_rate.is_some_and(|d| !d.is_finite())
            || center_point.is_some_and(|c| !c.is_finite())
        {
            return Err(PresenterError::NonFiniteVelocity);
        }
        if self.content.is_none() {
            return Ok(CorrelationId::NO_OP);
        }
        let change = ZoomFactorChangeWithVelocity {
            velocity,
            center_point,
            inertia_decay_rate,
        };
        Ok(self.admit(
            OperationType::UpdateScaleWithVelocity,
            OperationTrigger::DIRECT_CALL,
            ViewChangePayload::ZoomFactorWithVelocity(change),
        ))
    }

    /// Scroll an element into view.
    ///
    /// The target is resolved at dispatch time against the element's bounds
    /// at that moment and announced with [`PresenterEvent::BringingIntoView`].
    pub fn bring_into_view(&mut self, request: &BringIntoViewRequest) -> Result<CorrelationId> {
        check_offset(request.horizontal_offset)?;
        check_offset(request.vertical_offset)?;
        for ratio in [request.horizontal_alignment_ratio, request.vertical_alignment_ratio]
            .into_iter()
            .flatten()
        {
            check_offset(ratio)?;
        }
        if self.content.is_none() {
            return Ok(CorrelationId::NO_OP);
        }
        let mut change = OffsetsChange::new(ViewKind::Absolute, None, None, request.options);
        change.bring_into_view = Some(BringIntoViewContext::from_request(request));
        let op_type = self.resolver.offsets_operation(ViewKind::Absolute, &request.options);
        Ok(self.admit(
            op_type,
            OperationTrigger::BRING_INTO_VIEW,
            ViewChangePayload::Offsets(change),
        ))
    }

    /// Handle a request raised by a scroll controller.
    ///
    /// Requests arriving before an earlier controller request was dispatched
    /// are folded into it and share its correlation id.
    pub fn handle_scroll_controller_request(
        &mut self,
        orientation: ScrollOrientation,
        request: ScrollControllerRequest,
    ) -> Result<CorrelationId> {
        let trigger = orientation.trigger();
        let on_axis = |value: f64| match orientation {
            ScrollOrientation::Horizontal => (Some(value), None),
            ScrollOrientation::Vertical => (None, Some(value)),
        };
        match request {
            ScrollControllerRequest::ScrollTo { offset, options } => {
                check_offset(offset)?;
                let (h, v) = on_axis(offset);
                Ok(self.request_offsets(ViewKind::Absolute, h, v, options, trigger))
            }
            ScrollControllerRequest::ScrollBy { delta, options } => {
                check_offset(delta)?;
                let (h, v) = on_axis(delta);
                Ok(self.request_offsets(ViewKind::RelativeToCurrentView, h, v, options, trigger))
            }
            ScrollControllerRequest::AddScrollVelocity {
                velocity,
                inertia_decay_rate,
            } => {
                if !velocity.is_finite() || inertia_decay_rate.is_some_and(|d| !d.is_finite()) {
                    return Err(PresenterError::NonFiniteVelocity);
                }
                if self.content.is_none() {
                    return Ok(CorrelationId::NO_OP);
                }
                if let Some(key) = self.queue.find_coalescable_velocity()
                    && let Some(op) = self.queue.get_mut(key)
                {
                    if let ViewChangePayload::OffsetsWithVelocity(change) = op.payload_mut() {
                        match orientation {
                            ScrollOrientation::Horizontal => {
                                change.absorb_horizontal(velocity, inertia_decay_rate);
                            }
                            ScrollOrientation::Vertical => {
                                change.absorb_vertical(velocity, inertia_decay_rate);
                            }
                        }
                    }
                    op.add_trigger(trigger);
                    debug!(
                        target: "scrollkit.presenter",
                        correlation_id = op.correlation_id().0,
                        ?orientation,
                        "controller velocity coalesced"
                    );
                    return Ok(op.correlation_id());
                }
                let mut change = OffsetsChangeWithVelocity {
                    velocity: Vector2::ZERO,
                    horizontal_decay_rate: None,
                    vertical_decay_rate: None,
                };
                match orientation {
                    ScrollOrientation::Horizontal => {
                        change.absorb_horizontal(velocity, inertia_decay_rate);
                    }
                    ScrollOrientation::Vertical => {
                        change.absorb_vertical(velocity, inertia_decay_rate);
                    }
                }
                Ok(self.admit(
                    OperationType::UpdatePositionWithVelocity,
                    trigger,
                    ViewChangePayload::OffsetsWithVelocity(change),
                ))
            }
        }
    }

    fn request_offsets(
        &mut self,
        kind: ViewKind,
        horizontal: Option<f64>,
        vertical: Option<f64>,
        options: ViewChangeOptions,
        trigger: OperationTrigger,
    ) -> CorrelationId {
        if self.content.is_none() {
            return CorrelationId::NO_OP;
        }
        let op_type = self.resolver.offsets_operation(kind, &options);
        let mut payload =
            ViewChangePayload::Offsets(OffsetsChange::new(kind, horizontal, vertical, options));
        self.anticipate(op_type, &mut payload);

        if trigger.intersects(OperationTrigger::CONTROLLER)
            && let ViewChangePayload::Offsets(change) = &payload
            && let Some(key) = self.queue.find_coalescable_offsets(kind, options)
            && let Some(op) = self.queue.get_mut(key)
        {
            if let ViewChangePayload::Offsets(existing) = op.payload_mut() {
                existing.merge(change);
            }
            op.add_trigger(trigger);
            debug!(
                target: "scrollkit.presenter",
                correlation_id = op.correlation_id().0,
                "controller offsets change coalesced"
            );
            return op.correlation_id();
        }

        self.admit(op_type, trigger, payload)
    }

    fn request_zoom(
        &mut self,
        kind: ViewKind,
        zoom_factor: f64,
        center_point: Option<Point>,
        options: ViewChangeOptions,
    ) -> Result<CorrelationId> {
        if !zoom_factor.is_finite() {
            return Err(PresenterError::NonFiniteZoomFactor(zoom_factor));
        }
        if let Some(center) = center_point
            && !center.is_finite()
        {
            return Err(PresenterError::NonFiniteOffset(if center.x.is_finite() {
                center.y
            } else {
                center.x
            }));
        }
        if self.content.is_none() {
            return Ok(CorrelationId::NO_OP);
        }
        let op_type = self.resolver.zoom_operation(&options);
        let mut payload = ViewChangePayload::ZoomFactor(ZoomFactorChange::new(
            kind,
            zoom_factor,
            center_point,
            options,
        ));
        self.anticipate(op_type, &mut payload);
        Ok(self.admit(op_type, OperationTrigger::DIRECT_CALL, payload))
    }

    /// Fold a non-animated request into the anticipated view.
    fn anticipate(&mut self, op_type: OperationType, payload: &mut ViewChangePayload) {
        if !op_type.is_animated() {
            dispatch::anticipate(&mut self.anticipated, &self.view, &self.snap_points, payload);
        }
    }

    /// Rebuild the anticipated view from the operations still queued.
    fn reanticipate(&mut self) {
        self.anticipated.reset();
        let keys: Vec<_> = self.queue.iter().map(|(key, _)| key).collect();
        for key in keys {
            let Some(op) = self.queue.get_mut(key) else {
                continue;
            };
            if !op.op_type().is_animated() {
                dispatch::anticipate(
                    &mut self.anticipated,
                    &self.view,
                    &self.snap_points,
                    op.payload_mut(),
                );
            }
        }
    }

    /// Queue a new operation and apply supersession.
    fn admit(
        &mut self,
        op_type: OperationType,
        trigger: OperationTrigger,
        payload: ViewChangePayload,
    ) -> CorrelationId {
        let correlation_id = self.correlation_ids.next_id();
        let supersedes = trigger == OperationTrigger::DIRECT_CALL
            && !op_type.is_animated()
            && match &payload {
                ViewChangePayload::Offsets(change) => {
                    change.kind == ViewKind::Absolute && change.is_complete()
                }
                ViewChangePayload::ZoomFactor(change) => change.kind == ViewKind::Absolute,
                _ => false,
            };
        let op = AsyncViewChangeOperation::new(op_type, trigger, correlation_id, payload)
            .with_ticks(
                self.config.queued_operation_ticks,
                self.config.non_animated_completion_ticks,
            )
            .delayed(self.engine.is_none());
        let key = self.queue.enqueue(op);
        let superseded = if supersedes {
            self.queue.cancel_superseded(op_type, key)
        } else {
            0
        };
        debug!(
            target: "scrollkit.presenter",
            correlation_id = correlation_id.0,
            op_type = op_type.as_str(),
            delayed = self.engine.is_none(),
            superseded,
            "view change requested"
        );
        correlation_id
    }

    // -------------------------------------------------------------------------
    // Driving
    // -------------------------------------------------------------------------

    /// Advance the queue by one frame.
    pub fn tick(&mut self) {
        let _span = tracing::debug_span!(
            "scrollkit.tick",
            queued = self.queue.len(),
            state = ?self.reconciler.state(),
        )
        .entered();

        let completions = {
            let Self {
                engine,
                queue,
                anticipated,
                view,
                snap_points,
                config,
                locator,
                events,
                reconciler,
                ..
            } = &mut *self;
            let Some(engine) = engine.as_mut() else {
                return;
            };
            let mut context = DispatchContext {
                engine,
                anticipated,
                view,
                snap_points,
                config,
                locator: locator.as_deref(),
                state: reconciler.state(),
                events,
            };
            queue.tick(|op| context.dispatch(op))
        };
        self.process_completions(completions);
    }

    /// Feed one engine event.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        let _span = tracing::debug_span!(
            "scrollkit.engine_event",
            kind = event.kind(),
            request_id = event.request_id().0,
        )
        .entered();

        if let EngineEvent::ValuesChanged {
            position, scale, ..
        } = event
        {
            self.view.offsets = position;
            self.view.zoom_factor = scale;
            self.events.push(PresenterEvent::ViewChanged {
                horizontal_offset: position.x,
                vertical_offset: position.y,
                zoom_factor: scale,
            });
            self.push_controller_values();
        }

        let transition = self.reconciler.transition(&event);
        if let Some(state) = transition.entered_state {
            self.events.push(PresenterEvent::StateChanged { state });
        }
        if let Some(sweep) = transition.sweep {
            let completions = self.queue.sweep(&sweep);
            self.process_completions(completions);
        }

        if matches!(event, EngineEvent::IdleStateEntered { .. }) {
            let changed = self
                .snap_points
                .update_ignored_values(self.view.offsets, self.view.zoom_factor);
            if let Some(engine) = self.engine.as_mut() {
                self.snap_points.configure(engine, &changed);
            }
        }
    }

    /// Hand an active pointer to the engine. Rejections are logged and
    /// otherwise ignored.
    pub fn start_manipulation(&mut self, pointer_id: u32) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if let Err(err) = engine.try_redirect_for_manipulation(pointer_id) {
            warn!(
                target: "scrollkit.presenter",
                pointer_id,
                error = %err,
                "pointer redirection failed"
            );
        }
    }

    /// Raise completion events and notify the controllers that asked.
    fn process_completions(&mut self, completions: Vec<Completion>) {
        for completion in completions {
            let Completion {
                correlation_id,
                result,
                ..
            } = completion;
            self.events.push(if completion.is_zoom() {
                PresenterEvent::ZoomCompleted {
                    correlation_id,
                    result,
                }
            } else {
                PresenterEvent::ScrollCompleted {
                    correlation_id,
                    result,
                }
            });
            if completion.trigger.contains(OperationTrigger::HORIZONTAL_CONTROLLER_REQUEST)
                && let Some(controller) = self.horizontal_controller.as_mut()
            {
                controller.notify_requested_scroll_completed(correlation_id);
            }
            if completion.trigger.contains(OperationTrigger::VERTICAL_CONTROLLER_REQUEST)
                && let Some(controller) = self.vertical_controller.as_mut()
            {
                controller.notify_requested_scroll_completed(correlation_id);
            }
            if completion.op_type.is_velocity() {
                self.restore_inertia_decay_rate(completion.op_type);
            }
        }
        if self.queue.is_empty() {
            self.anticipated.reset();
        }
    }

    /// Put the default decay rate back once no velocity operation of the
    /// same kind is pending.
    fn restore_inertia_decay_rate(&mut self, op_type: OperationType) {
        if self.queue.iter().any(|(_, op)| op.op_type() == op_type) {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if op_type.is_scale() {
            engine.set_scale_inertia_decay_rate(self.config.scale_inertia_decay_rate);
        } else {
            let decay = self.config.position_inertia_decay_rate;
            engine.set_position_inertia_decay_rate(Vector2::new(decay, decay));
        }
    }

    /// Take every event raised since the last call.
    pub fn drain_events(&mut self) -> Vec<PresenterEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Snap points
    // -------------------------------------------------------------------------

    pub fn scroll_snap_points(&self, orientation: ScrollOrientation) -> &SnapPointSet<ScrollSnapPoint> {
        self.snap_points.scroll(orientation)
    }

    pub fn zoom_snap_points(&self) -> &SnapPointSet<ZoomSnapPoint> {
        self.snap_points.zoom()
    }

    pub fn push_scroll_snap_point(
        &mut self,
        orientation: ScrollOrientation,
        point: ScrollSnapPoint,
    ) -> Result<()> {
        let index = self.snap_points.scroll(orientation).len();
        self.insert_scroll_snap_point(orientation, index, point)
    }

    pub fn insert_scroll_snap_point(
        &mut self,
        orientation: ScrollOrientation,
        index: usize,
        point: ScrollSnapPoint,
    ) -> Result<()> {
        self.snap_points.insert_scroll(orientation, index, point)?;
        self.snap_points_changed(orientation.snap_dimension());
        Ok(())
    }

    pub fn remove_scroll_snap_point(
        &mut self,
        orientation: ScrollOrientation,
        index: usize,
    ) -> Result<ScrollSnapPoint> {
        let removed = self.snap_points.remove_scroll(orientation, index)?;
        self.snap_points_changed(orientation.snap_dimension());
        Ok(removed)
    }

    pub fn replace_scroll_snap_point(
        &mut self,
        orientation: ScrollOrientation,
        index: usize,
        point: ScrollSnapPoint,
    ) -> Result<ScrollSnapPoint> {
        let previous = self.snap_points.replace_scroll(orientation, index, point)?;
        self.snap_points_changed(orientation.snap_dimension());
        Ok(previous)
    }

    pub fn clear_scroll_snap_points(&mut self, orientation: ScrollOrientation) {
        self.snap_points.clear_scroll(orientation);
        self.snap_points_changed(orientation.snap_dimension());
    }

    pub fn push_zoom_snap_point(&mut self, point: ZoomSnapPoint) -> Result<()> {
        let index = self.snap_points.zoom().len();
        self.insert_zoom_snap_point(index, point)
    }

    pub fn insert_zoom_snap_point(&mut self, index: usize, point: ZoomSnapPoint) -> Result<()> {
        self.snap_points.insert_zoom(index, point)?;
        self.snap_points_changed(SnapDimension::Zoom);
        Ok(())
    }

    pub fn remove_zoom_snap_point(&mut self, index: usize) -> Result<ZoomSnapPoint> {
        let removed = self.snap_points.remove_zoom(index)?;
        self.snap_points_changed(SnapDimension::Zoom);
        Ok(removed)
    }

    pub fn replace_zoom_snap_point(&mut self, index: usize, point: ZoomSnapPoint) -> Result<ZoomSnapPoint> {
        let previous = self.snap_points.replace_zoom(index, point)?;
        self.snap_points_changed(SnapDimension::Zoom);
        Ok(previous)
    }

    pub fn clear_zoom_snap_points(&mut self) {
        self.snap_points.clear_zoom();
        self.snap_points_changed(SnapDimension::Zoom);
    }

    fn snap_points_changed(&mut self, dimension: SnapDimension) {
        if let Some(engine) = self.engine.as_mut() {
            self.snap_points.configure(engine, &[dimension]);
        }
    }

    // -------------------------------------------------------------------------
    // Collaborators
    // -------------------------------------------------------------------------

    pub fn set_scroll_controller(
        &mut self,
        orientation: ScrollOrientation,
        controller: Option<Box<dyn ScrollController>>,
    ) {
        match orientation {
            ScrollOrientation::Horizontal => self.horizontal_controller = controller,
            ScrollOrientation::Vertical => self.vertical_controller = controller,
        }
        self.push_controller_values();
    }

    pub fn set_element_locator(&mut self, locator: Option<Box<dyn ElementLocator>>) {
        self.locator = locator;
    }

    pub fn set_animation_settings(&mut self, settings: Box<dyn AnimationSettings>) {
        self.resolver.set_settings(settings);
    }

    fn push_controller_values(&mut self) {
        let max = self.view.max_offsets(self.view.zoom_factor);
        let has_content = self.content.is_some();
        if let Some(controller) = self.horizontal_controller.as_mut() {
            controller.set_values(ScrollControllerValues {
                min_offset: 0.0,
                max_offset: max.x,
                offset: self.view.offsets.x,
                viewport_length: self.view.viewport.width,
            });
            controller.set_is_scrollable(has_content && max.x > 0.0);
        }
        if let Some(controller) = self.vertical_controller.as_mut() {
            controller.set_values(ScrollControllerValues {
                min_offset: 0.0,
                max_offset: max.y,
                offset: self.view.offsets.y,
                viewport_length: self.view.viewport.height,
            });
            controller.set_is_scrollable(has_content && max.y > 0.0);
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// Confirmed offsets.
    pub fn offsets(&self) -> Point {
        self.view.offsets
    }

    pub fn horizontal_offset(&self) -> f64 {
        self.view.offsets.x
    }

    pub fn vertical_offset(&self) -> f64 {
        self.view.offsets.y
    }

    /// Confirmed zoom factor.
    pub fn zoom_factor(&self) -> f64 {
        self.view.zoom_factor
    }

    /// Offsets once every dispatched non-animated operation lands.
    /// Offsets once every queued non-animated request is applied, clamped to
    /// the scrollable range.
    pub fn anticipated_offsets(&self) -> Point {
        if !self.anticipated.is_pending() {
            return self.view.offsets;
        }
        let max = self.view.max_offsets(self.anticipated_zoom_factor());
        clamp_offsets(self.anticipated.offsets(self.view.offsets), max)
    }

    pub fn anticipated_zoom_factor(&self) -> f64 {
        self.anticipated.zoom_factor(self.view.zoom_factor)
    }

    pub fn state(&self) -> InteractionState {
        self.reconciler.state()
    }

    pub fn content(&self) -> Option<Size> {
        self.content
    }

    pub fn viewport(&self) -> Size {
        self.view.viewport
    }

    pub fn min_zoom_factor(&self) -> f64 {
        self.view.min_zoom_factor
    }

    pub fn max_zoom_factor(&self) -> f64 {
        self.view.max_zoom_factor
    }

    /// Scrollable extent at the confirmed zoom factor.
    pub fn scrollable_extent(&self) -> Size {
        let max = self.view.max_offsets(self.view.zoom_factor);
        Size::new(max.x, max.y)
    }

    /// Number of operations not yet completed.
    pub fn pending_operations(&self) -> usize {
        self.queue.len()
    }
}

fn check_offset(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PresenterError::NonFiniteOffset(value))
    }
}

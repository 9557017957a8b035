#![forbid(unsafe_code)]

//! One queued or in-flight view change.
//!
//! # Lifecycle
//!
//! ```text
//! Delayed ──attach──▶ Queued ──countdown 0, requirement met──▶ Dispatched ──engine──▶ (removed)
//!                       │                                          │
//!                       └──cancel──▶ Canceled ──next tick──▶ (removed, Interrupted)
//! ```
//!
//! Dispatched non-animated operations carry a completion countdown so they
//! still complete when the engine never reports anything for them.

use bitflags::bitflags;
use scrollkit_core::motion::RequestId;

use crate::events::CorrelationId;
use crate::queue::OperationKey;
use crate::view_change::ViewChangePayload;

/// Engine primitive an operation dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    UpdatePosition,
    UpdatePositionBy,
    UpdatePositionWithAnimation,
    UpdatePositionWithVelocity,
    UpdateScale,
    UpdateScaleWithAnimation,
    UpdateScaleWithVelocity,
}

impl OperationType {
    /// Animated and velocity operations: the engine owns the trajectory.
    #[inline]
    pub const fn is_animated(self) -> bool {
        matches!(
            self,
            Self::UpdatePositionWithAnimation
                | Self::UpdatePositionWithVelocity
                | Self::UpdateScaleWithAnimation
                | Self::UpdateScaleWithVelocity
        )
    }

    #[inline]
    pub const fn is_velocity(self) -> bool {
        matches!(
            self,
            Self::UpdatePositionWithVelocity | Self::UpdateScaleWithVelocity
        )
    }

    #[inline]
    pub const fn is_scale(self) -> bool {
        matches!(
            self,
            Self::UpdateScale | Self::UpdateScaleWithAnimation | Self::UpdateScaleWithVelocity
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpdatePosition => "update_position",
            Self::UpdatePositionBy => "update_position_by",
            Self::UpdatePositionWithAnimation => "update_position_with_animation",
            Self::UpdatePositionWithVelocity => "update_position_with_velocity",
            Self::UpdateScale => "update_scale",
            Self::UpdateScaleWithAnimation => "update_scale_with_animation",
            Self::UpdateScaleWithVelocity => "update_scale_with_velocity",
        }
    }
}

bitflags! {
    /// Where a view change came from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OperationTrigger: u8 {
        /// Public API call.
        const DIRECT_CALL                    = 0b0001;
        /// Horizontal scroll controller.
        const HORIZONTAL_CONTROLLER_REQUEST  = 0b0010;
        /// Vertical scroll controller.
        const VERTICAL_CONTROLLER_REQUEST    = 0b0100;
        /// Bring-into-view request.
        const BRING_INTO_VIEW                = 0b1000;
        /// Either scroll controller.
        const CONTROLLER = Self::HORIZONTAL_CONTROLLER_REQUEST.bits()
            | Self::VERTICAL_CONTROLLER_REQUEST.bits();
    }
}

bitflags! {
    /// Status bits of an operation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OperationFlags: u8 {
        /// Parked until the presenter is attached to an engine.
        const DELAYED    = 0b0001;
        /// Retired before dispatch.
        const CANCELED   = 0b0010;
        /// Handed to the engine.
        const DISPATCHED = 0b0100;
        const COMPLETED  = 0b1000;
    }
}

/// A view change owned by the operation queue.
#[derive(Debug, Clone)]
pub struct AsyncViewChangeOperation {
    op_type: OperationType,
    trigger: OperationTrigger,
    correlation_id: CorrelationId,
    request_id: RequestId,
    flags: OperationFlags,
    queued_ticks: u8,
    max_queued_ticks: u8,
    completion_ticks: u8,
    non_animated_completion_ticks: u8,
    required: Option<OperationKey>,
    payload: ViewChangePayload,
}

impl AsyncViewChangeOperation {
    pub fn new(
        op_type: OperationType,
        trigger: OperationTrigger,
        correlation_id: CorrelationId,
        payload: ViewChangePayload,
    ) -> Self {
        Self {
            op_type,
            trigger,
            correlation_id,
            request_id: RequestId::NONE,
            flags: OperationFlags::empty(),
            queued_ticks: 3,
            max_queued_ticks: 3,
            completion_ticks: 0,
            non_animated_completion_ticks: 2,
            required: None,
            payload,
        }
    }

    /// Set the dispatch countdown and the forced completion delay.
    #[must_use]
    pub fn with_ticks(mut self, queued_ticks: u8, non_animated_completion_ticks: u8) -> Self {
        self.queued_ticks = queued_ticks;
        self.max_queued_ticks = queued_ticks;
        self.non_animated_completion_ticks = non_animated_completion_ticks.max(1);
        self
    }

    #[must_use]
    pub fn delayed(mut self, delayed: bool) -> Self {
        self.flags.set(OperationFlags::DELAYED, delayed);
        self
    }

    #[inline]
    pub fn op_type(&self) -> OperationType {
        self.op_type
    }

    #[inline]
    pub fn trigger(&self) -> OperationTrigger {
        self.trigger
    }

    #[inline]
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    #[inline]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[inline]
    pub fn flags(&self) -> OperationFlags {
        self.flags
    }

    #[inline]
    pub fn payload(&self) -> &ViewChangePayload {
        &self.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut ViewChangePayload {
        &mut self.payload
    }

    #[inline]
    pub fn required(&self) -> Option<OperationKey> {
        self.required
    }

    pub(crate) fn set_required(&mut self, required: Option<OperationKey>) {
        self.required = required;
    }

    pub(crate) fn add_trigger(&mut self, trigger: OperationTrigger) {
        self.trigger |= trigger;
    }

    #[inline]
    pub fn queued_ticks(&self) -> u8 {
        self.queued_ticks
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        self.op_type.is_animated()
    }

    #[inline]
    pub fn is_delayed(&self) -> bool {
        self.flags.contains(OperationFlags::DELAYED)
    }

    #[inline]
    pub fn is_canceled(&self) -> bool {
        self.flags.contains(OperationFlags::CANCELED)
    }

    #[inline]
    pub fn is_dispatched(&self) -> bool {
        self.flags.contains(OperationFlags::DISPATCHED)
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.flags.contains(OperationFlags::COMPLETED)
    }

    /// Waiting for its countdown: attached, not yet dispatched, still live.
    #[inline]
    pub fn is_queued(&self) -> bool {
        !self.flags.intersects(
            OperationFlags::DELAYED
                | OperationFlags::DISPATCHED
                | OperationFlags::CANCELED
                | OperationFlags::COMPLETED,
        )
    }

    /// Queued and already counting down.
    #[inline]
    pub fn is_unqueueing(&self) -> bool {
        self.is_queued() && self.queued_ticks < self.max_queued_ticks
    }

    /// Decrement the dispatch countdown. Returns `true` once it is zero.
    pub fn tick_queued(&mut self) -> bool {
        self.queued_ticks = self.queued_ticks.saturating_sub(1);
        self.queued_ticks == 0
    }

    /// Restart the dispatch countdown.
    pub fn reset_queued_ticks(&mut self) {
        self.queued_ticks = self.max_queued_ticks;
    }

    /// Decrement the forced completion countdown of a dispatched
    /// non-animated operation. Returns `true` once it is zero.
    pub fn tick_non_animated(&mut self) -> bool {
        self.completion_ticks = self.completion_ticks.saturating_sub(1);
        self.completion_ticks == 0
    }

    pub(crate) fn mark_dispatched(&mut self, request_id: RequestId) {
        self.request_id = request_id;
        self.flags.insert(OperationFlags::DISPATCHED);
        self.completion_ticks = self.non_animated_completion_ticks;
    }

    pub(crate) fn mark_undelayed(&mut self) {
        self.flags.remove(OperationFlags::DELAYED);
        self.reset_queued_ticks();
    }

    pub(crate) fn cancel(&mut self) {
        self.flags.insert(OperationFlags::CANCELED);
    }

    pub(crate) fn mark_completed(&mut self) {
        self.flags.insert(OperationFlags::COMPLETED);
    }
}

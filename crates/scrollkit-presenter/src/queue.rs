#![forbid(unsafe_code)]

//! View-change operation queue.
//!
//! Operations live in a generational arena owned by the queue. Other
//! operations refer to a required predecessor through an [`OperationKey`];
//! a key whose slot was freed or reused resolves to nothing and counts as
//! satisfied.
//!
//! # Invariants
//!
//! 1. Operations are visited in admission order.
//! 2. An operation is removed exactly once, and produces exactly one
//!    [`Completion`] when it is.
//! 3. A queued operation whose requirement is unmet holds back every queued
//!    operation after it for the rest of the tick.
//! 4. Delayed operations never tick.

use scrollkit_core::motion::RequestId;
use tracing::{debug, trace};

use crate::events::{CorrelationId, ViewChangeResult};
use crate::operation::{AsyncViewChangeOperation, OperationTrigger, OperationType};
use crate::options::{ViewChangeOptions, ViewKind};
use crate::reconciler::{CompletionSweep, SweepTarget};
use crate::view_change::ViewChangePayload;

/// Stable handle to a queued operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationKey {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    op: Option<AsyncViewChangeOperation>,
}

/// A finished operation, ready to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub correlation_id: CorrelationId,
    pub trigger: OperationTrigger,
    pub op_type: OperationType,
    pub request_id: RequestId,
    pub result: ViewChangeResult,
}

impl Completion {
    /// Zoom completions are reported as `ZoomCompleted`.
    #[inline]
    pub fn is_zoom(&self) -> bool {
        self.op_type.is_scale()
    }
}

/// Ordered collection of view-change operations.
#[derive(Debug, Default)]
pub struct OperationQueue {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<OperationKey>,
}

impl OperationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, key: OperationKey) -> Option<&AsyncViewChangeOperation> {
        self.slots
            .get(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.op.as_ref())
    }

    pub fn get_mut(&mut self, key: OperationKey) -> Option<&mut AsyncViewChangeOperation> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.op.as_mut())
    }

    /// Operations in admission order.
    pub fn iter(&self) -> impl Iterator<Item = (OperationKey, &AsyncViewChangeOperation)> + '_ {
        self.order
            .iter()
            .filter_map(|&key| self.get(key).map(|op| (key, op)))
    }

    /// Find the live operation carrying `correlation_id`.
    pub fn find_by_correlation(&self, correlation_id: CorrelationId) -> Option<OperationKey> {
        self.iter()
            .find(|(_, op)| op.correlation_id() == correlation_id)
            .map(|(key, _)| key)
    }

    /// Admit an operation.
    ///
    /// Zoom operations record the latest earlier non-animated operation that
    /// has not completed as their requirement.
    pub fn enqueue(&mut self, mut op: AsyncViewChangeOperation) -> OperationKey {
        if op.payload().is_zoom() {
            let required = self
                .iter()
                .filter(|(_, prior)| {
                    !prior.is_animated() && !prior.is_canceled() && !prior.is_completed()
                })
                .map(|(key, _)| key)
                .last();
            op.set_required(required);
        }
        trace!(
            target: "scrollkit.queue",
            correlation_id = op.correlation_id().0,
            op_type = op.op_type().as_str(),
            delayed = op.is_delayed(),
            has_requirement = op.required().is_some(),
            "operation admitted"
        );
        let key = self.allocate(op);
        self.order.push(key);
        key
    }

    fn allocate(&mut self, op: AsyncViewChangeOperation) -> OperationKey {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.op = Some(op);
            OperationKey {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                op: Some(op),
            });
            OperationKey {
                index,
                generation: 0,
            }
        }
    }

    fn remove(&mut self, key: OperationKey) -> Option<AsyncViewChangeOperation> {
        let slot = self
            .slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)?;
        let op = slot.op.take()?;
        self.free.push(key.index);
        self.order.retain(|k| *k != key);
        Some(op)
    }

    /// Whether a requirement no longer blocks dispatch.
    pub fn is_satisfied(&self, required: OperationKey) -> bool {
        self.get(required)
            .is_none_or(|op| op.is_canceled() || op.is_completed())
    }

    /// Most recent undispatched controller offsets change with the same
    /// kind and options.
    pub fn find_coalescable_offsets(
        &self,
        kind: ViewKind,
        options: ViewChangeOptions,
    ) -> Option<OperationKey> {
        self.order.iter().rev().copied().find(|&key| {
            self.get(key).is_some_and(|op| {
                is_coalescable(op)
                    && matches!(
                        op.payload(),
                        ViewChangePayload::Offsets(change)
                            if change.kind == kind
                                && change.options == options
                                && change.bring_into_view.is_none()
                    )
            })
        })
    }

    /// Most recent undispatched controller velocity change.
    pub fn find_coalescable_velocity(&self) -> Option<OperationKey> {
        self.order.iter().rev().copied().find(|&key| {
            self.get(key).is_some_and(|op| {
                is_coalescable(op)
                    && matches!(op.payload(), ViewChangePayload::OffsetsWithVelocity(_))
            })
        })
    }

    /// Cancel undispatched operations of `op_type` admitted before `newer`.
    /// Returns the number canceled.
    pub fn cancel_superseded(&mut self, op_type: OperationType, newer: OperationKey) -> usize {
        let mut canceled = 0;
        for key in self.order.clone() {
            if key == newer {
                break;
            }
            if let Some(op) = self.get_mut(key)
                && op.op_type() == op_type
                && !op.is_dispatched()
                && !op.is_canceled()
            {
                op.cancel();
                canceled += 1;
                debug!(
                    target: "scrollkit.queue",
                    correlation_id = op.correlation_id().0,
                    op_type = op_type.as_str(),
                    "operation superseded"
                );
            }
        }
        canceled
    }

    /// Restart the countdown of every queued operation.
    pub fn reset_queued_countdowns(&mut self) {
        for key in self.order.clone() {
            if let Some(op) = self.get_mut(key)
                && op.is_queued()
            {
                op.reset_queued_ticks();
            }
        }
    }

    /// Retire every delayed operation except the newest one, which becomes
    /// queued.
    pub fn retire_delayed_except_newest(&mut self) -> Vec<Completion> {
        let delayed: Vec<OperationKey> = self
            .iter()
            .filter(|(_, op)| op.is_delayed())
            .map(|(key, _)| key)
            .collect();
        let Some((&newest, stale)) = delayed.split_last() else {
            return Vec::new();
        };
        if let Some(op) = self.get_mut(newest) {
            op.mark_undelayed();
        }
        stale
            .iter()
            .filter_map(|&key| self.complete(key, ViewChangeResult::Interrupted))
            .collect()
    }

    /// Complete every operation with `result`.
    pub fn drain_all(&mut self, result: ViewChangeResult) -> Vec<Completion> {
        self.order
            .clone()
            .into_iter()
            .filter_map(|key| self.complete(key, result))
            .collect()
    }

    fn complete(&mut self, key: OperationKey, result: ViewChangeResult) -> Option<Completion> {
        let mut op = self.remove(key)?;
        op.mark_completed();
        debug!(
            target: "scrollkit.queue",
            correlation_id = op.correlation_id().0,
            request_id = op.request_id().0,
            op_type = op.op_type().as_str(),
            result = result.as_str(),
            "operation completed"
        );
        Some(Completion {
            correlation_id: op.correlation_id(),
            trigger: op.trigger(),
            op_type: op.op_type(),
            request_id: op.request_id(),
            result,
        })
    }

    /// Apply a reconciler sweep.
    pub fn sweep(&mut self, sweep: &CompletionSweep) -> Vec<Completion> {
        let mut finished = Vec::new();
        for (key, op) in self.iter() {
            if let Some(result) = sweep_result(sweep, op) {
                finished.push((key, result));
            }
        }
        finished
            .into_iter()
            .filter_map(|(key, result)| self.complete(key, result))
            .collect()
    }

    /// Advance one coordinated tick.
    ///
    /// Canceled operations complete as interrupted. Queued operations count
    /// down and are handed to `dispatch` once they reach zero and their
    /// requirement is satisfied. Dispatched non-animated operations that the
    /// engine stayed silent about are completed once their grace ticks run
    /// out.
    pub fn tick<F>(&mut self, mut dispatch: F) -> Vec<Completion>
    where
        F: FnMut(&mut AsyncViewChangeOperation) -> RequestId,
    {
        let mut finished = Vec::new();
        let mut hold = false;

        for key in self.order.clone() {
            let Some(op) = self.get(key) else {
                continue;
            };
            if op.is_delayed() {
                continue;
            }
            if op.is_canceled() {
                finished.push((key, ViewChangeResult::Interrupted));
                continue;
            }
            if op.is_dispatched() {
                if !op.is_animated()
                    && let Some(op) = self.get_mut(key)
                    && op.tick_non_animated()
                {
                    trace!(
                        target: "scrollkit.queue",
                        correlation_id = op.correlation_id().0,
                        request_id = op.request_id().0,
                        "forcing completion of silent non-animated operation"
                    );
                    finished.push((key, ViewChangeResult::Completed));
                }
                continue;
            }

            let required = op.required();
            let ready = self.get_mut(key).is_some_and(AsyncViewChangeOperation::tick_queued);
            if !ready || hold {
                continue;
            }
            if let Some(required) = required
                && !self.is_satisfied(required)
            {
                hold = true;
                trace!(
                    target: "scrollkit.queue",
                    correlation_id = self.get(key).map_or(-1, |op| op.correlation_id().0),
                    "dispatch held by pending requirement"
                );
                continue;
            }
            if let Some(op) = self.get_mut(key) {
                let request_id = dispatch(op);
                op.mark_dispatched(request_id);
                debug!(
                    target: "scrollkit.queue",
                    correlation_id = op.correlation_id().0,
                    request_id = request_id.0,
                    op_type = op.op_type().as_str(),
                    "operation dispatched"
                );
            }
        }

        finished
            .into_iter()
            .filter_map(|(key, result)| self.complete(key, result))
            .collect()
    }
}

fn is_coalescable(op: &AsyncViewChangeOperation) -> bool {
    op.trigger().intersects(OperationTrigger::CONTROLLER)
        && !op.is_dispatched()
        && !op.is_canceled()
        && !op.is_completed()
}

fn sweep_result(sweep: &CompletionSweep, op: &AsyncViewChangeOperation) -> Option<ViewChangeResult> {
    match sweep.target {
        SweepTarget::AllInFlight => {
            if !op.is_dispatched() {
                sweep.pending
            } else if op.is_animated() {
                sweep.prior_animated
            } else {
                sweep.prior_non_animated
            }
        }
        SweepTarget::Request(request_id) => {
            if !op.is_dispatched() {
                return None;
            }
            if op.request_id() == request_id {
                if op.is_animated() && !sweep.match_animated {
                    None
                } else {
                    sweep.matching
                }
            } else if op.request_id() < request_id {
                if op.is_animated() {
                    sweep.prior_animated
                } else {
                    sweep.prior_non_animated
                }
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{AnimationMode, SnapPointsMode};
    use crate::view_change::{OffsetsChange, ZoomFactorChange};

    fn offsets_op(id: i32, op_type: OperationType, trigger: OperationTrigger) -> AsyncViewChangeOperation {
        AsyncViewChangeOperation::new(
            op_type,
            trigger,
            CorrelationId(id),
            ViewChangePayload::Offsets(OffsetsChange::new(
                ViewKind::RelativeToCurrentView,
                Some(1.0),
                None,
                ViewChangeOptions::instant(),
            )),
        )
        .with_ticks(2, 2)
    }

    fn zoom_op(id: i32) -> AsyncViewChangeOperation {
        AsyncViewChangeOperation::new(
            OperationType::UpdateScale,
            OperationTrigger::DIRECT_CALL,
            CorrelationId(id),
            ViewChangePayload::ZoomFactor(ZoomFactorChange::new(
                ViewKind::Absolute,
                2.0,
                None,
                ViewChangeOptions::instant(),
            )),
        )
        .with_ticks(2, 2)
    }

    fn dispatch_counter() -> impl FnMut(&mut AsyncViewChangeOperation) -> RequestId {
        let mut next = 0;
        move |_| {
            next += 1;
            RequestId(next)
        }
    }

    #[test]
    fn stale_keys_resolve_to_nothing() {
        let mut queue = OperationQueue::new();
        let key = queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        assert!(!queue.is_satisfied(key));
        queue.drain_all(ViewChangeResult::Interrupted);
        assert!(queue.get(key).is_none());
        assert!(queue.is_satisfied(key));
        let reused = queue.enqueue(offsets_op(2, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        assert_ne!(key, reused);
        assert!(queue.get(key).is_none());
    }

    #[test]
    fn dispatches_after_countdown_in_order() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        queue.enqueue(offsets_op(2, OperationType::UpdatePositionWithAnimation, OperationTrigger::DIRECT_CALL));
        let mut dispatched = Vec::new();
        let mut counter = dispatch_counter();
        let mut dispatch = |op: &mut AsyncViewChangeOperation| {
            dispatched.push(op.correlation_id());
            counter(op)
        };
        assert!(queue.tick(&mut dispatch).is_empty());
        assert!(queue.tick(&mut dispatch).is_empty());
        assert_eq!(dispatched, vec![CorrelationId(1), CorrelationId(2)]);
    }

    #[test]
    fn silent_non_animated_operation_is_force_completed() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        queue.enqueue(offsets_op(2, OperationType::UpdatePositionWithAnimation, OperationTrigger::DIRECT_CALL));
        let mut dispatch = dispatch_counter();
        queue.tick(&mut dispatch);
        queue.tick(&mut dispatch); // dispatched
        assert!(queue.tick(&mut dispatch).is_empty());
        let done = queue.tick(&mut dispatch);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].correlation_id, CorrelationId(1));
        assert_eq!(done[0].result, ViewChangeResult::Completed);
        // The animated one waits for the engine.
        for _ in 0..10 {
            assert!(queue.tick(&mut dispatch).is_empty());
        }
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn zoom_waits_for_required_offsets_change() {
        let mut queue = OperationQueue::new();
        let offsets = queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        let zoom = queue.enqueue(zoom_op(2));
        let trailing = queue.enqueue(offsets_op(3, OperationType::UpdatePositionWithAnimation, OperationTrigger::DIRECT_CALL));
        assert_eq!(queue.get(zoom).and_then(|op| op.required()), Some(offsets));

        let mut dispatch = dispatch_counter();
        queue.tick(&mut dispatch);
        queue.tick(&mut dispatch);
        assert!(queue.get(offsets).is_some_and(|op| op.is_dispatched()));
        assert!(queue.get(zoom).is_some_and(|op| !op.is_dispatched()));
        // Held back as well, preserving order.
        assert!(queue.get(trailing).is_some_and(|op| !op.is_dispatched()));

        let sweep = CompletionSweep::values_changed(RequestId(1));
        let done = queue.sweep(&sweep);
        assert_eq!(done.len(), 1);
        queue.tick(&mut dispatch);
        assert!(queue.get(zoom).is_some_and(|op| op.is_dispatched()));
        assert!(queue.get(trailing).is_some_and(|op| op.is_dispatched()));
    }

    #[test]
    fn zoom_requirement_skips_animated_and_canceled() {
        let mut queue = OperationQueue::new();
        let first = queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        let canceled = queue.enqueue(offsets_op(2, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        queue.enqueue(offsets_op(3, OperationType::UpdatePositionWithAnimation, OperationTrigger::DIRECT_CALL));
        if let Some(op) = queue.get_mut(canceled) {
            op.cancel();
        }
        let zoom = queue.enqueue(zoom_op(4));
        assert_eq!(queue.get(zoom).and_then(|op| op.required()), Some(first));
    }

    #[test]
    fn coalescing_finds_latest_matching_controller_request() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        assert_eq!(
            queue.find_coalescable_offsets(ViewKind::RelativeToCurrentView, ViewChangeOptions::instant()),
            None
        );
        let key = queue.enqueue(offsets_op(
            2,
            OperationType::UpdatePosition,
            OperationTrigger::VERTICAL_CONTROLLER_REQUEST,
        ));
        assert_eq!(
            queue.find_coalescable_offsets(ViewKind::RelativeToCurrentView, ViewChangeOptions::instant()),
            Some(key)
        );
        let other_options = ViewChangeOptions::new(AnimationMode::Disabled, SnapPointsMode::Ignore);
        assert_eq!(
            queue.find_coalescable_offsets(ViewKind::RelativeToCurrentView, other_options),
            None
        );
        assert_eq!(
            queue.find_coalescable_offsets(ViewKind::Absolute, ViewChangeOptions::instant()),
            None
        );
    }

    #[test]
    fn dispatched_operations_are_not_coalescable() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(
            1,
            OperationType::UpdatePosition,
            OperationTrigger::HORIZONTAL_CONTROLLER_REQUEST,
        ));
        let mut dispatch = dispatch_counter();
        queue.tick(&mut dispatch);
        queue.tick(&mut dispatch);
        assert_eq!(
            queue.find_coalescable_offsets(ViewKind::RelativeToCurrentView, ViewChangeOptions::instant()),
            None
        );
    }

    #[test]
    fn superseded_operations_complete_interrupted_without_dispatch() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        let newer = queue.enqueue(offsets_op(2, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        assert_eq!(queue.cancel_superseded(OperationType::UpdatePosition, newer), 1);
        let mut dispatched = Vec::new();
        let done = queue.tick(|op| {
            dispatched.push(op.correlation_id());
            RequestId(1)
        });
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].correlation_id, CorrelationId(1));
        assert_eq!(done[0].result, ViewChangeResult::Interrupted);
        assert!(dispatched.is_empty());
    }

    #[test]
    fn reset_countdowns_restarts_queued_operations() {
        let mut queue = OperationQueue::new();
        let key = queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        let mut dispatch = dispatch_counter();
        queue.tick(&mut dispatch);
        assert!(queue.get(key).is_some_and(AsyncViewChangeOperation::is_unqueueing));
        queue.reset_queued_countdowns();
        assert_eq!(queue.get(key).map(AsyncViewChangeOperation::queued_ticks), Some(2));
        queue.tick(&mut dispatch);
        assert!(queue.get(key).is_some_and(|op| !op.is_dispatched()));
        queue.tick(&mut dispatch);
        assert!(queue.get(key).is_some_and(AsyncViewChangeOperation::is_dispatched));
    }

    #[test]
    fn only_newest_delayed_operation_survives() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL).delayed(true));
        queue.enqueue(offsets_op(2, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL).delayed(true));
        let newest = queue.enqueue(zoom_op(3).delayed(true));
        let mut dispatch = dispatch_counter();
        assert!(queue.tick(&mut dispatch).is_empty());
        assert!(queue.get(newest).is_some_and(|op| op.queued_ticks() == 2));

        let retired = queue.retire_delayed_except_newest();
        let ids: Vec<_> = retired.iter().map(|c| c.correlation_id).collect();
        assert_eq!(ids, vec![CorrelationId(1), CorrelationId(2)]);
        assert!(retired.iter().all(|c| c.result == ViewChangeResult::Interrupted));
        assert!(queue.get(newest).is_some_and(AsyncViewChangeOperation::is_queued));
        assert!(queue.retire_delayed_except_newest().is_empty());
    }

    #[test]
    fn idle_sweep_completes_match_and_priors() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        queue.enqueue(offsets_op(2, OperationType::UpdatePositionWithAnimation, OperationTrigger::DIRECT_CALL));
        queue.enqueue(offsets_op(3, OperationType::UpdatePositionWithAnimation, OperationTrigger::DIRECT_CALL));
        let mut dispatch = dispatch_counter();
        queue.tick(&mut dispatch);
        queue.tick(&mut dispatch);

        let done = queue.sweep(&CompletionSweep::idle(RequestId(3)));
        let results: Vec<_> = done.iter().map(|c| (c.correlation_id.0, c.result)).collect();
        assert_eq!(
            results,
            vec![
                (1, ViewChangeResult::Completed),
                (2, ViewChangeResult::Interrupted),
                (3, ViewChangeResult::Completed),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn values_changed_does_not_complete_animations() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(1, OperationType::UpdatePositionWithAnimation, OperationTrigger::DIRECT_CALL));
        queue.enqueue(offsets_op(2, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        let mut dispatch = dispatch_counter();
        queue.tick(&mut dispatch);
        queue.tick(&mut dispatch);
        assert!(queue.sweep(&CompletionSweep::values_changed(RequestId(1))).is_empty());
        let done = queue.sweep(&CompletionSweep::values_changed(RequestId(2)));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].correlation_id, CorrelationId(2));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn interacting_sweep_splits_by_animation_and_dispatch() {
        let mut queue = OperationQueue::new();
        let animated_zoom = AsyncViewChangeOperation::new(
            OperationType::UpdateScaleWithAnimation,
            OperationTrigger::DIRECT_CALL,
            CorrelationId(1),
            ViewChangePayload::ZoomFactor(ZoomFactorChange::new(
                ViewKind::Absolute,
                3.0,
                None,
                ViewChangeOptions::animated(),
            )),
        )
        .with_ticks(2, 2);
        queue.enqueue(animated_zoom);
        queue.enqueue(offsets_op(2, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        let mut dispatch = dispatch_counter();
        queue.tick(&mut dispatch);
        queue.tick(&mut dispatch);
        queue.enqueue(offsets_op(3, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));

        let done = queue.sweep(&CompletionSweep::interacting());
        let results: Vec<_> = done.iter().map(|c| (c.correlation_id.0, c.result)).collect();
        assert_eq!(
            results,
            vec![
                (1, ViewChangeResult::Interrupted),
                (2, ViewChangeResult::Completed),
                (3, ViewChangeResult::Interrupted),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn ignored_sweep_touches_only_the_match() {
        let mut queue = OperationQueue::new();
        queue.enqueue(offsets_op(1, OperationType::UpdatePosition, OperationTrigger::DIRECT_CALL));
        queue.enqueue(offsets_op(2, OperationType::UpdatePositionWithAnimation, OperationTrigger::DIRECT_CALL));
        let mut dispatch = dispatch_counter();
        queue.tick(&mut dispatch);
        queue.tick(&mut dispatch);
        let done = queue.sweep(&CompletionSweep::request_ignored(RequestId(2)));
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].result, ViewChangeResult::Ignored);
        assert_eq!(done[0].correlation_id, CorrelationId(2));
    }
}

//! Benchmarks for the view-change queue and snap point evaluation.
//!
//! Run with: cargo bench -p scrollkit-presenter --bench queue_bench
//!
//! The queue is walked once per frame, so its cost scales with the number
//! of requests a host issues before the engine catches up. Snap evaluation
//! runs once per dispatched offsets change per axis.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use scrollkit_core::motion::RequestId;
use scrollkit_core::snap::{ScrollSnapPoint, SnapPointSet, SnapPointsAlignment};
use scrollkit_presenter::{
    AsyncViewChangeOperation, CompletionSweep, CorrelationId, OffsetsChange, OperationQueue,
    OperationTrigger, OperationType, ViewChangeOptions, ViewChangePayload, ViewKind,
};

fn offsets_op(id: i32) -> AsyncViewChangeOperation {
    AsyncViewChangeOperation::new(
        OperationType::UpdatePosition,
        OperationTrigger::DIRECT_CALL,
        CorrelationId(id),
        ViewChangePayload::Offsets(OffsetsChange::new(
            ViewKind::RelativeToCurrentView,
            Some(10.0),
            Some(0.0),
            ViewChangeOptions::instant(),
        )),
    )
}

/// Enqueue `n` operations, dispatch them all, then complete them with one
/// idle sweep.
fn drain_queue(n: i32) -> usize {
    let mut queue = OperationQueue::new();
    for id in 1..=n {
        queue.enqueue(offsets_op(id));
    }
    let mut next = 0u32;
    for _ in 0..3 {
        queue.tick(|_| {
            next += 1;
            RequestId(next)
        });
    }
    queue.sweep(&CompletionSweep::idle(RequestId(next))).len()
}

fn snap_set(count: usize) -> SnapPointSet<ScrollSnapPoint> {
    let mut set = SnapPointSet::new();
    for i in 0..count {
        let point = ScrollSnapPoint::irregular(i as f64 * 100.0, SnapPointsAlignment::Near)
            .expect("finite snap value");
        set.push(point).expect("irregular points never overlap");
    }
    set
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue/dispatch_and_sweep");
    for n in [1, 16, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(drain_queue(n)))
        });
    }
    group.finish();
}

fn bench_snap_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap/evaluate");
    for count in [4, 64, 512] {
        let set = snap_set(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &set, |b, set| {
            b.iter(|| black_box(set.evaluate(black_box(1234.5))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_queue, bench_snap_evaluate);
criterion_main!(benches);

//! Property-based invariant tests for snap point sets.
//!
//! These tests verify structural invariants of `SnapPointSet` built from
//! irregular points with mixed mandatory and optional ranges:
//!
//! 1. Wrappers are sorted and applicable zones never overlap
//! 2. Evaluation returns either the input or a defined snap value
//! 3. Evaluation is idempotent
//! 4. Insertion order does not change the consolidated zones
//! 5. An ignored value is never produced by an impulse evaluation of another value
//! 6. Repeated points always evaluate onto one of their repetitions

use proptest::prelude::*;
use scrollkit_core::snap::{ApplicableRange, SnapPointSet, ZoomSnapPoint};

// ── Strategies ──────────────────────────────────────────────────────────

fn range_strategy() -> impl Strategy<Value = ApplicableRange> {
    prop_oneof![
        Just(ApplicableRange::Mandatory),
        (0u32..40).prop_map(|r| ApplicableRange::Optional(f64::from(r) * 2.5)),
    ]
}

fn point_strategy() -> impl Strategy<Value = (f64, ApplicableRange)> {
    ((-40i32..40).prop_map(|v| f64::from(v) * 10.0), range_strategy())
}

fn points_strategy() -> impl Strategy<Value = Vec<(f64, ApplicableRange)>> {
    prop::collection::vec(point_strategy(), 1..12)
}

fn build(points: &[(f64, ApplicableRange)]) -> SnapPointSet<ZoomSnapPoint> {
    let mut set = SnapPointSet::new();
    for &(value, range) in points {
        set.push(ZoomSnapPoint::irregular_with_range(value, range).unwrap())
            .unwrap();
    }
    set
}

fn snap_values(set: &SnapPointSet<ZoomSnapPoint>) -> Vec<f64> {
    set.wrappers().iter().map(|w| w.target().sort_key()).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Sorted, non-overlapping zones
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn zones_sorted_and_disjoint(points in points_strategy()) {
        let set = build(&points);
        let wrappers = set.wrappers();
        for w in wrappers {
            prop_assert!(w.zone().start <= w.zone().end, "zone inverted: {:?}", w.zone());
        }
        for pair in wrappers.windows(2) {
            prop_assert!(pair[0].target().sort_key() < pair[1].target().sort_key());
            prop_assert!(
                pair[0].zone().end <= pair[1].zone().start,
                "zones overlap: {:?} then {:?}",
                pair[0].zone(),
                pair[1].zone()
            );
            prop_assert!(pair[0].impulse_zone().end <= pair[1].impulse_zone().start);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2–3. Evaluation results and idempotence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn evaluation_is_input_or_snap_value(
        points in points_strategy(),
        candidate in -500.0f64..500.0,
    ) {
        let set = build(&points);
        let snapped = set.evaluate(candidate);
        let values = snap_values(&set);
        prop_assert!(
            snapped == candidate || values.contains(&snapped),
            "{} snapped to {} which is not one of {:?}",
            candidate,
            snapped,
            values
        );
    }

    #[test]
    fn evaluation_is_idempotent(
        points in points_strategy(),
        candidate in -500.0f64..500.0,
    ) {
        let set = build(&points);
        let once = set.evaluate(candidate);
        prop_assert_eq!(set.evaluate(once), once);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Insertion order independence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn insertion_order_does_not_matter(points in points_strategy()) {
        let forward = build(&points);
        let reversed: Vec<_> = points.iter().rev().copied().collect();
        let backward = build(&reversed);
        prop_assert_eq!(forward.wrappers().len(), backward.wrappers().len());
        for (a, b) in forward.wrappers().iter().zip(backward.wrappers()) {
            prop_assert_eq!(a.target(), b.target());
            prop_assert_eq!(a.zone(), b.zone());
            prop_assert_eq!(a.multiplicity(), b.multiplicity());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Ignored values
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn impulse_never_lands_on_ignored_value(
        points in points_strategy(),
        pick in any::<prop::sample::Index>(),
        candidate in -500.0f64..500.0,
    ) {
        let mut set = build(&points);
        let values = snap_values(&set);
        let resting = values[pick.index(values.len())];
        set.update_ignored_value(resting);
        prop_assume!(values.len() > 1);
        prop_assume!(candidate != resting);
        prop_assert_ne!(set.evaluate_impulse(candidate), resting);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Repeated points
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn repeated_evaluates_onto_repetition(
        interval in 1u32..50,
        span in 1u32..20,
        candidate in -100.0f64..1100.0,
    ) {
        let interval = f64::from(interval);
        let end = interval * f64::from(span);
        let mut set = SnapPointSet::new();
        set.push(ZoomSnapPoint::repeated(0.0, interval, 0.0, end).unwrap())
            .unwrap();
        let snapped = set.evaluate(candidate);
        if (0.0..=end).contains(&candidate) {
            prop_assert!(set.wrappers()[0].target().snaps_at(snapped));
            prop_assert!((snapped - candidate).abs() <= interval / 2.0 + 1e-9);
        } else {
            prop_assert_eq!(snapped, candidate);
        }
    }
}

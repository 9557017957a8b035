#![forbid(unsafe_code)]

//! Snap points applied through the presenter: request targets, engine
//! inertia modifiers, and the ignored value after an impulse.
//!
//! Run:
//!   cargo test -p scrollkit-presenter --test snap_points_integration

use scrollkit_core::geometry::{Size, Vector2};
use scrollkit_core::motion::SnapDimension;
use scrollkit_core::snap::{ScrollSnapPoint, SnapPointError, SnapPointsAlignment, ZoomSnapPoint};
use scrollkit_harness::{EngineCall, PresenterHarness};
use scrollkit_presenter::{
    PresenterError, ScrollControllerRequest, ScrollOrientation, SnapPointsMode, ViewChangeOptions,
    ViewChangeResult,
};

const EPSILON: f64 = 1e-9;

fn harness() -> PresenterHarness {
    PresenterHarness::new(Size::new(1000.0, 1000.0), Size::new(100.0, 100.0))
}

fn near(value: f64) -> ScrollSnapPoint {
    ScrollSnapPoint::irregular(value, SnapPointsAlignment::Near).unwrap()
}

/// Harness with vertical snap points at 0, 200 and 400.
fn harness_with_vertical_points() -> PresenterHarness {
    let mut h = harness();
    for value in [0.0, 200.0, 400.0] {
        h.presenter_mut()
            .push_scroll_snap_point(ScrollOrientation::Vertical, near(value))
            .unwrap();
    }
    h
}

fn modifier_calls(h: &PresenterHarness, dimension: SnapDimension) -> Vec<usize> {
    h.tracker()
        .unwrap()
        .calls()
        .iter()
        .filter_map(|c| match c {
            EngineCall::Modifiers { dimension: d, count } if *d == dimension => Some(*count),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Request targets
// ============================================================================

#[test]
fn instant_scroll_snaps_to_nearest_point() {
    let mut h = harness_with_vertical_points();
    let id = h
        .presenter_mut()
        .scroll_to(0.0, 290.0, ViewChangeOptions::instant())
        .unwrap();
    assert!(h.run_until_idle(20));
    assert_eq!(h.completion_of(id), Some(ViewChangeResult::Completed));
    assert_eq!(h.presenter().vertical_offset(), 200.0);
}

#[test]
fn ignore_mode_skips_snapping() {
    let mut h = harness_with_vertical_points();
    let options = ViewChangeOptions::instant().with_snap_points_mode(SnapPointsMode::Ignore);
    h.presenter_mut().scroll_to(0.0, 290.0, options).unwrap();
    assert!(h.run_until_idle(20));
    assert_eq!(h.presenter().vertical_offset(), 290.0);
}

#[test]
fn only_requested_axis_is_snapped() {
    let mut h = harness_with_vertical_points();
    let ignore = ViewChangeOptions::instant().with_snap_points_mode(SnapPointsMode::Ignore);
    h.presenter_mut().scroll_to(0.0, 290.0, ignore).unwrap();
    assert!(h.run_until_idle(20));

    // A horizontal controller request leaves the unsnapped vertical offset alone.
    h.presenter_mut()
        .handle_scroll_controller_request(
            ScrollOrientation::Horizontal,
            ScrollControllerRequest::ScrollTo {
                offset: 50.0,
                options: ViewChangeOptions::instant(),
            },
        )
        .unwrap();
    assert!(h.run_until_idle(20));
    assert_eq!(h.presenter().horizontal_offset(), 50.0);
    assert_eq!(h.presenter().vertical_offset(), 290.0);
}

#[test]
fn zoom_snaps_to_nearest_factor() {
    let mut h = harness();
    for factor in [1.0, 2.0, 4.0] {
        h.presenter_mut()
            .push_zoom_snap_point(ZoomSnapPoint::irregular(factor).unwrap())
            .unwrap();
    }
    let id = h
        .presenter_mut()
        .zoom_to(2.6, None, ViewChangeOptions::instant())
        .unwrap();
    assert!(h.run_until_idle(20));
    assert_eq!(h.completion_of(id), Some(ViewChangeResult::Completed));
    assert_eq!(h.presenter().zoom_factor(), 2.0);
}

#[test]
fn viewport_aligned_points_follow_viewport_size() {
    let mut h = harness();
    let centered = ScrollSnapPoint::irregular(300.0, SnapPointsAlignment::Center).unwrap();
    h.presenter_mut()
        .push_scroll_snap_point(ScrollOrientation::Vertical, centered)
        .unwrap();

    h.presenter_mut()
        .scroll_to(0.0, 240.0, ViewChangeOptions::instant())
        .unwrap();
    assert!(h.run_until_idle(20));
    assert_eq!(h.presenter().vertical_offset(), 250.0);

    let before = modifier_calls(&h, SnapDimension::Vertical).len();
    h.presenter_mut().set_viewport_size(Size::new(100.0, 200.0));
    assert_eq!(modifier_calls(&h, SnapDimension::Vertical).len(), before + 1);

    h.presenter_mut()
        .scroll_to(0.0, 240.0, ViewChangeOptions::instant())
        .unwrap();
    assert!(h.run_until_idle(20));
    assert_eq!(h.presenter().vertical_offset(), 200.0);
}

// ============================================================================
// Registry mutation
// ============================================================================

#[test]
fn every_mutation_reconfigures_engine() {
    let mut h = harness();
    let p = h.presenter_mut();
    p.push_scroll_snap_point(ScrollOrientation::Horizontal, near(100.0))
        .unwrap();
    p.insert_scroll_snap_point(ScrollOrientation::Horizontal, 0, near(50.0))
        .unwrap();
    let previous = p
        .replace_scroll_snap_point(ScrollOrientation::Horizontal, 1, near(150.0))
        .unwrap();
    assert_eq!(previous, near(100.0));
    let removed = p
        .remove_scroll_snap_point(ScrollOrientation::Horizontal, 0)
        .unwrap();
    assert_eq!(removed, near(50.0));
    assert_eq!(p.scroll_snap_points(ScrollOrientation::Horizontal).len(), 1);
    p.clear_scroll_snap_points(ScrollOrientation::Horizontal);

    // One call at attach, then one per mutation.
    assert_eq!(
        modifier_calls(&h, SnapDimension::Horizontal),
        vec![0, 1, 2, 2, 1, 0]
    );
    assert_eq!(modifier_calls(&h, SnapDimension::Vertical), vec![0]);
}

#[test]
fn overlapping_repeated_points_are_rejected() {
    let mut h = harness();
    let p = h.presenter_mut();
    let first = ScrollSnapPoint::repeated(0.0, 50.0, 0.0, 500.0, SnapPointsAlignment::Near).unwrap();
    let second =
        ScrollSnapPoint::repeated(300.0, 30.0, 300.0, 900.0, SnapPointsAlignment::Near).unwrap();
    p.push_scroll_snap_point(ScrollOrientation::Vertical, first)
        .unwrap();
    let err = p
        .push_scroll_snap_point(ScrollOrientation::Vertical, second)
        .unwrap_err();
    assert!(matches!(
        err,
        PresenterError::SnapPoint(SnapPointError::Overlap { .. })
    ));
    assert_eq!(p.scroll_snap_points(ScrollOrientation::Vertical).len(), 1);
}

// ============================================================================
// Inertia
// ============================================================================

#[test]
fn impulse_rests_on_snap_point_and_ignores_it_next_time() {
    let mut h = harness_with_vertical_points();

    // Natural rest is 160, inside the zone of 200.
    let first = h
        .presenter_mut()
        .add_scroll_velocity(Vector2::new(0.0, 500.0), None)
        .unwrap();
    assert!(h.run_until_idle(40));
    assert_eq!(h.completion_of(first), Some(ViewChangeResult::Completed));
    assert!((h.presenter().vertical_offset() - 200.0).abs() < EPSILON);

    let ignored: Vec<_> = h
        .tracker()
        .unwrap()
        .modifiers(SnapDimension::Vertical)
        .iter()
        .filter_map(|m| m.ignored_value)
        .collect();
    assert_eq!(ignored, vec![200.0]);

    // Natural rest is 232: without the ignored value it would fall back to 200.
    h.presenter_mut()
        .add_scroll_velocity(Vector2::new(0.0, 100.0), None)
        .unwrap();
    assert!(h.run_until_idle(40));
    assert!((h.presenter().vertical_offset() - 400.0).abs() < EPSILON);
}

#[test]
fn single_snap_value_is_never_ignored() {
    let mut h = harness();
    h.presenter_mut()
        .push_scroll_snap_point(ScrollOrientation::Vertical, near(200.0))
        .unwrap();
    h.presenter_mut()
        .add_scroll_velocity(Vector2::new(0.0, 500.0), None)
        .unwrap();
    assert!(h.run_until_idle(40));
    assert!((h.presenter().vertical_offset() - 200.0).abs() < EPSILON);
    assert!(
        h.tracker()
            .unwrap()
            .modifiers(SnapDimension::Vertical)
            .iter()
            .all(|m| m.ignored_value.is_none())
    );
}

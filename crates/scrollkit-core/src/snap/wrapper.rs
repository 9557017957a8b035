#![forbid(unsafe_code)]

//! Consolidated snap points and their applicable zones.

use super::SNAP_EPSILON;
use super::point::{ApplicableRange, SnapPoint};

// ---------------------------------------------------------------------------
// Resolved targets
// ---------------------------------------------------------------------------

/// Effective snap values of a definition once viewport alignment is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapTarget {
    Irregular {
        value: f64,
        range: ApplicableRange,
    },
    Repeated {
        /// First snap value at or after `start`.
        first: f64,
        interval: f64,
        /// Last snap value at or before `end`.
        last: f64,
        start: f64,
        end: f64,
    },
}

impl SnapTarget {
    pub(crate) fn repeated(offset: f64, interval: f64, start: f64, end: f64) -> Self {
        let first = offset - ((offset - start) / interval).floor() * interval;
        let last = offset + ((end - offset) / interval).floor() * interval;
        Self::Repeated {
            first,
            interval,
            last,
            start,
            end,
        }
    }

    /// Ordering key inside a set: the value, or the range start.
    #[inline]
    pub fn sort_key(&self) -> f64 {
        match *self {
            Self::Irregular { value, .. } => value,
            Self::Repeated { start, .. } => start,
        }
    }

    /// Range covered by a repeated target.
    pub fn repeated_range(&self) -> Option<(f64, f64)> {
        match *self {
            Self::Irregular { .. } => None,
            Self::Repeated { start, end, .. } => Some((start, end)),
        }
    }

    /// Whether two targets snap to the same values. Applicable ranges of
    /// irregular targets are not compared.
    pub fn same_target(&self, other: &SnapTarget) -> bool {
        match (self, other) {
            (Self::Irregular { value: a, .. }, Self::Irregular { value: b, .. }) => a == b,
            (Self::Repeated { .. }, Self::Repeated { .. }) => self == other,
            _ => false,
        }
    }

    /// Number of distinct snap values.
    pub fn snap_count(&self) -> usize {
        match *self {
            Self::Irregular { .. } => 1,
            Self::Repeated {
                first,
                interval,
                last,
                ..
            } => ((last - first) / interval).round().max(0.0) as usize + 1,
        }
    }

    /// Whether `value` is one of this target's snap values.
    pub fn snaps_at(&self, value: f64) -> bool {
        match *self {
            Self::Irregular { value: v, .. } => (v - value).abs() < SNAP_EPSILON,
            Self::Repeated {
                first,
                interval,
                last,
                ..
            } => {
                if value < first - SNAP_EPSILON || value > last + SNAP_EPSILON {
                    return false;
                }
                let k = ((value - first) / interval).round();
                (first + k * interval - value).abs() < SNAP_EPSILON
            }
        }
    }

    /// Snapped value for `value`, skipping `ignored` on repeated targets.
    pub fn evaluate(&self, value: f64, ignored: Option<f64>) -> f64 {
        match *self {
            Self::Irregular { value: v, .. } => v,
            Self::Repeated {
                first, interval, ..
            } => {
                let last_index = self.snap_count() as f64 - 1.0;
                let k = ((value - first) / interval).round().clamp(0.0, last_index);
                let candidate = first + k * interval;
                let Some(ignored) = ignored else {
                    return candidate;
                };
                if (ignored - candidate).abs() >= SNAP_EPSILON {
                    return candidate;
                }
                let alternate = if value >= candidate && k < last_index {
                    k + 1.0
                } else if k > 0.0 {
                    k - 1.0
                } else if k < last_index {
                    k + 1.0
                } else {
                    return value;
                };
                first + alternate * interval
            }
        }
    }

    /// Bound this target imposes on a neighbor lying toward `edge`.
    fn influence(&self, edge: f64, impulse: bool, ignored: bool) -> f64 {
        match *self {
            Self::Irregular { value, range } => {
                if impulse && ignored {
                    return value;
                }
                let mid = (value + edge) / 2.0;
                match range {
                    ApplicableRange::Optional(r) if !impulse => {
                        if value <= edge {
                            (value + r).min(mid)
                        } else {
                            (value - r).max(mid)
                        }
                    }
                    _ => mid,
                }
            }
            Self::Repeated { start, end, .. } => {
                if edge >= end {
                    end
                } else if edge <= start {
                    start
                } else {
                    edge
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Zones
// ---------------------------------------------------------------------------

/// An interval in which a snap point applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapZone {
    pub start: f64,
    pub end: f64,
    /// Repeated points include their end bound.
    pub inclusive_end: bool,
}

impl SnapZone {
    /// Half-open `[start, end)`.
    #[inline]
    pub const fn half_open(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            inclusive_end: false,
        }
    }

    /// Closed `[start, end]`.
    #[inline]
    pub const fn closed(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            inclusive_end: true,
        }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && (value < self.end || (self.inclusive_end && value <= self.end))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.inclusive_end && self.start >= self.end
    }
}

/// Snapshot of a wrapper handed to the motion engine as an inertia modifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapModifier {
    pub zone: SnapZone,
    pub impulse_zone: SnapZone,
    pub target: SnapTarget,
    pub ignored_value: Option<f64>,
}

impl SnapModifier {
    /// Rest value for `natural`, or `None` when this modifier does not apply.
    pub fn apply(&self, natural: f64, impulse: bool) -> Option<f64> {
        if impulse {
            self.impulse_zone
                .contains(natural)
                .then(|| self.target.evaluate(natural, self.ignored_value))
        } else {
            self.zone
                .contains(natural)
                .then(|| self.target.evaluate(natural, None))
        }
    }
}

// ---------------------------------------------------------------------------
// Wrapper
// ---------------------------------------------------------------------------

/// One or more snap point definitions sharing the same effective target.
#[derive(Debug, Clone)]
pub struct SnapPointWrapper<P> {
    points: Vec<P>,
    target: SnapTarget,
    zone: SnapZone,
    impulse_zone: SnapZone,
    ignored_value: Option<f64>,
}

impl<P: SnapPoint> SnapPointWrapper<P> {
    pub(crate) fn new(point: P, target: SnapTarget) -> Self {
        Self {
            points: vec![point],
            target,
            zone: SnapZone::half_open(f64::NEG_INFINITY, f64::INFINITY),
            impulse_zone: SnapZone::half_open(f64::NEG_INFINITY, f64::INFINITY),
            ignored_value: None,
        }
    }

    /// Fold another definition with the same target into this wrapper.
    pub(crate) fn combine(&mut self, point: P, target: SnapTarget) {
        if let (
            SnapTarget::Irregular { range, .. },
            SnapTarget::Irregular {
                range: incoming, ..
            },
        ) = (&mut self.target, target)
        {
            *range = range.widest(incoming);
        }
        self.points.push(point);
    }

    /// Definitions combined into this wrapper.
    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// Number of combined definitions.
    #[inline]
    pub fn multiplicity(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn target(&self) -> &SnapTarget {
        &self.target
    }

    #[inline]
    pub fn zone(&self) -> SnapZone {
        self.zone
    }

    #[inline]
    pub fn impulse_zone(&self) -> SnapZone {
        self.impulse_zone
    }

    #[inline]
    pub fn ignored_value(&self) -> Option<f64> {
        self.ignored_value
    }

    pub(crate) fn set_ignored_value(&mut self, value: Option<f64>) -> bool {
        let changed = self.ignored_value != value;
        self.ignored_value = value;
        changed
    }

    /// Engine-facing snapshot.
    pub fn modifier(&self) -> SnapModifier {
        SnapModifier {
            zone: self.zone,
            impulse_zone: self.impulse_zone,
            target: self.target,
            ignored_value: self.ignored_value,
        }
    }
}

/// Recompute both zones of every wrapper from its neighbors.
pub(crate) fn compute_zones<P: SnapPoint>(wrappers: &mut [SnapPointWrapper<P>]) {
    let len = wrappers.len();
    for i in 0..len {
        let prev = i
            .checked_sub(1)
            .map(|p| (wrappers[p].target, wrappers[p].ignored_value.is_some()));
        let next = (i + 1 < len).then(|| (wrappers[i + 1].target, wrappers[i + 1].ignored_value.is_some()));
        let current = &wrappers[i];
        let ignored = current.ignored_value.is_some();
        let zone = zone_for(&current.target, ignored, prev, next, false);
        let impulse_zone = zone_for(&current.target, ignored, prev, next, true);
        wrappers[i].zone = zone;
        wrappers[i].impulse_zone = impulse_zone;
    }
}

fn zone_for(
    target: &SnapTarget,
    ignored: bool,
    prev: Option<(SnapTarget, bool)>,
    next: Option<(SnapTarget, bool)>,
    impulse: bool,
) -> SnapZone {
    let (value, range) = match *target {
        SnapTarget::Repeated { start, end, .. } => return SnapZone::closed(start, end),
        SnapTarget::Irregular { value, range } => (value, range),
    };
    if impulse && ignored {
        return SnapZone::half_open(value, value);
    }
    let optional = match range {
        ApplicableRange::Optional(r) if !impulse => Some(r),
        _ => None,
    };

    let start = match (prev, optional) {
        (None, Some(r)) => value - r,
        (None, None) => f64::NEG_INFINITY,
        (Some((p, p_ignored)), opt) => {
            let bound = p.influence(value, impulse, p_ignored);
            opt.map_or(bound, |r| bound.max(value - r))
        }
    };
    let end = match (next, optional) {
        (None, Some(r)) => value + r,
        (None, None) => f64::INFINITY,
        (Some((n, n_ignored)), opt) => {
            let bound = n.influence(value, impulse, n_ignored);
            opt.map_or(bound, |r| bound.min(value + r))
        }
    };
    SnapZone::half_open(start, end.max(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn irregular(value: f64, range: ApplicableRange) -> SnapTarget {
        SnapTarget::Irregular { value, range }
    }

    #[test]
    fn repeated_first_and_last_are_aligned_to_offset() {
        let t = SnapTarget::repeated(25.0, 10.0, 0.0, 100.0);
        let SnapTarget::Repeated { first, last, .. } = t else {
            panic!("expected repeated");
        };
        assert_eq!(first, 5.0);
        assert_eq!(last, 95.0);
        assert_eq!(t.snap_count(), 10);
    }

    #[test]
    fn repeated_evaluation_rounds_to_nearest_repetition() {
        let t = SnapTarget::repeated(0.0, 10.0, 0.0, 100.0);
        assert_eq!(t.evaluate(14.0, None), 10.0);
        assert_eq!(t.evaluate(16.0, None), 20.0);
        assert_eq!(t.evaluate(250.0, None), 100.0);
        assert!(t.snaps_at(30.0));
        assert!(!t.snaps_at(31.0));
    }

    #[test]
    fn repeated_evaluation_skips_ignored_value() {
        let t = SnapTarget::repeated(0.0, 10.0, 0.0, 100.0);
        assert_eq!(t.evaluate(21.0, Some(20.0)), 30.0);
        assert_eq!(t.evaluate(19.0, Some(20.0)), 10.0);
        assert_eq!(t.evaluate(101.0, Some(100.0)), 90.0);
        assert_eq!(t.evaluate(-1.0, Some(0.0)), 10.0);
    }

    #[test]
    fn optional_influence_is_limited_by_range() {
        let t = irregular(0.0, ApplicableRange::Optional(10.0));
        assert_eq!(t.influence(100.0, false, false), 10.0);
        assert_eq!(t.influence(100.0, true, false), 50.0);
        assert_eq!(t.influence(-100.0, false, false), -10.0);
        assert_eq!(t.influence(100.0, true, true), 0.0);
    }

    #[test]
    fn repeated_influence_is_its_bound() {
        let t = SnapTarget::repeated(0.0, 10.0, 0.0, 100.0);
        assert_eq!(t.influence(150.0, false, false), 100.0);
        assert_eq!(t.influence(-5.0, false, false), 0.0);
    }

    #[test]
    fn zone_contains_respects_inclusive_end() {
        assert!(!SnapZone::half_open(0.0, 10.0).contains(10.0));
        assert!(SnapZone::closed(0.0, 10.0).contains(10.0));
        assert!(SnapZone::half_open(5.0, 5.0).is_empty());
    }

    #[test]
    fn modifier_apply() {
        let m = SnapModifier {
            zone: SnapZone::half_open(25.0, 75.0),
            impulse_zone: SnapZone::half_open(50.0, 50.0),
            target: irregular(50.0, ApplicableRange::Mandatory),
            ignored_value: Some(50.0),
        };
        assert_eq!(m.apply(40.0, false), Some(50.0));
        assert_eq!(m.apply(80.0, false), None);
        assert_eq!(m.apply(50.0, true), None);
    }
}

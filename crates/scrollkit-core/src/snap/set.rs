#![forbid(unsafe_code)]

//! Ordered, consolidated snap point collection for one dimension.

use super::point::SnapPoint;
use super::wrapper::{SnapModifier, SnapPointWrapper, SnapTarget, compute_zones};
use super::SnapPointError;

/// Snap points of one dimension.
///
/// Definitions are kept in caller order (index-addressable, like a UI
/// collection). Wrappers are kept sorted and consolidated.
#[derive(Debug, Clone)]
pub struct SnapPointSet<P> {
    points: Vec<P>,
    wrappers: Vec<SnapPointWrapper<P>>,
    viewport_length: f64,
}

impl<P: SnapPoint> Default for SnapPointSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: SnapPoint> SnapPointSet<P> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            wrappers: Vec::new(),
            viewport_length: 0.0,
        }
    }

    /// Definitions in caller order.
    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// Consolidated wrappers in sort order.
    pub fn wrappers(&self) -> &[SnapPointWrapper<P>] {
        &self.wrappers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn viewport_length(&self) -> f64 {
        self.viewport_length
    }

    /// Append a definition.
    pub fn push(&mut self, point: P) -> Result<(), SnapPointError> {
        self.insert(self.points.len(), point)
    }

    /// Insert a definition at `index` in caller order.
    ///
    /// The wrapper list is updated incrementally: the definition is combined
    /// into an existing wrapper with the same target, or inserted at its
    /// sorted position.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, point: P) -> Result<(), SnapPointError> {
        let target = point.resolve(self.viewport_length);
        check_overlap(&self.wrappers, &target)?;
        self.points.insert(index, point.clone());
        consolidate(&mut self.wrappers, point, target);
        compute_zones(&mut self.wrappers);
        Ok(())
    }

    /// Remove the definition at `index`.
    pub fn remove(&mut self, index: usize) -> Option<P> {
        if index >= self.points.len() {
            return None;
        }
        let removed = self.points.remove(index);
        self.regenerate();
        Some(removed)
    }

    /// Replace the definition at `index`, returning the previous one.
    ///
    /// On error the set is left unchanged.
    pub fn replace(&mut self, index: usize, point: P) -> Result<Option<P>, SnapPointError> {
        if index >= self.points.len() {
            return Ok(None);
        }
        let mut candidate = self.points.clone();
        let previous = std::mem::replace(&mut candidate[index], point);
        let wrappers = build_wrappers(&candidate, self.viewport_length)?;
        self.points = candidate;
        self.wrappers = wrappers;
        Ok(Some(previous))
    }

    /// Remove every definition.
    pub fn clear(&mut self) {
        self.points.clear();
        self.wrappers.clear();
    }

    /// Update the viewport length. Returns `true` when the wrappers were
    /// regenerated because some definition is viewport-aligned.
    pub fn set_viewport_length(&mut self, viewport_length: f64) -> bool {
        if self.viewport_length == viewport_length {
            return false;
        }
        self.viewport_length = viewport_length;
        if self.points.iter().any(SnapPoint::is_viewport_aligned) {
            self.regenerate();
            true
        } else {
            false
        }
    }

    /// Rebuild every wrapper from the definitions. Ignored values are reset.
    fn regenerate(&mut self) {
        // Overlap is enforced on admission only.
        let mut wrappers = Vec::with_capacity(self.points.len());
        for point in &self.points {
            let target = point.resolve(self.viewport_length);
            consolidate(&mut wrappers, point.clone(), target);
        }
        compute_zones(&mut wrappers);
        self.wrappers = wrappers;
    }

    /// Snapped value for `value`, or `value` when no zone contains it.
    pub fn evaluate(&self, value: f64) -> f64 {
        self.wrappers
            .iter()
            .find(|w| w.zone().contains(value))
            .map_or(value, |w| w.target().evaluate(value, None))
    }

    /// Snapped value for an impulse-driven rest, honoring ignored values.
    pub fn evaluate_impulse(&self, value: f64) -> f64 {
        self.wrappers
            .iter()
            .find(|w| w.impulse_zone().contains(value))
            .map_or(value, |w| w.target().evaluate(value, w.ignored_value()))
    }

    /// Total distinct snap values across all wrappers.
    pub fn snap_count(&self) -> usize {
        self.wrappers.iter().map(|w| w.target().snap_count()).sum()
    }

    /// Mark the snap value at `resting` as ignored for the next impulse.
    ///
    /// All previous ignored values are cleared first. Nothing is ignored
    /// when the set has a single snap value, since an impulse would have
    /// nowhere else to go. Returns `true` when any wrapper changed.
    pub fn update_ignored_value(&mut self, resting: f64) -> bool {
        let resting_index = if self.snap_count() > 1 {
            self.wrappers
                .iter()
                .position(|w| w.target().snaps_at(resting))
        } else {
            None
        };
        let mut changed = false;
        for (index, wrapper) in self.wrappers.iter_mut().enumerate() {
            let ignored =
                (resting_index == Some(index)).then(|| wrapper.target().evaluate(resting, None));
            changed |= wrapper.set_ignored_value(ignored);
        }
        if changed {
            compute_zones(&mut self.wrappers);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "scrollkit.snap",
                resting,
                ignored = ?self.wrappers.iter().find_map(|w| w.ignored_value()),
                "snap ignored value updated"
            );
        }
        changed
    }

    /// Engine-facing modifiers in sort order.
    pub fn modifiers(&self) -> Vec<SnapModifier> {
        self.wrappers.iter().map(SnapPointWrapper::modifier).collect()
    }
}

/// Rest value produced by a list of modifiers, `None` if no zone applies.
pub fn rest_value(modifiers: &[SnapModifier], natural: f64, impulse: bool) -> Option<f64> {
    modifiers.iter().find_map(|m| m.apply(natural, impulse))
}

fn check_overlap<P: SnapPoint>(wrappers: &[SnapPointWrapper<P>], target: &SnapTarget) -> Result<(), SnapPointError> {
    let Some((start, end)) = target.repeated_range() else {
        return Ok(());
    };
    for wrapper in wrappers {
        if let Some((s, e)) = wrapper.target().repeated_range()
            && !wrapper.target().same_target(target)
            && start <= e
            && s <= end
        {
            return Err(SnapPointError::Overlap { start, end });
        }
    }
    Ok(())
}

fn consolidate<P: SnapPoint>(wrappers: &mut Vec<SnapPointWrapper<P>>, point: P, target: SnapTarget) {
    let key = target.sort_key();
    let lower = wrappers.partition_point(|w| w.target().sort_key() < key);
    let upper = wrappers.partition_point(|w| w.target().sort_key() <= key);
    if let Some(existing) = wrappers[lower..upper]
        .iter_mut()
        .find(|w| w.target().same_target(&target))
    {
        existing.combine(point, target);
        return;
    }
    wrappers.insert(upper, SnapPointWrapper::new(point, target));
}

fn build_wrappers<P: SnapPoint>(
    points: &[P],
    viewport_length: f64,
) -> Result<Vec<SnapPointWrapper<P>>, SnapPointError> {
    let mut wrappers = Vec::with_capacity(points.len());
    for point in points {
        let target = point.resolve(viewport_length);
        check_overlap(&wrappers, &target)?;
        consolidate(&mut wrappers, point.clone(), target);
    }
    compute_zones(&mut wrappers);
    Ok(wrappers)
}

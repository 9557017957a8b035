#![forbid(unsafe_code)]

//! Per-dimension snap point registry.
//!
//! Scroll snap values live in offset space at the current zoom factor; zoom
//! snap values are zoom factors. Every change that alters a dimension's
//! wrappers is reported back so the caller can push fresh modifiers.

use scrollkit_core::geometry::{Point, Size};
use scrollkit_core::motion::{MotionEngine, SnapDimension};
use scrollkit_core::snap::{ScrollSnapPoint, SnapModifier, SnapPointSet, ZoomSnapPoint};
use tracing::debug;

use crate::controller::ScrollOrientation;
use crate::error::{PresenterError, Result};

#[derive(Debug, Clone, Default)]
pub struct SnapPointSets {
    horizontal: SnapPointSet<ScrollSnapPoint>,
    vertical: SnapPointSet<ScrollSnapPoint>,
    zoom: SnapPointSet<ZoomSnapPoint>,
}

impl SnapPointSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self, orientation: ScrollOrientation) -> &SnapPointSet<ScrollSnapPoint> {
        match orientation {
            ScrollOrientation::Horizontal => &self.horizontal,
            ScrollOrientation::Vertical => &self.vertical,
        }
    }

    fn scroll_mut(&mut self, orientation: ScrollOrientation) -> &mut SnapPointSet<ScrollSnapPoint> {
        match orientation {
            ScrollOrientation::Horizontal => &mut self.horizontal,
            ScrollOrientation::Vertical => &mut self.vertical,
        }
    }

    pub fn zoom(&self) -> &SnapPointSet<ZoomSnapPoint> {
        &self.zoom
    }

    /// Snapped offsets for a target, per axis.
    pub fn snap_offsets(&self, target: Point, horizontal: bool, vertical: bool) -> Point {
        Point::new(
            if horizontal { self.horizontal.evaluate(target.x) } else { target.x },
            if vertical { self.vertical.evaluate(target.y) } else { target.y },
        )
    }

    pub fn snap_zoom_factor(&self, zoom_factor: f64) -> f64 {
        self.zoom.evaluate(zoom_factor)
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    pub fn insert_scroll(
        &mut self,
        orientation: ScrollOrientation,
        index: usize,
        point: ScrollSnapPoint,
    ) -> Result<()> {
        let set = self.scroll_mut(orientation);
        check_insert_index(index, set.len())?;
        set.insert(index, point)?;
        Ok(())
    }

    pub fn remove_scroll(
        &mut self,
        orientation: ScrollOrientation,
        index: usize,
    ) -> Result<ScrollSnapPoint> {
        let set = self.scroll_mut(orientation);
        let len = set.len();
        set.remove(index)
            .ok_or(PresenterError::SnapPointIndex { index, len })
    }

    pub fn replace_scroll(
        &mut self,
        orientation: ScrollOrientation,
        index: usize,
        point: ScrollSnapPoint,
    ) -> Result<ScrollSnapPoint> {
        let set = self.scroll_mut(orientation);
        let len = set.len();
        set.replace(index, point)?
            .ok_or(PresenterError::SnapPointIndex { index, len })
    }

    pub fn clear_scroll(&mut self, orientation: ScrollOrientation) {
        self.scroll_mut(orientation).clear();
    }

    pub fn insert_zoom(&mut self, index: usize, point: ZoomSnapPoint) -> Result<()> {
        check_insert_index(index, self.zoom.len())?;
        self.zoom.insert(index, point)?;
        Ok(())
    }

    pub fn remove_zoom(&mut self, index: usize) -> Result<ZoomSnapPoint> {
        let len = self.zoom.len();
        self.zoom
            .remove(index)
            .ok_or(PresenterError::SnapPointIndex { index, len })
    }

    pub fn replace_zoom(&mut self, index: usize, point: ZoomSnapPoint) -> Result<ZoomSnapPoint> {
        let len = self.zoom.len();
        self.zoom
            .replace(index, point)?
            .ok_or(PresenterError::SnapPointIndex { index, len })
    }

    pub fn clear_zoom(&mut self) {
        self.zoom.clear();
    }

    /// Propagate a viewport change. Returns the dimensions whose wrappers
    /// were regenerated.
    pub fn set_viewport(&mut self, viewport: Size) -> Vec<SnapDimension> {
        let mut changed = Vec::new();
        if self.horizontal.set_viewport_length(viewport.width) {
            changed.push(SnapDimension::Horizontal);
        }
        if self.vertical.set_viewport_length(viewport.height) {
            changed.push(SnapDimension::Vertical);
        }
        changed
    }

    /// Ignore the snap values the view came to rest on. Returns the
    /// dimensions whose ignored value changed.
    pub fn update_ignored_values(&mut self, offsets: Point, zoom_factor: f64) -> Vec<SnapDimension> {
        let mut changed = Vec::new();
        if self.horizontal.update_ignored_value(offsets.x) {
            changed.push(SnapDimension::Horizontal);
        }
        if self.vertical.update_ignored_value(offsets.y) {
            changed.push(SnapDimension::Vertical);
        }
        if self.zoom.update_ignored_value(zoom_factor) {
            changed.push(SnapDimension::Zoom);
        }
        changed
    }

    pub fn modifiers(&self, dimension: SnapDimension) -> Vec<SnapModifier> {
        match dimension {
            SnapDimension::Horizontal => self.horizontal.modifiers(),
            SnapDimension::Vertical => self.vertical.modifiers(),
            SnapDimension::Zoom => self.zoom.modifiers(),
        }
    }

    /// Replace the engine's inertia modifiers for `dimensions`.
    pub fn configure(&self, engine: &mut dyn MotionEngine, dimensions: &[SnapDimension]) {
        for &dimension in dimensions {
            let modifiers = self.modifiers(dimension);
            debug!(
                target: "scrollkit.snap",
                ?dimension,
                modifiers = modifiers.len(),
                "inertia modifiers configured"
            );
            engine.configure_inertia_modifiers(dimension, &modifiers);
        }
    }
}

fn check_insert_index(index: usize, len: usize) -> Result<()> {
    if index > len {
        Err(PresenterError::SnapPointIndex { index, len })
    } else {
        Ok(())
    }
}

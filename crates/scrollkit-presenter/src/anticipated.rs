#![forbid(unsafe_code)]

//! Anticipated view tracker.
//!
//! Holds where the view will be once every queued non-animated request has
//! been applied. Requests are folded in when they are made, and offsets are
//! kept unclamped so queued relative deltas sum before any clamping. Each
//! component is NaN while nothing unconfirmed is pending; readers then fall
//! back to the confirmed value.

use scrollkit_core::geometry::Point;

/// Provisional offsets and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnticipatedView {
    horizontal_offset: f64,
    vertical_offset: f64,
    zoom_factor: f64,
}

impl Default for AnticipatedView {
    fn default() -> Self {
        Self {
            horizontal_offset: f64::NAN,
            vertical_offset: f64::NAN,
            zoom_factor: f64::NAN,
        }
    }
}

impl AnticipatedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anticipated offsets, falling back per axis to `confirmed`.
    pub fn offsets(&self, confirmed: Point) -> Point {
        Point::new(
            or_confirmed(self.horizontal_offset, confirmed.x),
            or_confirmed(self.vertical_offset, confirmed.y),
        )
    }

    /// Anticipated zoom factor, falling back to `confirmed`.
    pub fn zoom_factor(&self, confirmed: f64) -> f64 {
        or_confirmed(self.zoom_factor, confirmed)
    }

    pub fn set_offsets(&mut self, offsets: Point) {
        self.horizontal_offset = offsets.x;
        self.vertical_offset = offsets.y;
    }

    pub fn set_zoom_factor(&mut self, zoom_factor: f64) {
        self.zoom_factor = zoom_factor;
    }

    /// Forget every provisional value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any component holds an unconfirmed value.
    pub fn is_pending(&self) -> bool {
        !self.horizontal_offset.is_nan() || !self.vertical_offset.is_nan() || !self.zoom_factor.is_nan()
    }
}

#[inline]
fn or_confirmed(anticipated: f64, confirmed: f64) -> f64 {
    if anticipated.is_nan() {
        confirmed
    } else {
        anticipated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_confirmed_when_nan() {
        let view = AnticipatedView::new();
        assert!(!view.is_pending());
        assert_eq!(view.offsets(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
        assert_eq!(view.zoom_factor(2.0), 2.0);
    }

    #[test]
    fn set_and_reset() {
        let mut view = AnticipatedView::new();
        view.set_offsets(Point::new(10.0, 20.0));
        view.set_zoom_factor(1.5);
        assert!(view.is_pending());
        assert_eq!(view.offsets(Point::ZERO), Point::new(10.0, 20.0));
        assert_eq!(view.zoom_factor(1.0), 1.5);
        view.reset();
        assert!(!view.is_pending());
        assert_eq!(view.offsets(Point::new(1.0, 1.0)), Point::new(1.0, 1.0));
    }
}

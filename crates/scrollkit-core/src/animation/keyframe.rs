#![forbid(unsafe_code)]

//! Single-segment keyframe animation.
//!
//! # Invariants
//!
//! 1. `sample(from, Duration::ZERO)` returns `from`.
//! 2. `sample(from, t)` for `t >= duration` returns the final value exactly.
//! 3. A zero duration completes immediately.

use std::time::Duration;

use super::{EasingFn, ease_out};
use crate::geometry::Point;

/// Values a keyframe animation can interpolate.
pub trait Interpolate: Copy {
    fn interpolate(from: Self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * t
    }
}

impl Interpolate for Point {
    #[inline]
    fn interpolate(from: Point, to: Point, t: f64) -> Point {
        from.lerp(to, t)
    }
}

/// An animation from the engine's current value to `final_value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeAnimation<T> {
    final_value: T,
    duration: Duration,
    easing: EasingFn,
}

/// Animation of the scroll position.
pub type PositionAnimation = KeyframeAnimation<Point>;

/// Animation of the zoom factor.
pub type ScalarAnimation = KeyframeAnimation<f64>;

impl<T: Interpolate> KeyframeAnimation<T> {
    /// Create an animation with the default ease-out curve.
    #[must_use]
    pub fn new(final_value: T, duration: Duration) -> Self {
        Self {
            final_value,
            duration,
            easing: ease_out,
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    #[inline]
    pub fn final_value(&self) -> T {
        self.final_value
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Value at `elapsed` when the animation started at `from`.
    pub fn sample(&self, from: T, elapsed: Duration) -> T {
        if elapsed >= self.duration {
            return self.final_value;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        T::interpolate(from, self.final_value, (self.easing)(t))
    }

    /// Whether the animation has finished at `elapsed`.
    #[inline]
    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::linear;

    #[test]
    fn sample_endpoints() {
        let anim = PositionAnimation::new(Point::new(100.0, 50.0), Duration::from_millis(200));
        assert_eq!(anim.sample(Point::ZERO, Duration::ZERO), Point::ZERO);
        assert_eq!(
            anim.sample(Point::ZERO, Duration::from_millis(200)),
            Point::new(100.0, 50.0)
        );
        assert_eq!(
            anim.sample(Point::ZERO, Duration::from_secs(5)),
            Point::new(100.0, 50.0)
        );
    }

    #[test]
    fn linear_midpoint() {
        let anim = ScalarAnimation::new(3.0, Duration::from_millis(100)).easing(linear);
        let mid = anim.sample(1.0, Duration::from_millis(50));
        assert!((mid - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_is_immediately_complete() {
        let anim = ScalarAnimation::new(2.0, Duration::ZERO);
        assert!(anim.is_complete(Duration::ZERO));
        assert_eq!(anim.sample(1.0, Duration::ZERO), 2.0);
    }
}

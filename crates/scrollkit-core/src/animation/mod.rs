#![forbid(unsafe_code)]

//! Keyframe animations handed to the motion engine.
//!
//! A presenter never drives intermediate animation values itself. It builds a
//! [`KeyframeAnimation`] describing the final value, the duration and the
//! easing, and gives it to the engine which samples it on its own clock.
//!
//! Durations are derived from the travelled distance through a
//! [`DurationPolicy`].

mod duration;
mod keyframe;

pub use duration::DurationPolicy;
pub use keyframe::{Interpolate, KeyframeAnimation, PositionAnimation, ScalarAnimation};

/// An easing curve mapping normalized time `[0, 1]` to normalized progress.
pub type EasingFn = fn(f64) -> f64;

/// Identity curve.
#[inline]
pub fn linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Cubic ease-in.
#[inline]
pub fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Cubic ease-out. The default for programmatic scrolls.
#[inline]
pub fn ease_out(t: f64) -> f64 {
    let t = 1.0 - t.clamp(0.0, 1.0);
    1.0 - t * t * t
}

/// Cubic ease-in-out.
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_are_fixed() {
        for f in [linear as EasingFn, ease_in, ease_out, ease_in_out] {
            assert!((f(0.0)).abs() < 1e-12);
            assert!((f(1.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert_eq!(ease_out(-1.0), 0.0);
        assert_eq!(ease_out(2.0), 1.0);
        assert_eq!(linear(7.0), 1.0);
    }

    #[test]
    fn ease_out_leads_linear() {
        assert!(ease_out(0.25) > linear(0.25));
        assert!(ease_in(0.25) < linear(0.25));
    }
}

#![forbid(unsafe_code)]

//! Distance-proportional animation durations.

use std::time::Duration;

/// Maps a travelled distance to an animation duration.
///
/// `duration = clamp(distance * ms_per_unit, min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationPolicy {
    /// Milliseconds added per unit of distance.
    pub ms_per_unit: f64,
    /// Lower bound in milliseconds.
    pub min_ms: u64,
    /// Upper bound in milliseconds.
    pub max_ms: u64,
}

impl DurationPolicy {
    /// Offsets animations: 5 ms per pixel, 50..1000 ms.
    pub const OFFSETS: Self = Self {
        ms_per_unit: 5.0,
        min_ms: 50,
        max_ms: 1000,
    };

    /// Zoom animations: 250 ms per unit of zoom factor, 50..1000 ms.
    pub const ZOOM: Self = Self {
        ms_per_unit: 250.0,
        min_ms: 50,
        max_ms: 1000,
    };

    /// Duration for travelling `distance` units.
    pub fn duration_for(&self, distance: f64) -> Duration {
        let min = self.min_ms as f64;
        let max = (self.max_ms as f64).max(min);
        let ms = if distance.is_finite() {
            (distance.abs() * self.ms_per_unit).clamp(min, max)
        } else {
            max
        };
        Duration::from_secs_f64(ms / 1000.0)
    }

    /// Problems with this policy, empty when valid.
    pub fn validate(&self, name: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.ms_per_unit.is_finite() || self.ms_per_unit < 0.0 {
            errors.push(format!(
                "{name}.ms_per_unit must be finite and >= 0, got {}",
                self.ms_per_unit
            ));
        }
        if self.min_ms > self.max_ms {
            errors.push(format!(
                "{name}.min_ms ({}) must be <= max_ms ({})",
                self.min_ms, self.max_ms
            ));
        }
        errors
    }
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::OFFSETS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_distance_clamps_to_min() {
        assert_eq!(DurationPolicy::OFFSETS.duration_for(1.0), Duration::from_millis(50));
    }

    #[test]
    fn long_distance_clamps_to_max() {
        assert_eq!(DurationPolicy::OFFSETS.duration_for(10_000.0), Duration::from_secs(1));
    }

    #[test]
    fn proportional_in_between() {
        assert_eq!(DurationPolicy::OFFSETS.duration_for(100.0), Duration::from_millis(500));
        assert_eq!(DurationPolicy::ZOOM.duration_for(-2.0), Duration::from_millis(500));
    }

    #[test]
    fn non_finite_distance_uses_max() {
        assert_eq!(DurationPolicy::ZOOM.duration_for(f64::NAN), Duration::from_secs(1));
    }

    #[test]
    fn validate_flags_inverted_bounds() {
        let p = DurationPolicy {
            ms_per_unit: 1.0,
            min_ms: 10,
            max_ms: 5,
        };
        assert_eq!(p.validate("offsets").len(), 1);
        assert!(DurationPolicy::OFFSETS.validate("offsets").is_empty());
    }
}

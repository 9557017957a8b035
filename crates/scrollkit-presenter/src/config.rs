#![forbid(unsafe_code)]

//! Presenter configuration.
//!
//! Captures the tunable constants of the view-change pipeline as a single
//! [`PresenterConfig`]. With the `config-file` feature it can be loaded from
//! TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! queued_operation_ticks = 3
//! min_controller_velocity = 30.0
//!
//! [offsets_animation]
//! ms_per_unit = 5.0
//! min_ms = 50
//! max_ms = 1000
//! ```
//!
//! ```rust,ignore
//! let config = PresenterConfig::from_toml_file("scrollkit.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! The defaults are empirically tuned platform constants and are kept as-is.

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use scrollkit_core::animation::DurationPolicy;

/// Tunables of the view-change pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct PresenterConfig {
    /// Ticks a queued operation waits before dispatch.
    pub queued_operation_ticks: u8,

    /// Ticks after dispatch before a silent non-animated operation is
    /// completed anyway.
    pub non_animated_completion_ticks: u8,

    /// Minimum per-axis velocity of a controller nudge issued from rest.
    pub min_controller_velocity: f64,

    /// Default position inertia decay rate.
    pub position_inertia_decay_rate: f64,

    /// Default scale inertia decay rate.
    pub scale_inertia_decay_rate: f64,

    pub min_zoom_factor: f64,
    pub max_zoom_factor: f64,

    /// Distance-proportional duration of animated offsets changes.
    pub offsets_animation: DurationPolicy,

    /// Distance-proportional duration of animated zoom changes.
    pub zoom_animation: DurationPolicy,

    /// Test hook: resolve `AnimationMode::Auto` to this value.
    pub animations_enabled_override: Option<bool>,

    /// Test hook: fixed offsets animation duration in milliseconds.
    pub offsets_animation_duration_override_ms: Option<u64>,

    /// Test hook: fixed zoom animation duration in milliseconds.
    pub zoom_animation_duration_override_ms: Option<u64>,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            queued_operation_ticks: 3,
            non_animated_completion_ticks: 2,
            min_controller_velocity: 30.0,
            position_inertia_decay_rate: 0.95,
            scale_inertia_decay_rate: 0.985,
            min_zoom_factor: 0.1,
            max_zoom_factor: 10.0,
            offsets_animation: DurationPolicy::OFFSETS,
            zoom_animation: DurationPolicy::ZOOM,
            animations_enabled_override: None,
            offsets_animation_duration_override_ms: None,
            zoom_animation_duration_override_ms: None,
        }
    }
}

impl PresenterConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.queued_operation_ticks == 0 {
            errors.push("queued_operation_ticks must be > 0".into());
        }
        if self.non_animated_completion_ticks == 0 {
            errors.push("non_animated_completion_ticks must be > 0".into());
        }
        if !self.min_controller_velocity.is_finite() || self.min_controller_velocity < 0.0 {
            errors.push(format!(
                "min_controller_velocity must be finite and >= 0, got {}",
                self.min_controller_velocity
            ));
        }
        for (name, rate) in [
            ("position_inertia_decay_rate", self.position_inertia_decay_rate),
            ("scale_inertia_decay_rate", self.scale_inertia_decay_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                errors.push(format!("{name} must be in [0, 1], got {rate}"));
            }
        }
        if !self.min_zoom_factor.is_finite() || !self.max_zoom_factor.is_finite() {
            errors.push("zoom factor bounds must be finite".into());
        } else if self.min_zoom_factor <= 0.0 {
            errors.push(format!(
                "min_zoom_factor must be > 0, got {}",
                self.min_zoom_factor
            ));
        } else if self.min_zoom_factor > self.max_zoom_factor {
            errors.push(format!(
                "min_zoom_factor ({}) must be <= max_zoom_factor ({})",
                self.min_zoom_factor, self.max_zoom_factor
            ));
        }
        errors.extend(self.offsets_animation.validate("offsets_animation"));
        errors.extend(self.zoom_animation.validate("zoom_animation"));

        errors
    }

    /// `self` if valid, otherwise every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Duration of an offsets animation covering `distance`.
    pub fn offsets_animation_duration(&self, distance: f64) -> Duration {
        self.offsets_animation_duration_override_ms
            .map_or_else(|| self.offsets_animation.duration_for(distance), Duration::from_millis)
    }

    /// Duration of a zoom animation covering `distance`.
    pub fn zoom_animation_duration(&self, distance: f64) -> Duration {
        self.zoom_animation_duration_override_ms
            .map_or_else(|| self.zoom_animation.duration_for(distance), Duration::from_millis)
    }
}

/// Errors from loading a [`PresenterConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

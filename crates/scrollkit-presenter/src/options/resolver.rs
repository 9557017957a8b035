#![forbid(unsafe_code)]

//! Resolves view kind and options into an engine operation type.

use std::fmt;

use super::{AnimationMode, ViewChangeOptions, ViewKind};
use crate::operation::OperationType;

/// Platform-wide animations setting.
pub trait AnimationSettings {
    fn animations_enabled(&self) -> bool;
}

/// Fixed setting, for hosts without a platform query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAnimationSettings(pub bool);

impl Default for StaticAnimationSettings {
    fn default() -> Self {
        Self(true)
    }
}

impl AnimationSettings for StaticAnimationSettings {
    fn animations_enabled(&self) -> bool {
        self.0
    }
}

/// Classifies requests at admission.
pub struct OptionsResolver {
    settings: Box<dyn AnimationSettings>,
    test_override: Option<bool>,
}

impl fmt::Debug for OptionsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsResolver")
            .field("animations_enabled", &self.settings.animations_enabled())
            .field("test_override", &self.test_override)
            .finish()
    }
}

impl Default for OptionsResolver {
    fn default() -> Self {
        Self::new(Box::new(StaticAnimationSettings::default()))
    }
}

impl OptionsResolver {
    pub fn new(settings: Box<dyn AnimationSettings>) -> Self {
        Self {
            settings,
            test_override: None,
        }
    }

    /// Force `Auto` to resolve to this value regardless of the platform.
    #[must_use]
    pub fn with_override(mut self, test_override: Option<bool>) -> Self {
        self.test_override = test_override;
        self
    }

    pub fn set_settings(&mut self, settings: Box<dyn AnimationSettings>) {
        self.settings = settings;
    }

    pub fn set_override(&mut self, test_override: Option<bool>) {
        self.test_override = test_override;
    }

    /// Whether `mode` animates.
    pub fn is_animation_enabled(&self, mode: AnimationMode) -> bool {
        match mode {
            AnimationMode::Enabled => true,
            AnimationMode::Disabled => false,
            AnimationMode::Auto => self
                .test_override
                .unwrap_or_else(|| self.settings.animations_enabled()),
        }
    }

    /// Operation type of an offsets change.
    ///
    /// Relative, non-animated changes that ignore snap points go through the
    /// by-delta primitive; everything else resolves an absolute target.
    pub fn offsets_operation(&self, kind: ViewKind, options: &ViewChangeOptions) -> OperationType {
        if self.is_animation_enabled(options.animation_mode) {
            OperationType::UpdatePositionWithAnimation
        } else if kind == ViewKind::RelativeToCurrentView && options.ignores_snap_points() {
            OperationType::UpdatePositionBy
        } else {
            OperationType::UpdatePosition
        }
    }

    /// Operation type of a zoom factor change.
    pub fn zoom_operation(&self, options: &ViewChangeOptions) -> OperationType {
        if self.is_animation_enabled(options.animation_mode) {
            OperationType::UpdateScaleWithAnimation
        } else {
            OperationType::UpdateScale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SnapPointsMode;

    #[test]
    fn explicit_modes_ignore_platform() {
        let r = OptionsResolver::new(Box::new(StaticAnimationSettings(false)));
        assert!(r.is_animation_enabled(AnimationMode::Enabled));
        assert!(!r.is_animation_enabled(AnimationMode::Disabled));
        assert!(!r.is_animation_enabled(AnimationMode::Auto));
    }

    #[test]
    fn override_wins_over_platform_for_auto() {
        let r = OptionsResolver::new(Box::new(StaticAnimationSettings(false))).with_override(Some(true));
        assert!(r.is_animation_enabled(AnimationMode::Auto));
        assert!(!r.is_animation_enabled(AnimationMode::Disabled));
    }

    #[test]
    fn offsets_classification() {
        let r = OptionsResolver::default();
        let ignore = ViewChangeOptions::new(AnimationMode::Disabled, SnapPointsMode::Ignore);
        assert_eq!(
            r.offsets_operation(ViewKind::RelativeToCurrentView, &ignore),
            OperationType::UpdatePositionBy
        );
        assert_eq!(
            r.offsets_operation(ViewKind::Absolute, &ignore),
            OperationType::UpdatePosition
        );
        assert_eq!(
            r.offsets_operation(ViewKind::RelativeToCurrentView, &ViewChangeOptions::instant()),
            OperationType::UpdatePosition
        );
        assert_eq!(
            r.offsets_operation(ViewKind::RelativeToCurrentView, &ViewChangeOptions::default()),
            OperationType::UpdatePositionWithAnimation
        );
    }

    #[test]
    fn zoom_classification() {
        let r = OptionsResolver::default().with_override(Some(false));
        assert_eq!(r.zoom_operation(&ViewChangeOptions::default()), OperationType::UpdateScale);
        assert_eq!(
            r.zoom_operation(&ViewChangeOptions::animated()),
            OperationType::UpdateScaleWithAnimation
        );
    }
}

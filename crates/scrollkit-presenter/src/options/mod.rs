#![forbid(unsafe_code)]

//! View-change options and their resolution into engine operation types.

mod resolver;

pub use resolver::{AnimationSettings, OptionsResolver, StaticAnimationSettings};

/// Whether a view change animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum AnimationMode {
    /// Follow the platform animations setting.
    #[default]
    Auto,
    Enabled,
    Disabled,
}

/// Whether snap points apply to a view change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SnapPointsMode {
    #[default]
    Default,
    Ignore,
}

/// How target values of a view change are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Absolute,
    /// Values are deltas added to the anticipated view.
    RelativeToCurrentView,
}

/// Caller options shared by scroll and zoom requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ViewChangeOptions {
    pub animation_mode: AnimationMode,
    pub snap_points_mode: SnapPointsMode,
}

impl ViewChangeOptions {
    pub const fn new(animation_mode: AnimationMode, snap_points_mode: SnapPointsMode) -> Self {
        Self {
            animation_mode,
            snap_points_mode,
        }
    }

    /// Non-animated, snapping.
    pub const fn instant() -> Self {
        Self::new(AnimationMode::Disabled, SnapPointsMode::Default)
    }

    /// Animated, snapping.
    pub const fn animated() -> Self {
        Self::new(AnimationMode::Enabled, SnapPointsMode::Default)
    }

    #[must_use]
    pub const fn with_snap_points_mode(mut self, mode: SnapPointsMode) -> Self {
        self.snap_points_mode = mode;
        self
    }

    #[inline]
    pub const fn ignores_snap_points(&self) -> bool {
        matches!(self.snap_points_mode, SnapPointsMode::Ignore)
    }
}

#![forbid(unsafe_code)]

//! ScrollKit public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use scrollkit_core::animation::{DurationPolicy, PositionAnimation, ScalarAnimation};
pub use scrollkit_core::geometry::{Point, Rect, Size, Vector2};
pub use scrollkit_core::motion::{
    EngineEvent, InteractionState, MotionBounds, MotionEngine, MotionEngineError, RequestId,
    SnapDimension,
};
pub use scrollkit_core::snap::{
    ApplicableRange, ScrollSnapPoint, SnapModifier, SnapPointError, SnapPointSet,
    SnapPointsAlignment, ZoomSnapPoint,
};

// --- Presenter re-exports --------------------------------------------------

pub use scrollkit_presenter::{
    AnimationMode, AnimationSettings, BringIntoViewRequest, ConfigError, CorrelationId, ElementId,
    ElementLocator, PresenterConfig, PresenterError, PresenterEvent, ScrollController,
    ScrollControllerRequest, ScrollControllerValues, ScrollOrientation, ScrollPresenter,
    SnapPointsMode, StaticAnimationSettings, ViewChangeOptions, ViewChangeResult,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for scrollkit hosts.
#[derive(Debug)]
pub enum Error {
    /// A request or setter was rejected.
    Presenter(PresenterError),
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Presenter(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Presenter(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<PresenterError> for Error {
    fn from(err: PresenterError) -> Self {
        Self::Presenter(err)
    }
}

impl From<SnapPointError> for Error {
    fn from(err: SnapPointError) -> Self {
        Self::Presenter(err.into())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for scrollkit APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnimationMode, CorrelationId, Error, InteractionState, MotionEngine, Point,
        PresenterConfig, PresenterEvent, Result, ScrollOrientation, ScrollPresenter,
        ScrollSnapPoint, Size, SnapPointsAlignment, SnapPointsMode, Vector2, ViewChangeOptions,
        ViewChangeResult, ZoomSnapPoint,
    };

    pub use crate::{core, presenter};
}

pub use scrollkit_core as core;
pub use scrollkit_presenter as presenter;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use scrollkit_harness::SimulatedTracker;

    #[test]
    fn prelude_drives_a_presenter() {
        let mut presenter: ScrollPresenter<SimulatedTracker> =
            ScrollPresenter::new(PresenterConfig::default());
        presenter.set_viewport_size(Size::new(100.0, 100.0));
        assert_eq!(
            presenter
                .scroll_to(10.0, 10.0, ViewChangeOptions::instant())
                .unwrap(),
            CorrelationId::NO_OP
        );
    }

    #[test]
    fn errors_convert_into_facade_error() {
        let err: Error = crate::PresenterError::NonFiniteOffset(f64::NAN).into();
        assert!(matches!(err, Error::Presenter(_)));
        let err: Error = crate::SnapPointError::NonFiniteValue.into();
        assert!(err.to_string().starts_with("invalid snap point"));
    }
}

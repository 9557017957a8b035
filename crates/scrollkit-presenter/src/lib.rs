#![forbid(unsafe_code)]

//! Scrollkit Presenter
//!
//! This crate turns scroll and zoom requests into calls on an asynchronous
//! motion engine and reports when each request has finished.
//!
//! # Key Components
//!
//! - [`ScrollPresenter`] - Facade owning the queue, reconciler, and snap points
//! - [`OperationQueue`] - Ordered, tick-driven view-change operations
//! - [`CompletionReconciler`] - Maps engine events to operation outcomes
//! - [`AnticipatedView`] - Where the view lands once pending requests apply
//! - [`OptionsResolver`] - Picks the engine primitive for a request
//! - [`PresenterConfig`] - Tunables, loadable from TOML or JSON
//!
//! # Role in Scrollkit
//! `scrollkit-presenter` is the stateful layer. It consumes the geometry,
//! snap point, and motion contracts of `scrollkit-core` and exposes the
//! request/completion protocol hosts program against.
//!
//! # How it fits in the system
//! A host feeds user and controller requests in, calls
//! [`ScrollPresenter::tick`] every frame, forwards engine events through
//! [`ScrollPresenter::handle_engine_event`], and drains
//! [`PresenterEvent`]s. The engine itself is any [`MotionEngine`]
//! implementation; `scrollkit-harness` provides a simulated one.
//!
//! [`MotionEngine`]: scrollkit_core::motion::MotionEngine

pub mod anticipated;
pub mod bring_into_view;
pub mod config;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod operation;
pub mod options;
pub mod presenter;
pub mod queue;
pub mod reconciler;
pub mod snap_points;
pub mod view_change;

pub use anticipated::AnticipatedView;
pub use bring_into_view::{
    BringIntoViewContext, BringIntoViewRequest, ElementId, ElementLocator, ViewportGeometry,
    compute_target_offsets,
};
pub use config::{ConfigError, PresenterConfig};
pub use controller::{
    ScrollController, ScrollControllerRequest, ScrollControllerValues, ScrollOrientation,
};
pub use dispatch::ViewState;
pub use error::{PresenterError, Result};
pub use events::{CorrelationId, CorrelationIdGenerator, PresenterEvent, ViewChangeResult};
pub use operation::{AsyncViewChangeOperation, OperationFlags, OperationTrigger, OperationType};
pub use options::{
    AnimationMode, AnimationSettings, OptionsResolver, SnapPointsMode, StaticAnimationSettings,
    ViewChangeOptions, ViewKind,
};
pub use presenter::ScrollPresenter;
pub use queue::{Completion, OperationKey, OperationQueue};
pub use reconciler::{CompletionReconciler, CompletionSweep, SweepTarget, Transition};
pub use snap_points::SnapPointSets;
pub use view_change::{
    AnticipatedBase, OffsetsChange, OffsetsChangeWithVelocity, ViewChangePayload, ZoomFactorChange,
    ZoomFactorChangeWithVelocity,
};

#![forbid(unsafe_code)]

//! Core: geometry, snap points, keyframe animation and the motion engine contract.
//!
//! # Role in ScrollKit
//! `scrollkit-core` holds the leaf types the presenter is built on. It has no
//! notion of requests, queues or correlation ids.
//!
//! # Primary responsibilities
//! - **Geometry**: `Point`, `Vector2`, `Size`, `Rect` in logical `f64` units.
//! - **Snap points**: definitions, consolidated wrappers, applicable and
//!   impulse zones, and the engine-facing [`snap::SnapModifier`].
//! - **Animation**: [`animation::KeyframeAnimation`], easing curves and the
//!   distance-to-duration policy.
//! - **Motion engine**: the [`motion::MotionEngine`] trait and the
//!   [`motion::EngineEvent`] callbacks it reports.
//!
//! # How it fits in the system
//! `scrollkit-presenter` drives a `MotionEngine` implementation and feeds
//! its events back through the completion reconciler. `scrollkit-harness`
//! provides a deterministic engine for tests.

pub mod animation;
pub mod geometry;
pub mod motion;
pub mod snap;

pub use geometry::{Point, Rect, Size, Vector2};
pub use motion::{EngineEvent, InteractionState, MotionEngine, RequestId};

#![forbid(unsafe_code)]

//! Test harness and reference fixtures for Scrollkit.
//!
//! # Key Components
//!
//! - [`SimulatedTracker`] - Deterministic [`MotionEngine`] on a fixed frame clock
//! - [`PresenterHarness`] - Runs the host loop and records presenter events
//! - [`RecordingScrollController`] - Scroll controller that logs every call
//!
//! [`MotionEngine`]: scrollkit_core::motion::MotionEngine

pub mod controller;
pub mod harness;
pub mod tracker;

pub use controller::{ControllerLog, RecordingScrollController};
pub use harness::{PresenterHarness, RecordedEvent};
pub use tracker::{EngineCall, SimulatedTracker};

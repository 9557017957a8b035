#![forbid(unsafe_code)]

//! Recording scroll controller.

use std::sync::{Arc, Mutex, PoisonError};

use scrollkit_presenter::{CorrelationId, ScrollController, ScrollControllerValues};

/// What a controller has been told so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerLog {
    pub values: Vec<ScrollControllerValues>,
    pub is_scrollable: Option<bool>,
    pub completed: Vec<CorrelationId>,
}

/// Scroll controller that records every call.
///
/// Clones share one log: hand a boxed clone to the presenter and keep the
/// original for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingScrollController {
    log: Arc<Mutex<ControllerLog>>,
}

impl RecordingScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Box<dyn ScrollController> {
        Box::new(self.clone())
    }

    pub fn snapshot(&self) -> ControllerLog {
        self.with_log(|log| log.clone())
    }

    pub fn completed(&self) -> Vec<CorrelationId> {
        self.with_log(|log| log.completed.clone())
    }

    pub fn last_values(&self) -> Option<ScrollControllerValues> {
        self.with_log(|log| log.values.last().copied())
    }

    fn with_log<R>(&self, f: impl FnOnce(&mut ControllerLog) -> R) -> R {
        let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut log)
    }
}

impl ScrollController for RecordingScrollController {
    fn set_values(&mut self, values: ScrollControllerValues) {
        self.with_log(|log| log.values.push(values));
    }

    fn set_is_scrollable(&mut self, is_scrollable: bool) {
        self.with_log(|log| log.is_scrollable = Some(is_scrollable));
    }

    fn notify_requested_scroll_completed(&mut self, correlation_id: CorrelationId) {
        self.with_log(|log| log.completed.push(correlation_id));
    }
}

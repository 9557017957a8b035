#![forbid(unsafe_code)]

//! Frame-stepped presenter harness.
//!
//! Wires a [`ScrollPresenter`] to a [`SimulatedTracker`] and runs the host
//! loop: tick the presenter, deliver engine events, advance the clock,
//! deliver again. Every presenter event is recorded with the frame it was
//! raised on and can be exported as JSONL.

use scrollkit_core::geometry::Size;
use scrollkit_presenter::{
    CorrelationId, PresenterConfig, PresenterEvent, ScrollPresenter, ViewChangeResult,
};
use serde_json::{Value, json};
use tracing::info_span;

use crate::tracker::SimulatedTracker;

/// Presenter event stamped with the frame that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub frame: u64,
    pub event: PresenterEvent,
}

/// Presenter driven by a simulated engine.
#[derive(Debug)]
pub struct PresenterHarness {
    presenter: ScrollPresenter<SimulatedTracker>,
    events: Vec<RecordedEvent>,
    frame: u64,
}

impl PresenterHarness {
    /// Attached presenter with content and viewport set, and animations
    /// resolved as disabled unless requested explicitly.
    pub fn new(content: Size, viewport: Size) -> Self {
        let config = PresenterConfig {
            animations_enabled_override: Some(false),
            ..PresenterConfig::default()
        };
        Self::with_config(config, content, viewport)
    }

    pub fn with_config(config: PresenterConfig, content: Size, viewport: Size) -> Self {
        let mut presenter = ScrollPresenter::new(config);
        presenter.set_viewport_size(viewport);
        presenter.set_content(Some(content));
        presenter.attach(SimulatedTracker::new());
        let mut harness = Self {
            presenter,
            events: Vec::new(),
            frame: 0,
        };
        harness.pump();
        harness.events.clear();
        harness
    }

    pub fn presenter(&self) -> &ScrollPresenter<SimulatedTracker> {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut ScrollPresenter<SimulatedTracker> {
        &mut self.presenter
    }

    /// The attached tracker, if the presenter still has one.
    pub fn tracker(&self) -> Option<&SimulatedTracker> {
        self.presenter.engine()
    }

    pub fn tracker_mut(&mut self) -> Option<&mut SimulatedTracker> {
        self.presenter.engine_mut()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Deliver queued engine events and collect presenter events.
    pub fn pump(&mut self) {
        loop {
            let events = match self.presenter.engine_mut() {
                Some(tracker) if tracker.has_pending_events() => tracker.drain_events(),
                _ => break,
            };
            for event in events {
                self.presenter.handle_engine_event(event);
            }
        }
        self.collect();
    }

    /// Run one frame of the host loop.
    pub fn step(&mut self) {
        let _span = info_span!("scrollkit.harness.frame", frame = self.frame).entered();
        self.presenter.tick();
        self.pump();
        if let Some(tracker) = self.presenter.engine_mut() {
            tracker.advance_frame();
        }
        self.pump();
        self.frame += 1;
    }

    pub fn run_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Step until nothing is queued or moving. Returns `false` when
    /// `max_frames` ran out first.
    pub fn run_until_idle(&mut self, max_frames: u64) -> bool {
        for _ in 0..max_frames {
            if self.is_settled() {
                return true;
            }
            self.step();
        }
        self.is_settled()
    }

    fn is_settled(&self) -> bool {
        self.presenter.pending_operations() == 0
            && self.tracker().is_none_or(|t| !t.is_moving() && !t.has_pending_events())
    }

    fn collect(&mut self) {
        let frame = self.frame;
        self.events.extend(
            self.presenter
                .drain_events()
                .into_iter()
                .map(|event| RecordedEvent { frame, event }),
        );
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Recorded events, without frames.
    pub fn presenter_events(&self) -> Vec<PresenterEvent> {
        self.events.iter().map(|r| r.event.clone()).collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Completions in the order they were raised.
    pub fn completions(&self) -> Vec<(CorrelationId, ViewChangeResult)> {
        self.events
            .iter()
            .filter_map(|r| r.event.completion())
            .collect()
    }

    /// Result of the completion for `correlation_id`, if raised.
    pub fn completion_of(&self, correlation_id: CorrelationId) -> Option<ViewChangeResult> {
        self.completions()
            .into_iter()
            .find(|(id, _)| *id == correlation_id)
            .map(|(_, result)| result)
    }

    /// Frame on which `correlation_id` completed.
    pub fn completion_frame(&self, correlation_id: CorrelationId) -> Option<u64> {
        self.events
            .iter()
            .find(|r| r.event.completion().is_some_and(|(id, _)| id == correlation_id))
            .map(|r| r.frame)
    }

    /// Recorded events as JSONL, one object per line.
    pub fn to_jsonl(&self) -> String {
        let mut out = String::new();
        for recorded in &self.events {
            out.push_str(&event_json(recorded).to_string());
            out.push('\n');
        }
        out
    }
}

fn event_json(recorded: &RecordedEvent) -> Value {
    let frame = recorded.frame;
    match &recorded.event {
        PresenterEvent::ScrollStarting {
            correlation_id,
            horizontal_offset,
            vertical_offset,
            zoom_factor,
        }
        | PresenterEvent::ZoomStarting {
            correlation_id,
            horizontal_offset,
            vertical_offset,
            zoom_factor,
        } => json!({
            "frame": frame,
            "event": event_name(&recorded.event),
            "correlation_id": correlation_id.0,
            "horizontal_offset": horizontal_offset,
            "vertical_offset": vertical_offset,
            "zoom_factor": zoom_factor,
        }),
        PresenterEvent::ScrollCompleted {
            correlation_id,
            result,
        }
        | PresenterEvent::ZoomCompleted {
            correlation_id,
            result,
        } => json!({
            "frame": frame,
            "event": event_name(&recorded.event),
            "correlation_id": correlation_id.0,
            "result": result.as_str(),
        }),
        PresenterEvent::StateChanged { state } => json!({
            "frame": frame,
            "event": event_name(&recorded.event),
            "state": format!("{state:?}"),
        }),
        PresenterEvent::ViewChanged {
            horizontal_offset,
            vertical_offset,
            zoom_factor,
        } => json!({
            "frame": frame,
            "event": event_name(&recorded.event),
            "horizontal_offset": horizontal_offset,
            "vertical_offset": vertical_offset,
            "zoom_factor": zoom_factor,
        }),
        PresenterEvent::BringingIntoView {
            correlation_id,
            target_horizontal_offset,
            target_vertical_offset,
            applied_offset,
        } => json!({
            "frame": frame,
            "event": event_name(&recorded.event),
            "correlation_id": correlation_id.0,
            "target_horizontal_offset": target_horizontal_offset,
            "target_vertical_offset": target_vertical_offset,
            "applied_offset": [applied_offset.x, applied_offset.y],
        }),
    }
}

fn event_name(event: &PresenterEvent) -> &'static str {
    match event {
        PresenterEvent::ScrollStarting { .. } => "scroll_starting",
        PresenterEvent::ScrollCompleted { .. } => "scroll_completed",
        PresenterEvent::ZoomStarting { .. } => "zoom_starting",
        PresenterEvent::ZoomCompleted { .. } => "zoom_completed",
        PresenterEvent::StateChanged { .. } => "state_changed",
        PresenterEvent::ViewChanged { .. } => "view_changed",
        PresenterEvent::BringingIntoView { .. } => "bringing_into_view",
    }
}

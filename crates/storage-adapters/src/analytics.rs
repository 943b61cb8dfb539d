//! `AnalyticsSink` adapters.
//!
//! `TracingAnalyticsSink` emits each event as a structured `tracing` event on
//! the `analytics` target. `MemoryAnalyticsSink` keeps them for inspection.

use std::sync::{Mutex, PoisonError};

use domains::{AnalyticsEvent, AnalyticsSink};
use tracing::info;

#[derive(Debug, Default)]
pub struct TracingAnalyticsSink;

impl AnalyticsSink for TracingAnalyticsSink {
    fn log(&self, event: AnalyticsEvent) {
        info!(
            target: "analytics",
            surface = ?event.surface(),
            action = event.action(),
            correlation_id = event.correlation_id().unwrap_or("-"),
            "analytics event"
        );
    }
}

#[derive(Debug, Default)]
pub struct MemoryAnalyticsSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemoryAnalyticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AnalyticsSink for MemoryAnalyticsSink {
    fn log(&self, event: AnalyticsEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

use std::collections::VecDeque;
use std::sync::Mutex;

use super::event::TelemetryEvent;
use super::metrics::{compute_snapshot, TelemetrySnapshot};
use super::TelemetryObserver;

const MAX_EVENTS: usize = 10_000;

/// Bounded in-memory event buffer. The oldest event is dropped when full.
#[derive(Debug)]
pub struct TelemetryRecorder {
    buffer: Mutex<VecDeque<TelemetryEvent>>,
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(MAX_EVENTS)),
        }
    }

    pub fn record(&self, event: TelemetryEvent) {
        let mut buffer = self.buffer.lock().unwrap_or_else(|p| p.into_inner());
        if buffer.len() >= MAX_EVENTS {
            buffer.pop_front();
        }
        buffer.push_back(event);
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        let buffer = self.buffer.lock().unwrap_or_else(|p| p.into_inner());
        compute_snapshot(&buffer)
    }

    pub fn events(&self) -> Vec<TelemetryEvent> {
        let buffer = self.buffer.lock().unwrap_or_else(|p| p.into_inner());
        buffer.iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryObserver for TelemetryRecorder {
    fn on_event(&self, event: TelemetryEvent) {
        self.record(event);
    }
}

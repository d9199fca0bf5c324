//! Decision telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a read-only side-effect layer. Routers and the executor emit
//! events but never read them back.
//!
//! # PRIVACY INVARIANT
//! Events never contain user content: no transcript text, no item text, no
//! labels. Only enums, counts and note ids are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::*;
pub use metrics::{compute_snapshot, TelemetrySnapshot};
pub use recorder::TelemetryRecorder;

/// Sink for decision events. Implementations must be cheap and non-blocking.
pub trait TelemetryObserver: Send + Sync {
    fn on_event(&self, event: TelemetryEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TelemetryObserver for NoopObserver {
    fn on_event(&self, _event: TelemetryEvent) {}
}

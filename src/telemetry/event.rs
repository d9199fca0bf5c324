use serde::{Deserialize, Serialize};

use crate::list::types::ListAction;
use crate::routing::types::{IntentType, RouteKind, RoutingMode};

// Allowed: enums, counts
// Forbidden: transcript text, item text, labels, coordinates

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    RouteDecision {
        kind: RouteKind,
    },

    AdaptiveDecision {
        mode: RoutingMode,
        intent: IntentType,
        forced: bool,
    },

    ListExecution {
        action: ListAction,
        outcome: ExecutionOutcome,
        matched: usize,
        total: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    Success,
    Incomplete,
    Failure,
}

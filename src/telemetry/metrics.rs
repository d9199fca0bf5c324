use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;

use super::event::{ExecutionOutcome, TelemetryEvent};
use crate::routing::types::{RouteKind, RoutingMode};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TelemetrySnapshot {
    pub route_stats: RouteStats,
    pub mode_stats: ModeStats,
    pub execution_stats: ExecutionStats,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RouteStats {
    pub total: u64,
    pub by_kind: BTreeMap<RouteKind, u64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ModeStats {
    pub reflex_only: u64,
    pub reflex_then_refine: u64,
    pub refine_only: u64,
    pub forced: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionStats {
    pub success: u64,
    pub incomplete: u64,
    pub failure: u64,
    pub items_requested: u64,
    pub items_matched: u64,
    pub match_ratio: f64,
}

/// Pure function: folds recorded events into counters.
pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::RouteDecision { kind } => {
                snap.route_stats.total += 1;
                *snap.route_stats.by_kind.entry(*kind).or_insert(0) += 1;
            }
            TelemetryEvent::AdaptiveDecision { mode, forced, .. } => {
                match mode {
                    RoutingMode::ReflexOnly => snap.mode_stats.reflex_only += 1,
                    RoutingMode::ReflexThenRefine => snap.mode_stats.reflex_then_refine += 1,
                    RoutingMode::RefineOnly => snap.mode_stats.refine_only += 1,
                }
                if *forced {
                    snap.mode_stats.forced += 1;
                }
            }
            TelemetryEvent::ListExecution {
                outcome,
                matched,
                total,
                ..
            } => {
                match outcome {
                    ExecutionOutcome::Success => snap.execution_stats.success += 1,
                    ExecutionOutcome::Incomplete => snap.execution_stats.incomplete += 1,
                    ExecutionOutcome::Failure => snap.execution_stats.failure += 1,
                }
                snap.execution_stats.items_requested += *total as u64;
                snap.execution_stats.items_matched += *matched as u64;
            }
        }
    }

    if snap.execution_stats.items_requested > 0 {
        snap.execution_stats.match_ratio =
            snap.execution_stats.items_matched as f64 / snap.execution_stats.items_requested as f64;
    }

    snap
}

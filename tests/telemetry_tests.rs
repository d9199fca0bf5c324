use voxnote::list::ListAction;
use voxnote::routing::{IntentType, RouteKind, RoutingMode};
use voxnote::telemetry::{ExecutionOutcome, TelemetryEvent, TelemetryObserver, TelemetryRecorder};

fn execution(outcome: ExecutionOutcome, matched: usize, total: usize) -> TelemetryEvent {
    TelemetryEvent::ListExecution {
        action: ListAction::Add,
        outcome,
        matched,
        total,
    }
}

#[test]
fn test_snapshot_counts() {
    let recorder = TelemetryRecorder::new();

    // 1. Routes
    recorder.on_event(TelemetryEvent::RouteDecision { kind: RouteKind::Note });
    recorder.on_event(TelemetryEvent::RouteDecision { kind: RouteKind::ReminderTime });

    // 2. Modes
    recorder.on_event(TelemetryEvent::AdaptiveDecision {
        mode: RoutingMode::RefineOnly,
        intent: IntentType::Destructive,
        forced: true,
    });

    // 3. Executions
    recorder.on_event(execution(ExecutionOutcome::Success, 3, 4));
    recorder.on_event(execution(ExecutionOutcome::Incomplete, 0, 0));
    recorder.on_event(execution(ExecutionOutcome::Success, 1, 4));

    let snapshot = recorder.snapshot();
    assert_eq!(snapshot.route_stats.total, 2);
    assert_eq!(snapshot.route_stats.by_kind.get(&RouteKind::ReminderTime), Some(&1));
    assert_eq!(snapshot.mode_stats.refine_only, 1);
    assert_eq!(snapshot.mode_stats.forced, 1);
    assert_eq!(snapshot.execution_stats.success, 2);
    assert_eq!(snapshot.execution_stats.incomplete, 1);
    assert_eq!(snapshot.execution_stats.items_requested, 8);
    assert!((snapshot.execution_stats.match_ratio - 0.5).abs() < 1e-9);
}

#[test]
fn test_empty_snapshot() {
    let snapshot = TelemetryRecorder::new().snapshot();
    assert_eq!(snapshot.route_stats.total, 0);
    assert_eq!(snapshot.execution_stats.match_ratio, 0.0, "no division by zero");
}

#[test]
fn test_buffer_is_bounded() {
    let recorder = TelemetryRecorder::new();
    recorder.record(TelemetryEvent::RouteDecision { kind: RouteKind::List });
    for _ in 0..10_000 {
        recorder.record(TelemetryEvent::RouteDecision { kind: RouteKind::Note });
    }

    let events = recorder.events();
    assert_eq!(events.len(), 10_000);
    assert!(
        !events.contains(&TelemetryEvent::RouteDecision { kind: RouteKind::List }),
        "oldest event must be dropped"
    );

    recorder.clear();
    assert!(recorder.events().is_empty());
}

#[test]
fn test_events_serialize_without_text() {
    let event = TelemetryEvent::AdaptiveDecision {
        mode: RoutingMode::ReflexOnly,
        intent: IntentType::ListCommand,
        forced: true,
    };
    let json = serde_json::to_string(&event).expect("serializable");
    assert_eq!(
        json,
        r#"{"AdaptiveDecision":{"mode":"REFLEX_ONLY","intent":"LIST_COMMAND","forced":true}}"#
    );
}

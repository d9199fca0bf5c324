use std::sync::Arc;

use voxnote::error::ConfigError;
use voxnote::routing::{
    forced_mode, AdaptiveRouter, Decision, EarlyIntentHint, IntentType, NoteContext, RoutingMode,
    VoiceHeuristicsConfig, VoiceSegment,
};
use voxnote::telemetry::TelemetryRecorder;

fn names(decision: &Decision) -> Vec<&str> {
    decision.contributions.iter().map(|c| c.name.as_str()).collect()
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_forced_modes() {
    assert_eq!(forced_mode(IntentType::ListCommand), Some(RoutingMode::ReflexOnly));
    assert_eq!(forced_mode(IntentType::ListConvert), Some(RoutingMode::ReflexOnly));
    assert_eq!(forced_mode(IntentType::Reminder), Some(RoutingMode::ReflexThenRefine));
    assert_eq!(forced_mode(IntentType::TitleRename), Some(RoutingMode::ReflexThenRefine));
    assert_eq!(forced_mode(IntentType::Destructive), Some(RoutingMode::RefineOnly));
    assert_eq!(forced_mode(IntentType::ReminderIncomplete), None);
    assert_eq!(forced_mode(IntentType::NoteAppend), None);
    assert_eq!(forced_mode(IntentType::None), None);
}

#[test]
fn test_forced_decision_ignores_score() {
    let router = AdaptiveRouter::default();
    // very low confidence would otherwise send this to refine
    let segment = VoiceSegment::from_text("ajoute du lait", Some(0.1));
    let hint = EarlyIntentHint::of(IntentType::ListCommand, "ajoute du lait", ["add"]);

    let decision = router.decide(&segment, Some(&hint), &NoteContext::default());
    assert_eq!(decision.mode, RoutingMode::ReflexOnly);
    assert!(close(decision.score, 1.0));
    assert_eq!(names(&decision), vec!["forced"]);
    assert_eq!(decision.primary_reason, "forced:LIST_COMMAND");

    let hint = EarlyIntentHint::of(IntentType::Destructive, "efface tout", ["efface tout"]);
    let segment = VoiceSegment::from_text("efface tout", Some(0.99));
    let decision = router.decide(&segment, Some(&hint), &NoteContext::default());
    assert_eq!(decision.mode, RoutingMode::RefineOnly);
    assert!(close(decision.score, -1.0));
}

#[test]
fn test_scored_decision_without_hint() {
    let router = AdaptiveRouter::default();
    let segment = VoiceSegment::from_text("il fait beau ce matin", Some(0.9));

    let decision = router.decide(&segment, None, &NoteContext::default());
    assert_eq!(names(&decision), vec!["confidence(0.90)", "charLen(21)", "tokens(5)"]);
    assert!(close(decision.score, 0.75), "score was {}", decision.score);
    assert_eq!(decision.mode, RoutingMode::ReflexThenRefine);
    assert_eq!(decision.primary_reason, "confidence(0.90)=0.50");
}

#[test]
fn test_low_confidence_goes_to_refine() {
    let router = AdaptiveRouter::default();
    let segment = VoiceSegment::from_text("ok", Some(0.3));

    let decision = router.decide(&segment, None, &NoteContext::default());
    assert!(close(decision.score, -0.7), "score was {}", decision.score);
    assert_eq!(decision.mode, RoutingMode::RefineOnly);
    assert_eq!(decision.primary_reason, "confidence(0.30)=-0.60");
}

#[test]
fn test_latency_pressure_favors_reflex() {
    let router = AdaptiveRouter::default();
    let segment = VoiceSegment::from_text("il fait beau ce matin", Some(0.9));
    let hint = EarlyIntentHint::of(IntentType::NoteAppend, "il fait beau ce matin", Vec::<&str>::new());
    let context = NoteContext {
        is_list_mode: true,
        pending_jobs: 3,
        segment_duration_ms: Some(20_000),
    };

    let decision = router.decide(&segment, Some(&hint), &context);
    let names = names(&decision);
    assert!(names.contains(&"intent(NOTE_APPEND)"));
    assert!(names.contains(&"latencyQueue(3)"));
    assert!(names.contains(&"segmentDuration(20000)"));
    assert!(!names.contains(&"listContext"), "plain notes get no list bonus");
    assert!(close(decision.score, 1.25), "score was {}", decision.score);
    assert_eq!(decision.mode, RoutingMode::ReflexOnly);
}

#[test]
fn test_incomplete_reminder_is_scored() {
    let router = AdaptiveRouter::default();
    let segment = VoiceSegment::from_text("rappelle-moi", None);
    let hint = EarlyIntentHint::of(IntentType::ReminderIncomplete, "rappelle-moi", ["rappelle moi"]);

    let decision = router.decide(&segment, Some(&hint), &NoteContext::default());
    assert_eq!(
        names(&decision),
        vec!["charLen(12)", "tokens(1)", "triggers", "intent(REMINDER_INCOMPLETE)"],
        "no confidence means no confidence contribution"
    );
    assert!(close(decision.score, 0.18), "score was {}", decision.score);
    assert_eq!(decision.mode, RoutingMode::RefineOnly);
}

#[test]
fn test_score_is_clamped() {
    let config = VoiceHeuristicsConfig {
        score_ceiling: 0.5,
        ..VoiceHeuristicsConfig::default()
    };
    let router = AdaptiveRouter::new(config);
    let context = NoteContext {
        is_list_mode: false,
        pending_jobs: 10,
        segment_duration_ms: Some(60_000),
    };
    let segment = VoiceSegment::from_text("il fait beau ce matin", Some(1.0));

    let decision = router.decide(&segment, None, &context);
    assert!(close(decision.score, 0.5));
    assert_eq!(decision.mode, RoutingMode::ReflexThenRefine);

    // forced overrides are clamped too, the mode is kept
    let hint = EarlyIntentHint::of(IntentType::ListConvert, "convertis en liste", ["convert_to_list"]);
    let decision = router.decide(&segment, Some(&hint), &context);
    assert_eq!(decision.mode, RoutingMode::ReflexOnly);
    assert!(close(decision.score, 0.5));
}

#[test]
fn test_scores_stay_in_bounds() {
    let router = AdaptiveRouter::default();
    let long = "mot ".repeat(80);
    let texts = ["", "a", "ok super", long.as_str()];
    let confidences = [None, Some(0.0), Some(0.5), Some(1.0), Some(f32::NAN), Some(7.0)];
    for text in texts {
        for confidence in confidences {
            let segment = VoiceSegment::from_text(text, confidence);
            let decision = router.decide(&segment, None, &NoteContext::default());
            assert!(
                (-2.0..=2.0).contains(&decision.score),
                "score {} out of bounds for {:?}/{:?}",
                decision.score,
                text,
                confidence
            );
        }
    }
}

#[test]
fn test_decisions_are_recorded() {
    let recorder = Arc::new(TelemetryRecorder::new());
    let router = AdaptiveRouter::default().with_observer(recorder.clone());
    let hint = EarlyIntentHint::of(IntentType::Reminder, "rappelle-moi", ["rappelle moi"]);
    let segment = VoiceSegment::from_text("rappelle-moi demain de courir", Some(0.9));

    router.decide(&segment, Some(&hint), &NoteContext::default());
    router.decide(&segment, None, &NoteContext::default());

    let stats = recorder.snapshot().mode_stats;
    assert_eq!(stats.forced, 1);
    assert_eq!(stats.reflex_then_refine, 2);
}

#[test]
fn test_config_partial_override() {
    let config = VoiceHeuristicsConfig::from_json_str(r#"{"reflex_only_threshold": 0.7, "min_chars": 3}"#)
        .expect("valid config");
    assert!(close(config.reflex_only_threshold, 0.7));
    assert_eq!(config.min_chars, 3);
    assert_eq!(config.max_chars, VoiceHeuristicsConfig::default().max_chars);

    let router = AdaptiveRouter::new(config);
    let segment = VoiceSegment::from_text("il fait beau ce matin", Some(0.9));
    assert_eq!(
        router.decide(&segment, None, &NoteContext::default()).mode,
        RoutingMode::ReflexOnly
    );
}

#[test]
fn test_config_errors() {
    let err = VoiceHeuristicsConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{:?}", err);

    let err = VoiceHeuristicsConfig::from_json_file("/nonexistent/voice.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)), "{:?}", err);
}

#[test]
fn test_disabled_fallback() {
    let decision = Decision::disabled_fallback(RoutingMode::ReflexOnly);
    assert_eq!(decision.primary_reason, "feature_disabled");
    assert!(decision.contributions.is_empty());
}

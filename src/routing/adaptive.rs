use std::sync::Arc;

use tracing::debug;

use super::config::VoiceHeuristicsConfig;
use super::types::{
    Decision, EarlyIntentHint, IntentType, NoteContext, RoutingMode, ScoreContribution, VoiceSegment,
};
use crate::telemetry::{NoopObserver, TelemetryEvent, TelemetryObserver};

/// Pure function: the mode an intent imposes regardless of score.
pub fn forced_mode(intent: IntentType) -> Option<RoutingMode> {
    match intent {
        IntentType::ListConvert | IntentType::ListCommand => Some(RoutingMode::ReflexOnly),
        IntentType::Reminder | IntentType::TitleRename => Some(RoutingMode::ReflexThenRefine),
        IntentType::Destructive => Some(RoutingMode::RefineOnly),
        IntentType::ReminderIncomplete | IntentType::NoteAppend | IntentType::None => None,
    }
}

/// Chooses between the reflex and refine transcription paths.
#[derive(Clone)]
pub struct AdaptiveRouter {
    config: VoiceHeuristicsConfig,
    observer: Arc<dyn TelemetryObserver>,
}

impl Default for AdaptiveRouter {
    fn default() -> Self {
        Self::new(VoiceHeuristicsConfig::default())
    }
}

impl AdaptiveRouter {
    pub fn new(config: VoiceHeuristicsConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn TelemetryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &VoiceHeuristicsConfig {
        &self.config
    }

    /// Never fails. Missing confidence or hint contribute nothing.
    pub fn decide(
        &self,
        segment: &VoiceSegment,
        hint: Option<&EarlyIntentHint>,
        context: &NoteContext,
    ) -> Decision {
        let fallback;
        let hint = match hint {
            Some(h) => h,
            None => {
                fallback = EarlyIntentHint::none(&segment.text);
                &fallback
            }
        };
        self.log_input(segment, hint, context);

        if let Some(mode) = forced_mode(hint.intent) {
            let score = self.clamp_score(mode.score_override());
            debug!(?mode, intent = hint.intent.as_str(), "forced decision");
            let decision = Decision {
                mode,
                score,
                contributions: vec![ScoreContribution {
                    name: "forced".to_string(),
                    value: score,
                }],
                primary_reason: format!("forced:{}", hint.intent.as_str()),
            };
            self.emit(&decision, hint.intent, true);
            return decision;
        }

        let contributions = self.contributions(segment, hint, context);
        let raw: f32 = contributions.iter().map(|c| c.value).sum();
        let score = self.clamp_score(raw);
        let mode = if score >= self.config.reflex_only_threshold {
            RoutingMode::ReflexOnly
        } else if score >= self.config.reflex_then_refine_threshold {
            RoutingMode::ReflexThenRefine
        } else {
            RoutingMode::RefineOnly
        };

        let primary_reason = contributions
            .iter()
            .max_by(|a, b| a.value.abs().total_cmp(&b.value.abs()))
            .map(|c| format!("{}={:.2}", c.name, c.value))
            .unwrap_or_else(|| "n/a".to_string());

        for c in &contributions {
            debug!("score += {:.2} from {}", c.value, c.name);
        }
        debug!(?mode, score = %format!("{score:.2}"), reason = %primary_reason, "decision");

        let decision = Decision {
            mode,
            score,
            contributions,
            primary_reason,
        };
        self.emit(&decision, hint.intent, false);
        decision
    }

    /// Tolerates a floor above the ceiling in a hand-edited config.
    fn clamp_score(&self, value: f32) -> f32 {
        value
            .max(self.config.score_floor)
            .min(self.config.score_ceiling)
    }

    fn contributions(
        &self,
        segment: &VoiceSegment,
        hint: &EarlyIntentHint,
        context: &NoteContext,
    ) -> Vec<ScoreContribution> {
        let cfg = &self.config;
        let mut out = Vec::new();
        let mut push = |name: String, value: f32| out.push(ScoreContribution { name, value });

        if let Some(confidence) = segment.confidence {
            let c = if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) };
            let value = if c >= cfg.confidence_high {
                cfg.weight_confidence_high
            } else if c >= cfg.confidence_mid {
                cfg.weight_confidence_mid
            } else if c >= cfg.confidence_low {
                cfg.weight_confidence_low
            } else {
                cfg.weight_confidence_very_low
            };
            push(format!("confidence({c:.2})"), value);
        }

        let chars = segment.char_length;
        let value = if chars < cfg.min_chars {
            cfg.weight_too_short
        } else if chars > cfg.max_chars {
            cfg.weight_too_long
        } else {
            cfg.weight_length_sweet_spot
        };
        push(format!("charLen({chars})"), value);

        let tokens = segment.token_count;
        let value = if tokens < cfg.min_tokens {
            cfg.weight_too_few_tokens
        } else if tokens > cfg.max_tokens {
            cfg.weight_too_many_tokens
        } else {
            cfg.weight_token_sweet_spot
        };
        push(format!("tokens({tokens})"), value);

        if !hint.triggers.is_empty() {
            push(
                "triggers".to_string(),
                hint.triggers.len() as f32 * cfg.weight_trigger_bonus,
            );
        }

        let intent_weight = match hint.intent {
            IntentType::None => 0.0,
            IntentType::NoteAppend => cfg.weight_plain_note,
            IntentType::ListCommand | IntentType::ListConvert => cfg.weight_list_intent,
            IntentType::Reminder => cfg.weight_reminder,
            IntentType::ReminderIncomplete => cfg.weight_reminder_incomplete,
            IntentType::Destructive => cfg.weight_destructive,
            IntentType::TitleRename => cfg.weight_rename,
        };
        if intent_weight != 0.0 {
            push(format!("intent({})", hint.intent.as_str()), intent_weight);
        }

        if context.is_list_mode && hint.prefers_list_reflex() {
            push("listContext".to_string(), cfg.weight_list_context_bonus);
        }
        if context.pending_jobs >= cfg.latency_queue_threshold {
            push(
                format!("latencyQueue({})", context.pending_jobs),
                cfg.weight_latency_pressure,
            );
        }
        if let Some(duration) = context.segment_duration_ms {
            if duration >= cfg.latency_duration_threshold_ms {
                push(format!("segmentDuration({duration})"), cfg.weight_long_duration);
            }
        }
        out
    }

    fn log_input(&self, segment: &VoiceSegment, hint: &EarlyIntentHint, context: &NoteContext) {
        let preview: String = segment
            .text
            .chars()
            .take(self.config.log_text_preview)
            .collect();
        debug!(
            text = %preview.replace('"', "\\\""),
            conf = %segment.confidence.map_or("-".to_string(), |c| format!("{c:.2}")),
            chars = segment.char_length,
            tokens = segment.token_count,
            duration = context.segment_duration_ms.map_or(-1, |d| d as i64),
            queue = context.pending_jobs,
            intent = hint.intent.as_str(),
            "adaptive input"
        );
    }

    fn emit(&self, decision: &Decision, intent: IntentType, forced: bool) {
        self.observer.on_event(TelemetryEvent::AdaptiveDecision {
            mode: decision.mode,
            intent,
            forced,
        });
    }
}

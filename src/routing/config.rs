use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds and weights of the adaptive router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceHeuristicsConfig {
    pub confidence_low: f32,
    pub confidence_mid: f32,
    pub confidence_high: f32,
    pub min_chars: usize,
    pub max_chars: usize,
    pub min_tokens: usize,
    pub max_tokens: usize,
    pub weight_confidence_very_low: f32,
    pub weight_confidence_low: f32,
    pub weight_confidence_mid: f32,
    pub weight_confidence_high: f32,
    pub weight_too_short: f32,
    pub weight_too_long: f32,
    pub weight_length_sweet_spot: f32,
    pub weight_too_few_tokens: f32,
    pub weight_too_many_tokens: f32,
    pub weight_token_sweet_spot: f32,
    pub weight_trigger_bonus: f32,
    pub weight_list_intent: f32,
    pub weight_reminder: f32,
    pub weight_reminder_incomplete: f32,
    pub weight_destructive: f32,
    pub weight_rename: f32,
    pub weight_plain_note: f32,
    pub weight_list_context_bonus: f32,
    pub latency_queue_threshold: u32,
    pub weight_latency_pressure: f32,
    pub latency_duration_threshold_ms: u64,
    pub weight_long_duration: f32,
    pub reflex_only_threshold: f32,
    pub reflex_then_refine_threshold: f32,
    pub score_floor: f32,
    pub score_ceiling: f32,
    pub log_text_preview: usize,
}

impl Default for VoiceHeuristicsConfig {
    fn default() -> Self {
        Self {
            confidence_low: 0.45,
            confidence_mid: 0.65,
            confidence_high: 0.85,
            min_chars: 6,
            max_chars: 180,
            min_tokens: 1,
            max_tokens: 45,
            weight_confidence_very_low: -0.6,
            weight_confidence_low: -0.2,
            weight_confidence_mid: 0.25,
            weight_confidence_high: 0.5,
            weight_too_short: -0.2,
            weight_too_long: -0.25,
            weight_length_sweet_spot: 0.15,
            weight_too_few_tokens: -0.2,
            weight_too_many_tokens: -0.2,
            weight_token_sweet_spot: 0.1,
            weight_trigger_bonus: 0.08,
            weight_list_intent: 0.35,
            weight_reminder: 0.25,
            weight_reminder_incomplete: -0.15,
            weight_destructive: -0.6,
            weight_rename: 0.2,
            weight_plain_note: 0.05,
            weight_list_context_bonus: 0.2,
            latency_queue_threshold: 3,
            weight_latency_pressure: 0.25,
            latency_duration_threshold_ms: 17_000,
            weight_long_duration: 0.2,
            reflex_only_threshold: 1.1,
            reflex_then_refine_threshold: 0.2,
            score_floor: -2.0,
            score_ceiling: 2.0,
            log_text_preview: 80,
        }
    }
}

impl VoiceHeuristicsConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// When false every utterance is routed as a plain note.
    pub voice_commands_enabled: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            voice_commands_enabled: true,
        }
    }
}

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::config::RouterConfig;
use super::types::{EarlyDecision, RouteDecision};
use crate::list::types::ListParse;
use crate::list::ListCommandParser;
use crate::reminder::{ReminderClassifier, ReminderIntent, ReminderIntentParser};
use crate::telemetry::{NoopObserver, TelemetryEvent, TelemetryObserver};

/// Routes a final transcript to a note, a list command or a reminder.
///
/// Order of precedence:
/// 1. feature flag off or blank text: note
/// 2. list grammar: list command, or list incomplete
/// 3. no reminder trigger: note
/// 4. time reminder, then place reminder
/// 5. trigger without time or place: incomplete
#[derive(Clone)]
pub struct VoiceCommandRouter {
    config: RouterConfig,
    list_parser: ListCommandParser,
    classifier: ReminderClassifier,
    reminders: ReminderIntentParser,
    observer: Arc<dyn TelemetryObserver>,
}

impl Default for VoiceCommandRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default(), ReminderIntentParser::default())
    }
}

impl VoiceCommandRouter {
    pub fn new(config: RouterConfig, reminders: ReminderIntentParser) -> Self {
        Self {
            config,
            list_parser: ListCommandParser::default(),
            classifier: ReminderClassifier::new(),
            reminders,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_list_parser(mut self, list_parser: ListCommandParser) -> Self {
        self.list_parser = list_parser;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn TelemetryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> RouterConfig {
        self.config
    }

    pub fn route(&self, text: &str, assume_list_context: bool) -> RouteDecision {
        self.route_at(text, assume_list_context, Utc::now().timestamp_millis())
    }

    /// Same as [`route`](Self::route) with an explicit reference instant.
    pub fn route_at(&self, text: &str, assume_list_context: bool, now_millis: i64) -> RouteDecision {
        let trimmed = text.trim();
        let (decision, reason) = self.decide(trimmed, assume_list_context, now_millis);

        info!(decision = %decision.log_token(), reason = reason.unwrap_or("-"), "route");
        debug!(text = %trimmed.replace('"', "\\\""), "route input");
        self.observer.on_event(TelemetryEvent::RouteDecision {
            kind: decision.kind(),
        });
        decision
    }

    fn decide(
        &self,
        trimmed: &str,
        assume_list_context: bool,
        now_millis: i64,
    ) -> (RouteDecision, Option<&'static str>) {
        if !self.config.voice_commands_enabled {
            return (RouteDecision::Note, Some("feature_disabled"));
        }
        if trimmed.is_empty() {
            return (RouteDecision::Note, None);
        }

        match self.list_parser.parse(trimmed, assume_list_context) {
            Some(ListParse::Command(cmd)) => return (RouteDecision::List(cmd), None),
            Some(ListParse::Incomplete(action)) => {
                return (RouteDecision::ListIncomplete(action), Some("list_parser"))
            }
            None => {}
        }

        if !self.classifier.has_trigger(trimmed) {
            return (RouteDecision::Note, None);
        }

        match self.reminders.parse(trimmed, now_millis) {
            Some(ReminderIntent::Time(t)) => (RouteDecision::ReminderTime(t), None),
            Some(ReminderIntent::Place(p)) => (RouteDecision::ReminderPlace(p), None),
            None => (RouteDecision::Incomplete, Some("missing_place_or_time")),
        }
    }

    pub fn route_early(&self, partial: &str, assume_list_context: bool) -> EarlyDecision {
        self.route_early_at(partial, assume_list_context, Utc::now().timestamp_millis())
    }

    /// Interpretation of a partial transcript. List incompletes are not
    /// reported here since more words may still come.
    pub fn route_early_at(
        &self,
        partial: &str,
        assume_list_context: bool,
        now_millis: i64,
    ) -> EarlyDecision {
        let trimmed = partial.trim();
        if !self.config.voice_commands_enabled || trimmed.is_empty() {
            return EarlyDecision::None;
        }

        if let Some(ListParse::Command(cmd)) = self.list_parser.parse(trimmed, assume_list_context) {
            return EarlyDecision::ListCommand(cmd);
        }

        if !self.classifier.has_trigger(trimmed) {
            return EarlyDecision::None;
        }

        let early = match self.reminders.parse(trimmed, now_millis) {
            Some(ReminderIntent::Time(t)) => EarlyDecision::ReminderTime(t),
            Some(ReminderIntent::Place(p)) => EarlyDecision::ReminderPlace(p),
            None => EarlyDecision::ReminderIncomplete,
        };
        debug!(decision = %early.log_token(), "early route");
        early
    }
}

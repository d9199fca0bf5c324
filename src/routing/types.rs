use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::list::types::{ListAction, ListCommand};
use crate::reminder::types::{PlaceReminder, TimeReminder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteKind {
    Note,
    ReminderTime,
    ReminderPlace,
    Incomplete,
    List,
    ListIncomplete,
}

/// Final interpretation of an utterance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteDecision {
    Note,
    ReminderTime(TimeReminder),
    ReminderPlace(PlaceReminder),
    /// A reminder trigger without a usable time or place.
    Incomplete,
    List(ListCommand),
    ListIncomplete(ListAction),
}

impl RouteDecision {
    pub fn kind(&self) -> RouteKind {
        match self {
            Self::Note => RouteKind::Note,
            Self::ReminderTime(_) => RouteKind::ReminderTime,
            Self::ReminderPlace(_) => RouteKind::ReminderPlace,
            Self::Incomplete => RouteKind::Incomplete,
            Self::List(_) => RouteKind::List,
            Self::ListIncomplete(_) => RouteKind::ListIncomplete,
        }
    }

    pub fn log_token(&self) -> String {
        match self {
            Self::Note => "NOTE".to_string(),
            Self::ReminderTime(_) => "REMINDER_TIME".to_string(),
            Self::ReminderPlace(_) => "REMINDER_PLACE".to_string(),
            Self::Incomplete => "INCOMPLETE".to_string(),
            Self::List(cmd) => format!("LIST_{}", cmd.action.as_str()),
            Self::ListIncomplete(_) => "LIST_INCOMPLETE".to_string(),
        }
    }
}

/// Decision on a partial transcript, before the final text is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EarlyDecision {
    None,
    ListCommand(ListCommand),
    ReminderTime(TimeReminder),
    ReminderPlace(PlaceReminder),
    ReminderIncomplete,
}

impl EarlyDecision {
    pub fn log_token(&self) -> String {
        match self {
            Self::None => "NONE".to_string(),
            Self::ListCommand(cmd) => format!("LIST_{}", cmd.action.as_str()),
            Self::ReminderTime(_) => "REMINDER_TIME".to_string(),
            Self::ReminderPlace(_) => "REMINDER_PLACE".to_string(),
            Self::ReminderIncomplete => "REMINDER_INCOMPLETE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingMode {
    ReflexOnly,
    ReflexThenRefine,
    RefineOnly,
}

impl RoutingMode {
    /// Score reported when the mode is forced by the intent type.
    pub fn score_override(self) -> f32 {
        match self {
            Self::ReflexOnly => 1.0,
            Self::ReflexThenRefine => 0.5,
            Self::RefineOnly => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentType {
    None,
    NoteAppend,
    ListCommand,
    ListConvert,
    Reminder,
    ReminderIncomplete,
    Destructive,
    TitleRename,
}

impl IntentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::NoteAppend => "NOTE_APPEND",
            Self::ListCommand => "LIST_COMMAND",
            Self::ListConvert => "LIST_CONVERT",
            Self::Reminder => "REMINDER",
            Self::ReminderIncomplete => "REMINDER_INCOMPLETE",
            Self::Destructive => "DESTRUCTIVE",
            Self::TitleRename => "TITLE_RENAME",
        }
    }
}

/// A recognized speech segment as handed over by the recognizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSegment {
    pub text: String,
    pub confidence: Option<f32>,
    pub char_length: usize,
    pub token_count: usize,
}

impl VoiceSegment {
    pub fn from_text(text: &str, confidence: Option<f32>) -> Self {
        let trimmed = text.trim();
        Self {
            text: trimmed.to_string(),
            confidence,
            char_length: trimmed.chars().count(),
            token_count: trimmed.split_whitespace().count(),
        }
    }
}

/// Early guess at what the user is doing, with the phrases that support it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarlyIntentHint {
    pub intent: IntentType,
    pub triggers: BTreeSet<String>,
    pub raw_text: String,
}

impl EarlyIntentHint {
    pub fn none(raw_text: &str) -> Self {
        Self {
            intent: IntentType::None,
            triggers: BTreeSet::new(),
            raw_text: raw_text.to_string(),
        }
    }

    /// Builds a hint, keeping only the triggers known for `intent`.
    pub fn of<I, S>(intent: IntentType, raw_text: &str, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let known = super::hint::known_triggers(intent);
        let triggers = triggers
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| known.contains(&t.as_str()))
            .collect();
        Self {
            intent,
            triggers,
            raw_text: raw_text.to_string(),
        }
    }

    pub fn prefers_list_reflex(&self) -> bool {
        matches!(self.intent, IntentType::ListCommand | IntentType::ListConvert)
    }
}

/// State of the note the segment is dictated into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContext {
    pub is_list_mode: bool,
    pub pending_jobs: u32,
    pub segment_duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreContribution {
    pub name: String,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub mode: RoutingMode,
    pub score: f32,
    pub contributions: Vec<ScoreContribution>,
    pub primary_reason: String,
}

impl Decision {
    /// Decision used when voice commands are switched off.
    pub fn disabled_fallback(mode: RoutingMode) -> Self {
        Self {
            mode,
            score: 0.0,
            contributions: Vec::new(),
            primary_reason: "feature_disabled".to_string(),
        }
    }
}

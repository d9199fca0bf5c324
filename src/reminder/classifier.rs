use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::normalize_for_key;

/// Phrases that mention remembering without asking for a reminder.
const NEGATIVE_PHRASES: &[&str] = &[
    "je me rappelle",
    "je me rappele",
    "tu te rappelles",
    "ca me rappelle",
    "je m'en souviens",
    "je pense a",
];

pub const TRIGGER_PHRASES: &[&str] = &[
    "rappelle moi",
    "rappele moi",
    "rappelle nous",
    "fais moi penser",
    "pense a",
    "pense au",
    "pense aux",
    "peux tu me rappeler",
    "mets un rappel",
    "met un rappel",
    "alerte moi",
    "n'oublie pas de",
];

/// Time and location cues, matched on normalized text.
static CUES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(?:demain|apres demain|ce soir|ce matin|cet apres midi|ce week end|ce weekend|la semaine prochaine|midi|minuit)\b",
        r"\bdans (?:\d+|un|une|deux|trois|quatre|cinq|dix|quinze|vingt|trente) ",
        r"\bdans (?:un |une )?(?:quart|demi)\b",
        r"\b(?:lundi|mardi|mercredi|jeudi|vendredi|samedi|dimanche)\b",
        r"\b\d{1,2} ?h(?:\d{2})?\b",
        r"\b\d{1,2} \d{2}\b",
        r"\ble \d{1,2}\b",
        r"\b(?:quand|lorsque|des que) (?:je|j'|nous) ",
        r"\ben (?:arrivant|rentrant|partant|quittant|sortant)\b",
        r"\b(?:a|au|aux|chez) (?:la maison|maison|bureau|travail|magasin|ecole|ici)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderClassification {
    NotReminder,
    /// Trigger present but the message or its time/place cue is missing.
    Incomplete,
    Reminder,
}

/// Cheap trigger detector run before the time and place grammars.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReminderClassifier;

impl ReminderClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn has_trigger(&self, text: &str) -> bool {
        !self.matched_triggers(text).is_empty()
    }

    /// Triggers found in `text`, empty when a negative phrase is present.
    pub fn matched_triggers(&self, text: &str) -> Vec<&'static str> {
        let padded = format!(" {} ", normalize_for_key(text));
        if padded.trim().is_empty() {
            return Vec::new();
        }
        if NEGATIVE_PHRASES
            .iter()
            .any(|p| padded.contains(&format!(" {p} ")))
        {
            return Vec::new();
        }
        TRIGGER_PHRASES
            .iter()
            .copied()
            .filter(|p| padded.contains(&format!(" {p} ")))
            .collect()
    }

    /// Pure function: a reminder needs a trigger, at least two message words
    /// and a time or location cue.
    pub fn classify(&self, text: &str) -> ReminderClassification {
        let triggers = self.matched_triggers(text);
        if triggers.is_empty() {
            return ReminderClassification::NotReminder;
        }
        let normalized = normalize_for_key(text);
        let mut message = format!(" {normalized} ");
        for trigger in &triggers {
            message = message.replace(&format!(" {trigger} "), " ");
        }
        let has_message = message.split_whitespace().count() >= 2;
        let has_cue = CUES.iter().any(|re| re.is_match(&normalized));
        if has_message && has_cue {
            ReminderClassification::Reminder
        } else {
            ReminderClassification::Incomplete
        }
    }
}

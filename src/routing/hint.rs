use chrono::Utc;
use tracing::debug;

use super::router::VoiceCommandRouter;
use super::types::{EarlyDecision, EarlyIntentHint, IntentType};
use crate::lexicon::normalize_for_key;
use crate::list::types::ListAction;
use crate::reminder::classifier::TRIGGER_PHRASES;
use crate::reminder::ReminderClassifier;

/// Phrases that would throw away content. Normalized form.
pub const DESTRUCTIVE_PHRASES: &[&str] = &[
    "supprime la note",
    "supprimer la note",
    "supprime cette note",
    "efface la note",
    "efface cette note",
    "efface tout",
    "supprime tout",
    "vide la liste",
    "vide la note",
    "jette la note",
];

pub const RENAME_PHRASES: &[&str] = &[
    "renomme",
    "renommer",
    "change le titre",
    "changer le titre",
    "modifie le titre",
    "appelle cette note",
    "intitule",
];

const LIST_COMMAND_TRIGGERS: &[&str] = &["add", "remove", "toggle", "untick"];
const LIST_CONVERT_TRIGGERS: &[&str] = &["convert_to_list", "convert_to_text"];

/// Triggers that may back a hint of the given intent.
pub fn known_triggers(intent: IntentType) -> &'static [&'static str] {
    match intent {
        IntentType::Reminder | IntentType::ReminderIncomplete => TRIGGER_PHRASES,
        IntentType::Destructive => DESTRUCTIVE_PHRASES,
        IntentType::TitleRename => RENAME_PHRASES,
        IntentType::ListCommand => LIST_COMMAND_TRIGGERS,
        IntentType::ListConvert => LIST_CONVERT_TRIGGERS,
        IntentType::None | IntentType::NoteAppend => &[],
    }
}

/// Derives an [`EarlyIntentHint`] from a partial transcript.
#[derive(Clone, Default)]
pub struct HintDetector {
    router: VoiceCommandRouter,
    classifier: ReminderClassifier,
}

impl HintDetector {
    pub fn new(router: VoiceCommandRouter) -> Self {
        Self {
            router,
            classifier: ReminderClassifier::new(),
        }
    }

    pub fn detect(&self, text: &str, assume_list_context: bool) -> EarlyIntentHint {
        self.detect_at(text, assume_list_context, Utc::now().timestamp_millis())
    }

    pub fn detect_at(&self, text: &str, assume_list_context: bool, now_millis: i64) -> EarlyIntentHint {
        let raw = text.trim();
        if raw.is_empty() {
            return EarlyIntentHint::none(raw);
        }
        let padded = format!(" {} ", normalize_for_key(raw));
        let found = |phrases: &[&'static str]| -> Vec<&'static str> {
            phrases
                .iter()
                .copied()
                .filter(|p| padded.contains(&format!(" {p} ")))
                .collect()
        };

        let destructive = found(DESTRUCTIVE_PHRASES);
        if !destructive.is_empty() {
            return EarlyIntentHint::of(IntentType::Destructive, raw, destructive);
        }
        let rename = found(RENAME_PHRASES);
        if !rename.is_empty() {
            return EarlyIntentHint::of(IntentType::TitleRename, raw, rename);
        }

        let hint = match self.router.route_early_at(raw, assume_list_context, now_millis) {
            EarlyDecision::ListCommand(cmd) => {
                let intent = match cmd.action {
                    ListAction::ConvertToList | ListAction::ConvertToText => IntentType::ListConvert,
                    _ => IntentType::ListCommand,
                };
                EarlyIntentHint::of(intent, raw, [cmd.action.as_str()])
            }
            EarlyDecision::ReminderTime(_) | EarlyDecision::ReminderPlace(_) => {
                EarlyIntentHint::of(IntentType::Reminder, raw, self.classifier.matched_triggers(raw))
            }
            EarlyDecision::ReminderIncomplete => EarlyIntentHint::of(
                IntentType::ReminderIncomplete,
                raw,
                self.classifier.matched_triggers(raw),
            ),
            EarlyDecision::None => EarlyIntentHint::of(IntentType::NoteAppend, raw, Vec::<&str>::new()),
        };
        debug!(intent = hint.intent.as_str(), triggers = hint.triggers.len(), "early hint");
        hint
    }
}

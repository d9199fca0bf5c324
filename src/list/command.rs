use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::splitter::ListSplitter;
use super::types::{ListAction, ListCommand, ListParse};
use crate::lexicon::fold_diacritics;

// Conjugation endings for -er, -ir and mettre verbs.
const ER_END: &str = "(?:e|es|ons|ez|ent|er|erai|eras|era|erons|erez|eront|ais|ait|ions|iez|aient|ant)";
const IR_END: &str = "(?:is|it|issons|issez|issent|ir|irai|iras|ira|irons|irez|iront|issais|issait|issions|issiez|issaient|issant|i)";
const MET_END: &str = "(?:s|tons|tez|tent|tre|trais|trait|trons|trez|tront|tais|tait|tions|tiez|taient)?";

fn verb(stems: &str) -> Regex {
    Regex::new(&format!(r"^\s*(?:{stems})\b")).expect("valid regex")
}

static CREATE_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:creer|cree|fais|faire|ajoute|nouvelle?)\s+(?:une\s+|nouvelle\s+)?liste\b")
        .expect("valid regex")
});
static CONVERT: Lazy<Regex> = Lazy::new(|| {
    verb(&format!(
        "convert{IR_END}|transform{ER_END}|pass{ER_END}|met{MET_END}|bascul{ER_END}"
    ))
});
static ADD: Lazy<Regex> = Lazy::new(|| verb(&format!("ajout{ER_END}|rajout{ER_END}")));
static UNTICK: Lazy<Regex> = Lazy::new(|| verb(&format!("de?coch{ER_END}")));
static TOGGLE: Lazy<Regex> = Lazy::new(|| verb(&format!("coch{ER_END}")));
static REMOVE: Lazy<Regex> = Lazy::new(|| {
    verb(&format!(
        "supprim{ER_END}|retir{ER_END}|enlev{ER_END}|ot{ER_END}"
    ))
});

static TARGETS_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\ben\s+(?:du\s+)?text(?:e|es)?\b").expect("valid regex"));
static TARGETS_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\ben\s+(?:une\s+)?list(?:e|es)?\b").expect("valid regex"));
/// Whatever may follow a bare convert verb: the note itself.
static BARE_CONVERT_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:la|cette|ma)\s+(?:note|liste))?\s*$").expect("valid regex")
});
/// `plus`, `puis` and `ainsi que` between two items act as a comma. `et` is
/// left to the splitter.
static CONNECTORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+(?:plus|puis|ainsi\s+que)\s+").expect("valid regex"));

/// Recognizes checklist verbs at the start of an utterance.
#[derive(Clone, Default)]
pub struct ListCommandParser {
    splitter: ListSplitter,
}

impl ListCommandParser {
    pub fn new(splitter: ListSplitter) -> Self {
        Self { splitter }
    }

    /// `None` when no list verb is present; `Incomplete` when a mutation
    /// verb leaves no item to act on.
    pub fn parse(&self, text: &str, assume_list_context: bool) -> Option<ListParse> {
        let sanitized = text.trim();
        if sanitized.is_empty() {
            return None;
        }
        let normalized = fold_diacritics(&sanitized.to_lowercase()).replace('’', "'");

        if CREATE_LIST.is_match(&normalized) {
            debug!(text = %normalized, "list command: create list");
            return Some(convert(ListAction::ConvertToList));
        }

        if let Some(m) = CONVERT.find(&normalized) {
            let tail = normalized[m.end()..].trim();
            if TARGETS_TEXT.is_match(tail) {
                return Some(convert(ListAction::ConvertToText));
            }
            if TARGETS_LIST.is_match(tail) {
                return Some(convert(ListAction::ConvertToList));
            }
            if assume_list_context && BARE_CONVERT_TAIL.is_match(tail) {
                return Some(convert(ListAction::ConvertToText));
            }
        }

        let ordered: [(&Lazy<Regex>, ListAction); 4] = [
            (&ADD, ListAction::Add),
            (&UNTICK, ListAction::Untick),
            (&TOGGLE, ListAction::Toggle),
            (&REMOVE, ListAction::Remove),
        ];
        for (pattern, action) in ordered {
            if let Some(m) = pattern.find(&normalized) {
                return Some(self.mutation(action, &normalized[m.end()..]));
            }
        }
        None
    }

    fn mutation(&self, action: ListAction, after_verb: &str) -> ListParse {
        let joined = CONNECTORS.replace_all(after_verb.trim(), ", ");
        let items = self.splitter.split_normalized(&joined);
        if items.is_empty() {
            debug!(action = action.as_str(), "list command: incomplete");
            return ListParse::Incomplete(action);
        }
        debug!(action = action.as_str(), count = items.len(), ?items, "list command");
        ListParse::Command(ListCommand { action, items })
    }
}

fn convert(action: ListAction) -> ListParse {
    ListParse::Command(ListCommand {
        action,
        items: Vec::new(),
    })
}

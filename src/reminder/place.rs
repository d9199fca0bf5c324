use std::ops::Range;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::favorites::{FavoriteResolver, NoFavorites};
use super::label::{blank_spans, clean_label, sanitize, trigger_spans};
use super::types::{
    PlaceQuery, PlaceReminder, Transition, DEFAULT_COOLDOWN_MINUTES, DEFAULT_RADIUS_METERS,
};
use crate::lexicon::normalize_for_key;

fn regex_list(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
}

static ENTER: Lazy<Vec<Regex>> = Lazy::new(|| {
    regex_list(&[
        r"(?i)\b(?:quand|lorsque|d[èe]s\s+que)\s+(?:j'?\s*arrive|je\s+rentre|je\s+reviens|j'?\s*entre|je\s+suis|je\s+serai)\b",
        r"(?i)\ben\s+(?:arrivant|rentrant)\b",
        r"(?i)(?:\b|^)(?:à|a)\s+l'\s*arriv[ée]e\b",
    ])
});
static EXIT: Lazy<Vec<Regex>> = Lazy::new(|| {
    regex_list(&[
        r"(?i)\b(?:quand|lorsque|d[èe]s\s+que)\s+(?:je\s+pars|je\s+quitte|je\s+sors|je\s+m'en\s+vais)\b",
        r"(?i)\bau\s+d[ée]part\b",
        r"(?i)(?:\b|^)(?:à|a)\s+mon\s+d[ée]part\b",
        r"(?i)\ben\s+(?:partant|quittant|sortant)\b",
    ])
});

static RADIUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bdans\s+un\s+rayon\s+de\s*(?P<n>\d+)\s*(?P<unit>km|kilom[èe]tres?|m[èe]tres?|m)\b",
    )
    .expect("valid regex")
});
static COOLDOWN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:d[ée]lai(?:\s+de)?|attends?|attendre)\s*(?P<n>\d+)\s*min(?:ute)?s?\b")
        .expect("valid regex")
});
static COOLDOWN_ALT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bpas\s+plus\s+d'\s*une\s+fois\s+toutes\s+les\s*(?P<n>\d+)\s*min(?:ute)?s?\b")
        .expect("valid regex")
});
static EVERY_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:(?:\b|^)(?:à|a)\s*chaque\s+fois\b|\btoujours\b)").expect("valid regex")
});

static CURRENT_LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:\bd'\s*ici\b|\bici(?:\s+m[êe]me)?\b|\bma\s+(?:position|localisation)(?:\s+actuelle)?\b|\b(?:position|localisation)\s+actuelle\b|\b(?:l[àa]\s+)?o[ùu]\s+je\s+suis\b|\bsur\s+place\b)",
    )
    .expect("valid regex")
});
/// Locatives accepted before the transition. Bare `a` is left out there
/// since it is usually the verb.
static LEFT_LOCATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b|^)(?:à|au|aux|chez|pr[èe]s\s+de|vers|devant)\s+\S").expect("valid regex")
});
static CLAUSE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,.;!?]").expect("valid regex"));
static LEADING_PREPOSITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:pr[èe]s\s+de|à|a|au|aux|de|du|des|vers|devant)\s+|d'\s*)")
        .expect("valid regex")
});
static LEADING_ARTICLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:(?:le|la|les|un|une|chez)\s+|l')").expect("valid regex"));
/// Where a trailing action starts inside the place clause.
static ACTION_CONNECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+(?:de\s+|d'|pour\s+)").expect("valid regex"));
static LABEL_CONNECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:d'|de\s+|à\s+)").expect("valid regex"));

#[derive(Debug, Clone, Copy, Default)]
struct Options {
    radius_meters: Option<u32>,
    cooldown_minutes: Option<u32>,
    every_time: bool,
}

/// Parses geofence reminders such as `rappelle-moi d'acheter du pain quand
/// j'arrive ici`.
#[derive(Clone)]
pub struct PlaceParser {
    resolver: Arc<dyn FavoriteResolver>,
}

impl Default for PlaceParser {
    fn default() -> Self {
        Self::new(Arc::new(NoFavorites))
    }
}

impl PlaceParser {
    pub fn new(resolver: Arc<dyn FavoriteResolver>) -> Self {
        Self { resolver }
    }

    /// `None` without a transition phrase, a place or a label.
    pub fn parse(&self, text: &str) -> Option<PlaceReminder> {
        if text.trim().is_empty() {
            return None;
        }
        let text = sanitize(text);
        let (transition, transition_span) = find_transition(&text)?;

        let (options, option_spans) = extract_options(&text);
        let triggers = trigger_spans(&text);

        let mut masked_spans = option_spans.clone();
        masked_spans.extend(triggers.iter().cloned());
        let masked = blank_spans(&text, &masked_spans);

        let mut removed = masked_spans;
        removed.push(transition_span.clone());

        let mut place_span = right_clause(&masked, &triggers, transition_span.end)
            .or_else(|| left_locative(&masked, transition_span.start))?;

        let label_of = |place: &Range<usize>| {
            let mut spans = removed.clone();
            spans.push(place.clone());
            let residue = blank_spans(&text, &spans);
            clean_label(&LABEL_CONNECTOR.replace(residue.trim(), ""))
        };

        let label = match label_of(&place_span) {
            Some(label) => label,
            None => {
                // the action may trail the place: "à la maison de sortir le chien"
                let region = &masked[place_span.clone()];
                let cut = ACTION_CONNECTOR.find(region)?;
                place_span = place_span.start..place_span.start + cut.start();
                label_of(&place_span)?
            }
        };

        let region = masked[place_span].trim();
        let spoken = LEADING_PREPOSITION.replace(region, "").trim().to_string();
        if spoken.is_empty() {
            return None;
        }

        let reminder = self.resolve(transition, &spoken, options, label);
        debug!(
            ?transition,
            spoken = %spoken,
            query = ?reminder.query,
            radius = reminder.radius_meters,
            cooldown = reminder.cooldown_minutes,
            every_time = reminder.every_time,
            "place parse"
        );
        Some(reminder)
    }

    fn resolve(&self, transition: Transition, spoken: &str, options: Options, label: String) -> PlaceReminder {
        let radius = options.radius_meters;
        let cooldown = options.cooldown_minutes;

        if CURRENT_LOCATION.is_match(spoken) {
            return PlaceReminder {
                transition,
                query: PlaceQuery::CurrentLocation,
                radius_meters: radius.unwrap_or(DEFAULT_RADIUS_METERS),
                cooldown_minutes: cooldown.unwrap_or(DEFAULT_COOLDOWN_MINUTES),
                every_time: options.every_time,
                label,
            };
        }

        let cleaned = cleaned_phrase(spoken);
        let favorite = (!cleaned.is_empty())
            .then(|| self.resolver.resolve(&cleaned))
            .flatten()
            .or_else(|| self.resolver.resolve(&spoken.to_lowercase()));
        debug!(cleaned = %cleaned, matched = favorite.is_some(), "favorite lookup");

        match favorite {
            Some(fav) => PlaceReminder {
                transition,
                query: PlaceQuery::Favorite {
                    id: fav.id,
                    lat: fav.lat,
                    lon: fav.lon,
                    spoken_form: spoken.to_string(),
                },
                radius_meters: radius.unwrap_or(fav.default_radius_meters),
                cooldown_minutes: cooldown.unwrap_or(fav.default_cooldown_minutes),
                every_time: options.every_time || fav.default_every_time,
                label,
            },
            None => PlaceReminder {
                transition,
                query: PlaceQuery::FreeText {
                    text: spoken.to_string(),
                },
                radius_meters: radius.unwrap_or(DEFAULT_RADIUS_METERS),
                cooldown_minutes: cooldown.unwrap_or(DEFAULT_COOLDOWN_MINUTES),
                every_time: options.every_time,
                label,
            },
        }
    }
}

/// Earliest ENTER or EXIT phrase.
fn find_transition(text: &str) -> Option<(Transition, Range<usize>)> {
    let enter = ENTER.iter().map(|re| (Transition::Enter, re));
    let exit = EXIT.iter().map(|re| (Transition::Exit, re));
    enter
        .chain(exit)
        .filter_map(|(t, re)| re.find(text).map(|m| (t, m.range())))
        .min_by_key(|(_, r)| r.start)
}

fn extract_options(text: &str) -> (Options, Vec<Range<usize>>) {
    let mut options = Options::default();
    let mut spans = Vec::new();

    if let Some(caps) = RADIUS.captures(text) {
        let n: Option<u32> = caps["n"].parse().ok();
        let unit = caps["unit"].to_lowercase();
        let factor = if unit.starts_with('k') { 1000 } else { 1 };
        options.radius_meters = n.map(|n| n.saturating_mul(factor));
        spans.extend(caps.get(0).map(|m| m.range()));
    }
    if let Some(caps) = COOLDOWN.captures(text) {
        options.cooldown_minutes = caps["n"].parse().ok();
        spans.extend(caps.get(0).map(|m| m.range()));
    }
    if let Some(caps) = COOLDOWN_ALT.captures(text) {
        options.cooldown_minutes = caps["n"].parse().ok().or(options.cooldown_minutes);
        spans.extend(caps.get(0).map(|m| m.range()));
    }
    for m in EVERY_TIME.find_iter(text) {
        options.every_time = true;
        spans.push(m.range());
    }
    (options, spans)
}

/// Clause after the transition, cut at punctuation or at the next trigger.
fn right_clause(masked: &str, triggers: &[Range<usize>], from: usize) -> Option<Range<usize>> {
    let rest = masked.get(from..)?;
    let mut end = CLAUSE_END
        .find(rest)
        .map_or(masked.len(), |m| from + m.start());
    if let Some(t) = triggers.iter().filter(|t| t.start >= from).map(|t| t.start).min() {
        end = end.min(t);
    }
    let clause = &masked[from..end];
    let lead = clause.len() - clause.trim_start().len();
    let trail = clause.len() - clause.trim_end().len();
    let span = from + lead..end - trail;
    (!span.is_empty()).then_some(span)
}

/// Last locative phrase before the transition.
fn left_locative(masked: &str, until: usize) -> Option<Range<usize>> {
    let left = masked.get(..until)?;
    let start = LEFT_LOCATIVE.find_iter(left).last()?.start();
    let region = left[start..].trim_end();
    let region = region.trim_end_matches([',', ';', '.']);
    let lead = left[start..].len() - left[start..].trim_start().len();
    let span = start + lead..start + region.len();
    (!span.is_empty()).then_some(span)
}

/// Normalized phrase without leading articles or `chez`.
fn cleaned_phrase(spoken: &str) -> String {
    let mut phrase = normalize_for_key(spoken);
    loop {
        let stripped = LEADING_ARTICLE.replace(&phrase, "").trim().to_string();
        if stripped == phrase {
            return phrase;
        }
        phrase = stripped;
    }
}

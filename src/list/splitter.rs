use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::lexicon::{fold_diacritics, normalize, Classification, FrenchLexicon};

static DESTINATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:dans|sur|pour|a|à)\s+(?:la|ma)\s+(?:nouvelle\s+)?liste(?:\s+de\s+courses)?\b")
        .expect("valid regex")
});
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;\n]").expect("valid regex"));
static ET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+et\s+").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
/// Article or numeric quantifier opening a new item inside one segment.
static ITEM_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:de\s+l['’]|de\s+la|des|les|du|l['’]|la|le|\d+)\b").expect("valid regex")
});

const TRIM_CHARS: &[char] = &[' ', ',', ';', '.', '\'', '"'];

/// Splits free text into checklist items.
///
/// Segments are cut on separators, then on `et` when the segment holds two
/// nouns or two determiner-led parts, then on repeated articles. Fragments
/// without a noun are merged into the following one.
#[derive(Clone)]
pub struct ListSplitter {
    lexicon: Arc<dyn Classification>,
}

impl ListSplitter {
    pub fn new(lexicon: Arc<dyn Classification>) -> Self {
        Self { lexicon }
    }

    /// Normalized flow first, raw flow when it yields nothing.
    pub fn split_all_candidates(&self, raw: &str) -> Vec<String> {
        let sanitized = raw.trim();
        if sanitized.is_empty() {
            return Vec::new();
        }
        let normalized = fold_diacritics(&sanitized.to_lowercase());
        let items = self.split_normalized(&normalized);
        if items.is_empty() {
            self.split_raw(sanitized)
        } else {
            items
        }
    }

    /// Input must already be lowercased and accent-free.
    pub fn split_normalized(&self, input: &str) -> Vec<String> {
        self.split(input, "normalized")
    }

    /// Keeps the original casing of each item.
    pub fn split_raw(&self, input: &str) -> Vec<String> {
        self.split(input, "raw")
    }

    fn split(&self, input: &str, flow: &str) -> Vec<String> {
        let cleaned = DESTINATION.replace_all(input, " ");
        let trimmed = cleaned.trim_matches(TRIM_CHARS);
        if trimmed.is_empty() {
            return Vec::new();
        }

        let segments: Vec<String> = SEPARATORS
            .split(trimmed)
            .map(|s| s.trim_matches(TRIM_CHARS))
            .filter(|s| !s.is_empty())
            .flat_map(|s| self.split_on_et(s))
            .collect();

        let before_pass2 = segments.len();
        let segments: Vec<String> = segments
            .iter()
            .flat_map(|s| split_on_boundaries(s))
            .map(|s| collapse(&s))
            .filter(|s| !s.is_empty())
            .collect();
        if segments.len() != before_pass2 {
            debug!(flow, ?segments, "list split: article pass");
        }

        let merged = self.merge_nounless(segments);
        debug!(flow, count = merged.len(), ?merged, "list split");
        merged
    }

    fn split_on_et(&self, segment: &str) -> Vec<String> {
        let whole = vec![segment.trim_matches(TRIM_CHARS).to_string()];
        let tokens = tokenize(segment);
        if !tokens.iter().any(|t| t == "et") {
            return whole;
        }
        let parts: Vec<String> = ET
            .split(segment)
            .map(|p| p.trim_matches(TRIM_CHARS).to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() < 2 {
            return whole;
        }
        if self.count_nouns(&tokens) >= 2 {
            return parts;
        }
        let determiner_led = parts
            .iter()
            .filter(|p| {
                tokenize(p)
                    .first()
                    .is_some_and(|t| self.lexicon.is_determiner(t))
            })
            .count();
        if determiner_led >= 2 {
            parts
        } else {
            whole
        }
    }

    fn merge_nounless(&self, segments: Vec<String>) -> Vec<String> {
        let mut merged = Vec::with_capacity(segments.len());
        let mut pending = String::new();
        for segment in segments {
            if pending.is_empty() {
                pending = segment;
            } else {
                pending = format!("{pending} {segment}");
            }
            if self.count_nouns(&tokenize(&pending)) > 0 {
                merged.push(collapse(&pending));
                pending.clear();
            }
        }
        if !pending.is_empty() {
            merged.push(collapse(&pending));
        }
        merged.retain(|s: &String| !s.is_empty());
        merged
    }

    fn count_nouns(&self, tokens: &[String]) -> usize {
        tokens
            .iter()
            .filter(|t| self.lexicon.is_likely_noun(t))
            .count()
    }
}

impl Default for ListSplitter {
    fn default() -> Self {
        Self::new(FrenchLexicon::shared())
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.replace(['’', '\'', '-'], " ")
        .split_whitespace()
        .map(normalize)
        .filter(|t| !t.is_empty())
        .collect()
}

fn collapse(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim_matches(TRIM_CHARS), " ")
        .into_owned()
}

fn has_following_word(segment: &str, end: usize) -> bool {
    segment[end..]
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric())
}

/// Cuts before every article or quantifier but the first, once at least two
/// of them each introduce a word.
fn split_on_boundaries(segment: &str) -> Vec<String> {
    let starts: Vec<usize> = ITEM_BOUNDARY
        .find_iter(segment)
        .filter(|m| has_following_word(segment, m.end()))
        .map(|m| m.start())
        .collect();
    if starts.len() < 2 {
        let trimmed = segment.trim_matches(TRIM_CHARS);
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    }

    let mut parts = Vec::with_capacity(starts.len() + 1);
    let mut last = 0;
    for &boundary in &starts[1..] {
        let part = segment[last..boundary].trim_matches(TRIM_CHARS);
        if !part.is_empty() {
            parts.push(part.to_string());
        }
        last = boundary;
    }
    let tail = segment[last..].trim_matches(TRIM_CHARS);
    if !tail.is_empty() {
        parts.push(tail.to_string());
    }
    parts
}

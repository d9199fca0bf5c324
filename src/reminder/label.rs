//! Span bookkeeping and label cleanup shared by the time and place grammars.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases that ask for a reminder. Matched on text where `’` is already `'`.
pub static TRIGGER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\brappel+e[- ]?(?:moi|nous)\b",
        r"(?i)\bfais[- ]?(?:moi|nous)\s+penser(?:\s+(?:à|a)\b)?",
        r"(?i)\bpense\s+(?:à|a|au|aux)\b",
        r"(?i)\bpeux[- ]?tu\s+me\s+rappeler\b",
        r"(?i)\bmets?[- ]?(?:moi\s+)?un\s+rappel\b(?:\s+pour\b)?",
        r"(?i)\balerte[- ]?moi\b",
        r"(?i)\bn'oublie\s+pas\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

const LEADING_STOPWORDS: &[&str] = &[
    "d'", "l'", "de", "le", "la", "les", "du", "des", "au", "aux", "mon", "ma", "mes", "ton",
    "ta", "tes", "son", "sa", "ses", "notre", "nos", "votre", "vos", "un", "une",
];

const EDGE_PUNCTUATION: &[char] = &[
    ' ', ',', ';', '.', ':', '!', '?', '-', '"', '\'', '«', '»', '(', ')',
];

pub fn sanitize(text: &str) -> String {
    text.replace('’', "'")
}

pub fn trigger_spans(text: &str) -> Vec<Range<usize>> {
    TRIGGER_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.range()))
        .collect()
}

/// Pure function: sorts and merges overlapping or touching spans.
pub fn merge_spans(mut spans: Vec<Range<usize>>) -> Vec<Range<usize>> {
    spans.sort_by_key(|s| (s.start, s.end));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Pure function: overwrites every span with spaces, keeping byte offsets.
pub fn blank_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut out = text.to_string();
    for span in merge_spans(spans.to_vec()) {
        let (Some(start), Some(end)) = (
            floor_boundary(&out, span.start),
            floor_boundary(&out, span.end.min(out.len())),
        ) else {
            continue;
        };
        if start < end {
            out.replace_range(start..end, &" ".repeat(end - start));
        }
    }
    out
}

fn floor_boundary(text: &str, mut idx: usize) -> Option<usize> {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    text.is_char_boundary(idx).then_some(idx)
}

/// Pure function: removes leading articles, possessives and partitives.
pub fn trim_leading_stopwords(label: &str) -> String {
    let mut rest = label.trim_start();
    'outer: loop {
        for stop in LEADING_STOPWORDS {
            let Some(head) = rest.get(..stop.len()) else {
                continue;
            };
            if !head.eq_ignore_ascii_case(stop) {
                continue;
            }
            let tail = &rest[stop.len()..];
            if stop.ends_with('\'') {
                rest = tail.trim_start();
                continue 'outer;
            }
            if tail.is_empty() {
                return String::new();
            }
            if tail.starts_with(char::is_whitespace) {
                rest = tail.trim_start();
                continue 'outer;
            }
        }
        return rest.trim().to_string();
    }
}

/// Collapses whitespace, trims edge punctuation and leading stopwords.
/// `None` when nothing meaningful is left.
pub fn clean_label(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(EDGE_PUNCTUATION);
    let label = trim_leading_stopwords(trimmed);
    let label = label.trim_matches(EDGE_PUNCTUATION);
    if label.chars().any(char::is_alphanumeric) {
        Some(label.to_string())
    } else {
        None
    }
}

/// Pure function: keeps the earliest of overlapping matches, preferring the
/// longest at equal start.
pub fn resolve_overlaps<T>(mut matches: Vec<(Range<usize>, T)>) -> Vec<(Range<usize>, T)> {
    matches.sort_by(|a, b| {
        a.0.start
            .cmp(&b.0.start)
            .then_with(|| b.0.len().cmp(&a.0.len()))
    });
    let mut accepted: Vec<(Range<usize>, T)> = Vec::with_capacity(matches.len());
    let mut reach = 0;
    for (span, value) in matches {
        if !accepted.is_empty() && span.start < reach {
            continue;
        }
        reach = span.end;
        accepted.push((span, value));
    }
    accepted
}

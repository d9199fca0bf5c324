use std::ops::Range;

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::label::{blank_spans, clean_label, resolve_overlaps, sanitize, trigger_spans};
use super::types::TimeReminder;
use crate::lexicon::{parse_number_words, NUMBER_WORD_PATTERN};

const MONTHS: &str = r"janvier|f[ée]vrier|mars|avril|mai|juin|juillet|ao[ûu]t|septembre|octobre|novembre|d[ée]cembre";

static RELATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\bdans\s+(?P<n>\d+|{NUMBER_WORD_PATTERN})\s*(?P<unit>minutes?|mins?|heures?|h(?P<hm>\d{{2}})?|jours?|semaines?)\b(?:\s+et\s+(?P<frac>demie?|quart))?"
    ))
    .expect("valid regex")
});
static IDIOMS: Lazy<Vec<(Regex, i64)>> = Lazy::new(|| {
    [
        (r"(?i)\bdans\s+(?:un|1)\s+quart\s+d'\s*heure\b", 15),
        (r"(?i)\bdans\s+(?:une\s+)?demi[- ]heure\b", 30),
        (r"(?i)\bdans\s+(?:trois|3)\s+quarts?\s+d'\s*heure\b", 45),
    ]
    .into_iter()
    .map(|(p, minutes)| (Regex::new(p).expect("valid regex"), minutes))
    .collect()
});
static RELATIVE_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?P<w>apr[eè]s[- ]demain|demain|aujourd'hui)\b").expect("valid regex")
});
static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:ce|le)\s+)?(?P<d>lundi|mardi|mercredi|jeudi|vendredi|samedi|dimanche)(?:\s+prochain)?\b",
    )
    .expect("valid regex")
});
static DAY_OF_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\ble\s+(?P<day>\d{{1,2}})(?:er)?(?:\s*/\s*(?P<month>\d{{1,2}})(?:\s*/\s*(?P<year>\d{{4}}|\d{{2}}))?|\s+(?P<mname>{MONTHS})(?:\s+(?P<myear>\d{{4}}))?)?\b"
    ))
    .expect("valid regex")
});
static CLOCK_H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b(?:à|a|vers)\s*)?\b(?P<h>\d{1,2})\s?h(?P<m>\d{2})?\b").expect("valid regex")
});
static CLOCK_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:à|a|vers)\s+(?P<h>\d{1,2})\s+heures?(?:\s+(?P<m>\d{2}))?\b")
        .expect("valid regex")
});
static CLOCK_COLON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b(?:à|a|vers)\s*)?\b(?P<h>\d{1,2}):(?P<m>\d{2})\b").expect("valid regex")
});
static NOON_MIDNIGHT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:\b(?:à|a|vers)\s+)?\b(?P<n>midi|minuit)\b").expect("valid regex")
});
static MOMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:ce\s+matin|(?:cet\s+|l')?apr[eè]s[- ]midi|ce\s+soir|cette\s+nuit)\b")
        .expect("valid regex")
});

/// Coarse to fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DateGranularity {
    RelativeDay = 1,
    Weekday = 2,
    DayOfMonth = 3,
    MonthDay = 4,
    FullDate = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TimePrecision {
    Moment = 1,
    Hour = 2,
    Minute = 3,
}

const RELATIVE_SPECIFICITY: u32 = 100;
const DEFAULT_HOUR: u32 = 9;

#[derive(Debug, Clone, Copy)]
enum Offset {
    Minutes(i64),
    Days(u64),
}

#[derive(Debug, Clone, Copy)]
enum Temporal {
    Offset(Offset),
    Date(NaiveDate, DateGranularity),
    Time(NaiveTime, TimePrecision),
}

#[derive(Debug, Clone)]
struct Candidate {
    at: DateTime<Tz>,
    specificity: u32,
    start: usize,
}

/// Resolves French time expressions to a single instant plus a label.
///
/// Wall-clock expressions are read in the parser's time zone; `now` is
/// always supplied by the caller.
#[derive(Debug, Clone, Copy)]
pub struct TimeParser {
    tz: Tz,
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Paris)
    }
}

impl TimeParser {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// `None` when no temporal expression resolves to a future instant or
    /// when nothing is left for the label.
    pub fn parse(&self, text: &str, now_millis: i64) -> Option<TimeReminder> {
        let text = sanitize(text);
        let now = Utc.timestamp_millis_opt(now_millis).single()?.with_timezone(&self.tz);
        let today = now.date_naive();

        let spans = resolve_overlaps(self.collect(&text, today));
        if spans.is_empty() {
            return None;
        }

        let chosen = self.choose(&spans, now)?;
        debug!(
            at = %chosen.at,
            specificity = chosen.specificity,
            spans = spans.len(),
            "time parse"
        );

        let mut removed: Vec<Range<usize>> = spans.iter().map(|(r, _)| r.clone()).collect();
        removed.extend(trigger_spans(&text));
        let label = clean_label(&blank_spans(&text, &removed))?;

        Some(TimeReminder {
            trigger_at_epoch_millis: chosen.at.timestamp_millis(),
            label,
        })
    }

    fn collect(&self, text: &str, today: NaiveDate) -> Vec<(Range<usize>, Temporal)> {
        let mut found = Vec::new();

        for caps in RELATIVE.captures_iter(text) {
            if let Some(offset) = relative_offset(&caps) {
                found.push((span(&caps), Temporal::Offset(offset)));
            }
        }
        for (re, minutes) in IDIOMS.iter() {
            for m in re.find_iter(text) {
                found.push((m.range(), Temporal::Offset(Offset::Minutes(*minutes))));
            }
        }

        for caps in RELATIVE_DAY.captures_iter(text) {
            let word = caps["w"].to_lowercase();
            let days = if word.starts_with("apr") {
                2
            } else if word.starts_with("demain") {
                1
            } else {
                0
            };
            if let Some(date) = today.checked_add_days(Days::new(days)) {
                found.push((span(&caps), Temporal::Date(date, DateGranularity::RelativeDay)));
            }
        }
        for caps in WEEKDAY.captures_iter(text) {
            if let Some(target) = weekday(&caps["d"]) {
                let current = today.weekday().num_days_from_monday() as i64;
                let wanted = target.num_days_from_monday() as i64;
                let delta = match (wanted - current + 7) % 7 {
                    0 => 7,
                    d => d,
                };
                if let Some(date) = today.checked_add_days(Days::new(delta as u64)) {
                    found.push((span(&caps), Temporal::Date(date, DateGranularity::Weekday)));
                }
            }
        }
        for caps in DAY_OF_MONTH.captures_iter(text) {
            if let Some((date, granularity)) = day_of_month(&caps, today) {
                found.push((span(&caps), Temporal::Date(date, granularity)));
            }
        }

        for re in [&*CLOCK_H, &*CLOCK_WORD, &*CLOCK_COLON] {
            for caps in re.captures_iter(text) {
                if let Some((time, precision)) = clock(&caps) {
                    found.push((span(&caps), Temporal::Time(time, precision)));
                }
            }
        }
        for caps in NOON_MIDNIGHT.captures_iter(text) {
            if follows_apres(text, caps.name("n").map_or(0, |m| m.start())) {
                continue;
            }
            let hour = if caps["n"].eq_ignore_ascii_case("midi") { 12 } else { 0 };
            if let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) {
                found.push((span(&caps), Temporal::Time(time, TimePrecision::Hour)));
            }
        }
        for m in MOMENT.find_iter(text) {
            let phrase = m.as_str().to_lowercase();
            let hour = if phrase.contains("matin") {
                8
            } else if phrase.contains("midi") {
                15
            } else if phrase.contains("soir") {
                19
            } else {
                22
            };
            if let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) {
                found.push((m.range(), Temporal::Time(time, TimePrecision::Moment)));
            }
        }

        found
    }

    /// Builds every candidate, drops the past ones and picks the earliest;
    /// ties go to the most specific, then to the leftmost expression.
    fn choose(&self, spans: &[(Range<usize>, Temporal)], now: DateTime<Tz>) -> Option<Candidate> {
        let today = now.date_naive();
        let mut times: Vec<(usize, NaiveTime, TimePrecision)> = spans
            .iter()
            .filter_map(|(r, t)| match t {
                Temporal::Time(time, p) => Some((r.start, *time, *p)),
                _ => None,
            })
            .collect();
        // an explicit clock time overrides "ce soir", "ce matin", ...
        if times.iter().any(|(_, _, p)| *p > TimePrecision::Moment) {
            times.retain(|(_, _, p)| *p != TimePrecision::Moment);
        }

        let mut dates: Vec<(usize, NaiveDate, DateGranularity)> = spans
            .iter()
            .filter_map(|(r, t)| match t {
                Temporal::Date(d, g) => Some((r.start, *d, *g)),
                _ => None,
            })
            .collect();

        let mut candidates = Vec::new();
        for (range, temporal) in spans {
            let Temporal::Offset(offset) = temporal else {
                continue;
            };
            match offset {
                // "dans 3 jours à 9h" reads as a date
                Offset::Days(days) if !times.is_empty() => {
                    if let Some(date) = today.checked_add_days(Days::new(*days)) {
                        dates.push((range.start, date, DateGranularity::RelativeDay));
                    }
                }
                _ => {
                    if let Some(at) = self.apply_offset(now, *offset) {
                        candidates.push(Candidate {
                            at,
                            specificity: RELATIVE_SPECIFICITY,
                            start: range.start,
                        });
                    }
                }
            }
        }

        if !dates.is_empty() && !times.is_empty() {
            for &(date_start, date, granularity) in &dates {
                for &(time_start, time, precision) in &times {
                    if let Some(at) = self.local(date.and_time(time)) {
                        candidates.push(Candidate {
                            at,
                            specificity: specificity(Some(granularity), Some(precision)),
                            start: date_start.min(time_start),
                        });
                    }
                }
            }
        } else if !dates.is_empty() {
            let nine = NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0)?;
            for &(start, date, granularity) in &dates {
                if let Some(at) = self.local(date.and_time(nine)) {
                    candidates.push(Candidate {
                        at,
                        specificity: specificity(Some(granularity), None),
                        start,
                    });
                }
            }
        } else {
            for &(start, time, precision) in &times {
                let mut at = self.local(today.and_time(time));
                if at.is_some_and(|t| t <= now) {
                    at = today
                        .checked_add_days(Days::new(1))
                        .and_then(|d| self.local(d.and_time(time)));
                }
                if let Some(at) = at {
                    candidates.push(Candidate {
                        at,
                        specificity: specificity(None, Some(precision)),
                        start,
                    });
                }
            }
        }

        candidates.retain(|c| c.at >= now);
        candidates.sort_by(|a, b| {
            a.at.cmp(&b.at)
                .then_with(|| b.specificity.cmp(&a.specificity))
                .then_with(|| a.start.cmp(&b.start))
        });
        candidates.into_iter().next()
    }

    fn apply_offset(&self, now: DateTime<Tz>, offset: Offset) -> Option<DateTime<Tz>> {
        match offset {
            Offset::Minutes(minutes) => now.checked_add_signed(Duration::minutes(minutes)),
            Offset::Days(days) => {
                let local = now.naive_local().checked_add_days(Days::new(days))?;
                self.local(local)
            }
        }
    }

    /// Nonexistent local times move forward an hour; ambiguous ones take the
    /// earlier instant.
    fn local(&self, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(t) => Some(t),
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => self
                .tz
                .from_local_datetime(&(naive + Duration::hours(1)))
                .earliest(),
        }
    }
}

fn span(caps: &Captures<'_>) -> Range<usize> {
    caps.get(0).map(|m| m.range()).unwrap_or(0..0)
}

fn specificity(date: Option<DateGranularity>, time: Option<TimePrecision>) -> u32 {
    date.map_or(0, |d| d as u32 * 10) + time.map_or(0, |t| t as u32)
}

fn relative_offset(caps: &Captures<'_>) -> Option<Offset> {
    let raw = &caps["n"];
    let n = raw
        .parse::<u32>()
        .ok()
        .or_else(|| parse_number_words(raw))? as i64;
    let unit = caps["unit"].to_lowercase();
    let frac = caps.name("frac").map(|f| f.as_str().to_lowercase());

    let offset = if unit.starts_with("min") {
        Offset::Minutes(n)
    } else if unit.starts_with('h') {
        let minutes = caps
            .name("hm")
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(0);
        let extra = match frac.as_deref() {
            Some("quart") => 15,
            Some(_) => 30,
            None => 0,
        };
        Offset::Minutes(n * 60 + minutes + extra)
    } else if unit.starts_with("semaine") {
        Offset::Days(n as u64 * 7)
    } else {
        Offset::Days(n as u64)
    };
    Some(offset)
}

/// `midi` inside `après-midi`.
fn follows_apres(text: &str, start: usize) -> bool {
    let before = text.get(..start).unwrap_or("").trim_end_matches(['-', ' ']);
    let folded = crate::lexicon::fold_diacritics(&before.to_lowercase());
    folded.ends_with("apres")
}

fn weekday(name: &str) -> Option<Weekday> {
    let day = match name.to_lowercase().as_str() {
        "lundi" => Weekday::Mon,
        "mardi" => Weekday::Tue,
        "mercredi" => Weekday::Wed,
        "jeudi" => Weekday::Thu,
        "vendredi" => Weekday::Fri,
        "samedi" => Weekday::Sat,
        "dimanche" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

fn month_number(name: &str) -> Option<u32> {
    let folded = crate::lexicon::fold_diacritics(&name.to_lowercase());
    let month = match folded.as_str() {
        "janvier" => 1,
        "fevrier" => 2,
        "mars" => 3,
        "avril" => 4,
        "mai" => 5,
        "juin" => 6,
        "juillet" => 7,
        "aout" => 8,
        "septembre" => 9,
        "octobre" => 10,
        "novembre" => 11,
        "decembre" => 12,
        _ => return None,
    };
    Some(month)
}

/// `le 21/10`, `le 21 octobre 2025` or a bare `le 21`. Dates without a year
/// that are not after today move to next year; a bare day moves to the next
/// month that has it.
fn day_of_month(caps: &Captures<'_>, today: NaiveDate) -> Option<(NaiveDate, DateGranularity)> {
    let day: u32 = caps["day"].parse().ok()?;
    let month = match (caps.name("month"), caps.name("mname")) {
        (Some(m), _) => Some(m.as_str().parse::<u32>().ok()?),
        (None, Some(name)) => Some(month_number(name.as_str())?),
        (None, None) => None,
    };
    let year = caps
        .name("year")
        .or_else(|| caps.name("myear"))
        .and_then(|y| y.as_str().parse::<i32>().ok())
        .map(|y| if y < 100 { 2000 + y } else { y });

    match (month, year) {
        (Some(month), Some(year)) => {
            NaiveDate::from_ymd_opt(year, month, day).map(|d| (d, DateGranularity::FullDate))
        }
        (Some(month), None) => {
            let this_year = NaiveDate::from_ymd_opt(today.year(), month, day);
            let date = match this_year {
                Some(d) if d > today => d,
                _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day)?,
            };
            Some((date, DateGranularity::MonthDay))
        }
        (None, _) => {
            let first = today.with_day(1)?;
            (0..=12)
                .filter_map(|ahead| first.checked_add_months(Months::new(ahead)))
                .filter_map(|m| m.with_day(day))
                .find(|d| *d > today)
                .map(|d| (d, DateGranularity::DayOfMonth))
        }
    }
}

/// Hours above 24 or minutes above 59 are rejected; `24h` is midnight.
fn clock(caps: &Captures<'_>) -> Option<(NaiveTime, TimePrecision)> {
    let hour: u32 = caps["h"].parse().ok()?;
    let minute = caps
        .name("m")
        .map(|m| m.as_str().parse::<u32>())
        .transpose()
        .ok()?;
    if hour > 24 || minute.is_some_and(|m| m > 59) {
        return None;
    }
    let hour = if hour == 24 { 0 } else { hour };
    let precision = if minute.is_some() {
        TimePrecision::Minute
    } else {
        TimePrecision::Hour
    };
    NaiveTime::from_hms_opt(hour, minute.unwrap_or(0), 0).map(|t| (t, precision))
}

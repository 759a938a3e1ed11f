//! Free-text temporal expression resolver.
//!
//! # Responsibility
//! - Turn a short phrase ("tomorrow", "in 2 hours", "may 15th") into an
//!   absolute local timestamp relative to a caller-supplied `now`.
//!
//! # Invariants
//! - Rules run in [`RULE_ORDER`]; the first rule whose pattern matches decides
//!   the result, even when its values turn out to be invalid.
//! - Resolution is total or absent: no partial date/time results.
//! - Pure function of `(text, now)`; no clock reads and no logging.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

static RELATIVE_OFFSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"in (\d+) (minute|minutes|hour|hours|day|days|week|weeks)")
        .expect("valid relative offset regex")
});
static AT_CLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"at (\d+)(?::(\d+))?\s*(am|pm)?").expect("valid `at` clock regex")
});
static BARE_CLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)(?::(\d+))?\s*(am|pm)").expect("valid bare clock regex"));
static MONTH_DAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+)\s+(\d+)(?:st|nd|rd|th)?").expect("valid month-day regex")
});
static DAY_MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)(?:st|nd|rd|th)?\s+(\w+)").expect("valid day-month regex")
});

const WEEKDAYS: &[(&str, u32)] = &[
    ("monday", 0),
    ("tuesday", 1),
    ("wednesday", 2),
    ("thursday", 3),
    ("friday", 4),
    ("saturday", 5),
    ("sunday", 6),
];

const MONTHS: &[(&str, u32)] = &[
    ("january", 1),
    ("february", 2),
    ("march", 3),
    ("april", 4),
    ("may", 5),
    ("june", 6),
    ("july", 7),
    ("august", 8),
    ("september", 9),
    ("october", 10),
    ("november", 11),
    ("december", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("sept", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Hour used for day-granular results (weekday and calendar dates).
const MORNING_HOUR: u32 = 9;

/// One entry of the ordered resolution rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalRule {
    Now,
    Today,
    Tomorrow,
    RelativeOffset,
    Weekday,
    ClockTime,
    CalendarDate,
}

/// Priority order of temporal rules. Overlapping patterns make this a
/// correctness contract: e.g. "in 3 days at 5pm" must resolve as an offset.
pub const RULE_ORDER: [TemporalRule; 7] = [
    TemporalRule::Now,
    TemporalRule::Today,
    TemporalRule::Tomorrow,
    TemporalRule::RelativeOffset,
    TemporalRule::Weekday,
    TemporalRule::ClockTime,
    TemporalRule::CalendarDate,
];

/// Outcome of a single rule attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleMatch {
    /// Pattern did not apply; try the next rule.
    Skip,
    /// Pattern applied and produced a timestamp.
    Resolved(NaiveDateTime),
    /// Pattern applied but its values do not form a valid timestamp.
    Invalid,
}

impl RuleMatch {
    fn from_option(value: Option<NaiveDateTime>) -> Self {
        value.map_or(Self::Invalid, Self::Resolved)
    }
}

impl TemporalRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::RelativeOffset => "relative_offset",
            Self::Weekday => "weekday",
            Self::ClockTime => "clock_time",
            Self::CalendarDate => "calendar_date",
        }
    }

    fn try_match(self, text: &str, now: NaiveDateTime) -> RuleMatch {
        match self {
            Self::Now => {
                if text.contains("now") {
                    RuleMatch::Resolved(now)
                } else {
                    RuleMatch::Skip
                }
            }
            Self::Today => {
                if text.contains("today") {
                    RuleMatch::from_option(end_of_day(now.date()))
                } else {
                    RuleMatch::Skip
                }
            }
            Self::Tomorrow => {
                if text.contains("tomorrow") {
                    RuleMatch::from_option(now.date().succ_opt().and_then(end_of_day))
                } else {
                    RuleMatch::Skip
                }
            }
            Self::RelativeOffset => match_relative_offset(text, now),
            Self::Weekday => match_weekday(text, now),
            Self::ClockTime => match_clock_time(text, now),
            Self::CalendarDate => match_calendar_date(text, now),
        }
    }
}

/// Resolved timestamp together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub rule: TemporalRule,
    pub at: NaiveDateTime,
}

/// Resolves `text` into an absolute timestamp relative to `now`.
///
/// Returns `None` for empty text, for text no rule recognizes, and for
/// recognized but calendrically impossible values ("february 30", "at 25").
pub fn resolve(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    resolve_detailed(text, now).map(|resolution| resolution.at)
}

/// Same as [`resolve`], but also reports which rule fired.
pub fn resolve_detailed(text: &str, now: NaiveDateTime) -> Option<Resolution> {
    if text.is_empty() {
        return None;
    }

    let text = text.to_lowercase();
    for rule in RULE_ORDER {
        match rule.try_match(&text, now) {
            RuleMatch::Skip => continue,
            RuleMatch::Resolved(at) => return Some(Resolution { rule, at }),
            RuleMatch::Invalid => return None,
        }
    }

    None
}

fn end_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(23, 59, 59)
}

fn match_relative_offset(text: &str, now: NaiveDateTime) -> RuleMatch {
    let Some(caps) = RELATIVE_OFFSET_RE.captures(text) else {
        return RuleMatch::Skip;
    };
    let Some(amount) = parse_number::<i64>(&caps, 1) else {
        return RuleMatch::Invalid;
    };

    let delta = match &caps[2] {
        "minute" | "minutes" => TimeDelta::try_minutes(amount),
        "hour" | "hours" => TimeDelta::try_hours(amount),
        "day" | "days" => TimeDelta::try_days(amount),
        _ => TimeDelta::try_weeks(amount),
    };

    RuleMatch::from_option(delta.and_then(|delta| now.checked_add_signed(delta)))
}

fn match_weekday(text: &str, now: NaiveDateTime) -> RuleMatch {
    let Some(&(_, target)) = WEEKDAYS.iter().find(|(name, _)| text.contains(name)) else {
        return RuleMatch::Skip;
    };

    let today = now.weekday().num_days_from_monday();
    let mut days_ahead = i64::from(target) - i64::from(today);
    if days_ahead <= 0 {
        days_ahead += 7;
    }

    let target_date = u64::try_from(days_ahead)
        .ok()
        .and_then(|days| now.date().checked_add_days(Days::new(days)));
    RuleMatch::from_option(target_date.and_then(|date| date.and_hms_opt(MORNING_HOUR, 0, 0)))
}

fn match_clock_time(text: &str, now: NaiveDateTime) -> RuleMatch {
    let Some(caps) = AT_CLOCK_RE
        .captures(text)
        .or_else(|| BARE_CLOCK_RE.captures(text))
    else {
        return RuleMatch::Skip;
    };

    let Some(mut hour) = parse_number::<u32>(&caps, 1) else {
        return RuleMatch::Invalid;
    };
    let minute = match caps.get(2) {
        Some(raw) => match raw.as_str().parse::<u32>() {
            Ok(minute) => minute,
            Err(_) => return RuleMatch::Invalid,
        },
        None => 0,
    };

    match caps.get(3).map(|marker| marker.as_str()) {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    RuleMatch::from_option(now.date().and_hms_opt(hour, minute, 0))
}

fn match_calendar_date(text: &str, now: NaiveDateTime) -> RuleMatch {
    if let Some(caps) = MONTH_DAY_RE.captures(text) {
        if let Some(month) = lookup_month(&caps[1]) {
            return date_in_coming_year(month, parse_number::<u32>(&caps, 2), now);
        }
    }

    if let Some(caps) = DAY_MONTH_RE.captures(text) {
        if let Some(month) = lookup_month(&caps[2]) {
            return date_in_coming_year(month, parse_number::<u32>(&caps, 1), now);
        }
    }

    RuleMatch::Skip
}

/// Builds `month/day` at 09:00 in the current year, or next year when that
/// month/day already passed relative to `now`.
fn date_in_coming_year(month: u32, day: Option<u32>, now: NaiveDateTime) -> RuleMatch {
    let Some(day) = day else {
        return RuleMatch::Invalid;
    };

    let mut year = now.year();
    if month < now.month() || (month == now.month() && day < now.day()) {
        year += 1;
    }

    RuleMatch::from_option(
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(MORNING_HOUR, 0, 0)),
    )
}

fn lookup_month(word: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|&(_, month)| month)
}

fn parse_number<T: std::str::FromStr>(caps: &Captures<'_>, group: usize) -> Option<T> {
    caps.get(group)?.as_str().parse::<T>().ok()
}

//! Rule-based intent classification and slot extraction.
//!
//! # Responsibility
//! - Map a raw command to exactly one [`Classification`].
//! - Extract intent-specific slots from the phrase that matched.
//!
//! # Invariants
//! - Groups run in [`GROUP_ORDER`]; within a group, phrasings run in table
//!   order. The first match wins and later patterns are never consulted.
//! - Temporal slots stay raw text here; resolving them is the caller's job.
//! - Classification never fails: unmatched input is `Unknown`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Placeholder location for weather requests that name no place.
pub const CURRENT_LOCATION: &str = "current location";
/// Topic used when a news request names none.
pub const GENERAL_TOPIC: &str = "general";

const QUESTION_STARTERS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "can you", "tell me", "is", "are", "do",
    "does",
];

static TASK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"add (?:a )?task(?: to)?(?: do)?(?: called)? (.+)",
        r"create (?:a )?task(?: called)? (.+)",
        r"(?:i need to|remind me to) (.+)",
    ])
});

static DEADLINE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?:by|due|on|at) (\w+ \d+(?:st|nd|rd|th)?)",
        r"(?:by|due|on|at) (\d+(?:st|nd|rd|th)? \w+)",
        r"(?:by|due|on|at) (\w+day)",
        r"(?:by|due|on|at) (\d+:\d+)",
    ])
});

static REMINDER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"remind me (?:to|about) (.+?) (?:at|on) (.+)",
        r"set (?:a )?reminder (?:to|for) (.+?) (?:at|on) (.+)",
        r"remind me (.+?) (?:at|on) (.+)",
    ])
});

static WEATHER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?:what's|what is|how's|how is) the weather(?: like)?(?: in (.+))?",
        r"weather(?: for| in)? (.+)",
        r"(?:get|show|tell me)(?: the)? weather(?: for| in)? (.+)",
    ])
});

static NEWS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?:what's|what is) (?:the )?news(?: about| on)?(?: (.+))?",
        r"(?:show|get|tell me)(?: the)? news(?: about| on)?(?: (.+))?",
        r"(?:latest|recent) news(?: about| on)?(?: (.+))?",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid intent regex"))
        .collect()
}

/// Intent tag without slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AddTask,
    AddReminder,
    Weather,
    News,
    Question,
    Unknown,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddTask => "add_task",
            Self::AddReminder => "add_reminder",
            Self::Weather => "weather",
            Self::News => "news",
            Self::Question => "question",
            Self::Unknown => "unknown",
        }
    }
}

/// Result of classifying one command.
///
/// Serialized with an `intent` tag, e.g.
/// `{"intent":"add_task","title":"buy milk","deadline":"friday"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Classification {
    AddTask {
        title: String,
        /// Raw deadline phrase, not yet resolved.
        deadline: Option<String>,
    },
    AddReminder {
        title: String,
        /// Raw time phrase, not yet resolved.
        time: String,
    },
    Weather {
        /// May be [`CURRENT_LOCATION`], which callers must replace.
        location: String,
    },
    News {
        topic: String,
    },
    Question {
        query: String,
    },
    Unknown {
        original_command: String,
    },
}

impl Classification {
    pub fn intent(&self) -> Intent {
        match self {
            Self::AddTask { .. } => Intent::AddTask,
            Self::AddReminder { .. } => Intent::AddReminder,
            Self::Weather { .. } => Intent::Weather,
            Self::News { .. } => Intent::News,
            Self::Question { .. } => Intent::Question,
            Self::Unknown { .. } => Intent::Unknown,
        }
    }
}

/// Pattern groups in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentGroup {
    Task,
    Reminder,
    Weather,
    News,
    Question,
}

/// Group priority. Task phrasings include "remind me to", so the task group
/// must stay ahead of the reminder group.
pub const GROUP_ORDER: [IntentGroup; 5] = [
    IntentGroup::Task,
    IntentGroup::Reminder,
    IntentGroup::Weather,
    IntentGroup::News,
    IntentGroup::Question,
];

impl IntentGroup {
    /// Attempts this group against a normalized (lowercased, trimmed) command.
    pub fn try_match(self, command: &str) -> Option<Classification> {
        match self {
            Self::Task => match_task(command),
            Self::Reminder => match_reminder(command),
            Self::Weather => match_weather(command),
            Self::News => match_news(command),
            Self::Question => QUESTION_STARTERS
                .iter()
                .any(|starter| command.starts_with(starter))
                .then(|| Classification::Question {
                    query: command.to_string(),
                }),
        }
    }
}

/// Classifies a raw command into an intent with its slots.
pub fn classify(command: &str) -> Classification {
    let command = command.to_lowercase();
    let command = command.trim();

    GROUP_ORDER
        .iter()
        .find_map(|group| group.try_match(command))
        .unwrap_or_else(|| Classification::Unknown {
            original_command: command.to_string(),
        })
}

fn match_task(command: &str) -> Option<Classification> {
    let caps = TASK_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(command))?;
    let mut title = caps[1].trim().to_string();

    // The deadline is searched in the whole command, but stripped from the title.
    // A title that would be left empty ("add a task by friday") stays as written.
    let mut deadline = None;
    for pattern in DEADLINE_PATTERNS.iter() {
        if let Some(found) = pattern.captures(command) {
            deadline = Some(found[1].to_string());
            let stripped = collapse_whitespace(&pattern.replace_all(&title, ""));
            if !stripped.is_empty() {
                title = stripped;
            }
            break;
        }
    }

    Some(Classification::AddTask { title, deadline })
}

fn match_reminder(command: &str) -> Option<Classification> {
    let caps = REMINDER_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(command))?;

    Some(Classification::AddReminder {
        title: caps[1].trim().to_string(),
        time: caps[2].trim().to_string(),
    })
}

fn match_weather(command: &str) -> Option<Classification> {
    let caps = WEATHER_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(command))?;

    Some(Classification::Weather {
        location: optional_slot(caps.get(1), CURRENT_LOCATION),
    })
}

fn match_news(command: &str) -> Option<Classification> {
    let caps = NEWS_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(command))?;

    Some(Classification::News {
        topic: optional_slot(caps.get(1), GENERAL_TOPIC),
    })
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn optional_slot(slot: Option<regex::Match<'_>>, default: &str) -> String {
    slot.map(|value| value.as_str().trim())
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{collapse_whitespace, optional_slot, IntentGroup, GROUP_ORDER};

    #[test]
    fn collapse_whitespace_joins_words_with_single_spaces() {
        assert_eq!(collapse_whitespace("  ship it  at 10:30 "), "ship it at 10:30");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn group_order_puts_tasks_before_reminders() {
        let task = GROUP_ORDER
            .iter()
            .position(|group| *group == IntentGroup::Task)
            .unwrap();
        let reminder = GROUP_ORDER
            .iter()
            .position(|group| *group == IntentGroup::Reminder)
            .unwrap();
        assert!(task < reminder);
        assert_eq!(GROUP_ORDER.last(), Some(&IntentGroup::Question));
    }

    #[test]
    fn optional_slot_falls_back_to_default() {
        assert_eq!(optional_slot(None, "general"), "general");
    }

    #[test]
    fn reminder_group_matches_even_when_task_group_would() {
        // Each group is independent; ordering is applied only by `classify`.
        let direct = IntentGroup::Reminder.try_match("remind me to stretch at 4pm");
        assert!(direct.is_some());
    }
}

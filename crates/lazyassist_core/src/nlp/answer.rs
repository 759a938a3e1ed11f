//! Canned question answering.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

static CLOCK_QUESTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"what (?:time|day|date) is it").expect("valid clock question regex"));

/// Ordered question-key → answer table; the first key contained in the
/// question wins.
const KNOWLEDGE_BASE: &[(&str, &str)] = &[
    (
        "who are you",
        "I'm your AI-powered personal assistant. I can help you manage tasks, set reminders, answer questions, and more.",
    ),
    (
        "what can you do",
        "I can help with tasks, reminders, answer questions, check the weather, get news updates, and process files for information.",
    ),
    (
        "how do you work",
        "I process your natural language commands to understand your intent, then I take appropriate actions like setting reminders or retrieving information.",
    ),
];

pub const FALLBACK_ANSWER: &str =
    "I don't have an answer for that question. I'm a basic assistant focused on tasks, reminders, weather, and news.";

/// Answers `question`, rendering clock questions from `now`.
pub fn answer(question: &str, now: NaiveDateTime) -> String {
    let question = question.to_lowercase();

    if CLOCK_QUESTION_RE.is_match(&question) {
        return format!(
            "It's {} on {}.",
            now.format("%I:%M %p"),
            now.format("%A, %B %d, %Y")
        );
    }

    KNOWLEDGE_BASE
        .iter()
        .find(|(key, _)| question.contains(key))
        .map_or(FALLBACK_ANSWER, |&(_, reply)| reply)
        .to_string()
}

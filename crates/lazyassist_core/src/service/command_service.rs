//! Natural-language command orchestration.
//!
//! # Responsibility
//! - Classify a raw command and dispatch it to the matching use-case.
//! - Resolve raw deadline/time slots into timestamps before persisting.
//! - Degrade feed failures into user-facing outcomes instead of errors.
//!
//! # Invariants
//! - `now` is supplied by the caller; the orchestrator never reads a clock.
//! - A reminder is stored only when its time phrase resolves.
//! - Raw command text is never written to logs.

use crate::feeds::{NewsArticle, NewsProvider, WeatherProvider, WeatherReport};
use crate::model::reminder::Reminder;
use crate::model::task::Task;
use crate::nlp::intent::CURRENT_LOCATION;
use crate::nlp::{answer, classify, resolve, Classification};
use crate::repo::reminder_repo::ReminderRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use crate::service::reminder_service::{CreateReminderRequest, ReminderService};
use crate::service::task_service::{CreateTaskRequest, TaskService};
use chrono::NaiveDateTime;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Successful result of processing one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    TaskAdded { task: Task },
    ReminderSet { reminder: Reminder },
    Answered { answer: String },
    Weather { report: WeatherReport },
    WeatherUnavailable { location: String, reason: String },
    News { topic: String, articles: Vec<NewsArticle> },
    NotUnderstood { original_command: String },
}

impl CommandOutcome {
    /// Short human-readable status line for UI display.
    pub fn message(&self) -> &'static str {
        match self {
            Self::TaskAdded { .. } => "Task added successfully",
            Self::ReminderSet { .. } => "Reminder set successfully",
            Self::Answered { .. } => "Question answered",
            Self::Weather { .. } => "Weather retrieved",
            Self::WeatherUnavailable { .. } => "Could not retrieve weather data",
            Self::News { .. } => "News retrieved",
            Self::NotUnderstood { .. } => "I didn't understand that command",
        }
    }

    /// Whether the command was understood and acted on.
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            Self::NotUnderstood { .. } | Self::WeatherUnavailable { .. }
        )
    }
}

/// Command failures that callers must surface as errors.
#[derive(Debug)]
pub enum CommandError {
    /// Command text was empty or whitespace.
    EmptyCommand,
    /// Reminder time phrase did not resolve to a timestamp.
    UnparseableReminderTime { time_text: String },
    Repo(RepoError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "No command provided"),
            Self::UnparseableReminderTime { time_text } => {
                write!(f, "Could not parse reminder time `{time_text}`")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Orchestrates classification, temporal resolution and dispatch.
pub struct CommandService<T, R, W, N>
where
    T: TaskRepository,
    R: ReminderRepository,
    W: WeatherProvider,
    N: NewsProvider,
{
    tasks: TaskService<T>,
    reminders: ReminderService<R>,
    weather: W,
    news: N,
    default_location: String,
}

impl<T, R, W, N> CommandService<T, R, W, N>
where
    T: TaskRepository,
    R: ReminderRepository,
    W: WeatherProvider,
    N: NewsProvider,
{
    /// `default_location` replaces the "current location" placeholder.
    pub fn new(
        task_repo: T,
        reminder_repo: R,
        weather: W,
        news: N,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            tasks: TaskService::new(task_repo),
            reminders: ReminderService::new(reminder_repo),
            weather,
            news,
            default_location: default_location.into(),
        }
    }

    pub fn tasks(&self) -> &TaskService<T> {
        &self.tasks
    }

    pub fn reminders(&self) -> &ReminderService<R> {
        &self.reminders
    }

    /// Processes one raw command relative to `now`.
    pub fn process(
        &self,
        command: &str,
        now: NaiveDateTime,
    ) -> Result<CommandOutcome, CommandError> {
        if command.trim().is_empty() {
            return Err(CommandError::EmptyCommand);
        }

        let started_at = Instant::now();
        let classification = classify(command);
        let intent = classification.intent().as_str();
        let result = self.dispatch(command, classification, now);

        match &result {
            Ok(outcome) => info!(
                "event=command_process module=command status=ok intent={intent} success={} duration_ms={}",
                outcome.is_success(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => warn!(
                "event=command_process module=command status=error intent={intent} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }

        result
    }

    fn dispatch(
        &self,
        command: &str,
        classification: Classification,
        now: NaiveDateTime,
    ) -> Result<CommandOutcome, CommandError> {
        match classification {
            Classification::AddTask { title, deadline } => {
                let resolved = deadline.as_deref().and_then(|text| resolve(text, now));
                if deadline.is_some() && resolved.is_none() {
                    warn!("event=deadline_resolve module=command status=miss");
                }
                let task = self.tasks.create_task(&CreateTaskRequest {
                    title,
                    description: String::new(),
                    deadline: resolved,
                    created_at: now,
                })?;
                Ok(CommandOutcome::TaskAdded { task })
            }
            Classification::AddReminder { title, time } => {
                let Some(reminder_time) = resolve(&time, now) else {
                    return Err(CommandError::UnparseableReminderTime { time_text: time });
                };
                let reminder = self.reminders.create_reminder(&CreateReminderRequest {
                    title,
                    description: String::new(),
                    reminder_time,
                    created_at: now,
                })?;
                Ok(CommandOutcome::ReminderSet { reminder })
            }
            Classification::Question { .. } => Ok(CommandOutcome::Answered {
                answer: answer(command, now),
            }),
            Classification::Weather { location } => Ok(self.fetch_weather(location)),
            Classification::News { topic } => Ok(self.fetch_news(topic, now)),
            Classification::Unknown { original_command } => {
                Ok(CommandOutcome::NotUnderstood { original_command })
            }
        }
    }

    fn fetch_weather(&self, location: String) -> CommandOutcome {
        let location = if location == CURRENT_LOCATION {
            self.default_location.clone()
        } else {
            location
        };

        match self.weather.current(&location) {
            Ok(report) => CommandOutcome::Weather { report },
            Err(err) => {
                warn!(
                    "event=weather_fetch module=command status=error provider={} error={err}",
                    err.provider()
                );
                CommandOutcome::WeatherUnavailable {
                    location,
                    reason: err.to_string(),
                }
            }
        }
    }

    fn fetch_news(&self, topic: String, now: NaiveDateTime) -> CommandOutcome {
        let articles = match self.news.headlines(&topic, now) {
            Ok(articles) => articles,
            Err(err) => {
                warn!(
                    "event=news_fetch module=command status=error provider={} error={err}",
                    err.provider()
                );
                vec![NewsArticle::unavailable(&err.to_string(), now)]
            }
        };
        CommandOutcome::News { topic, articles }
    }
}

//! Core domain logic for LazyAssist.
//! Command understanding, task/reminder storage and feed orchestration.

pub mod config;
pub mod db;
pub mod feeds;
pub mod logging;
pub mod model;
pub mod nlp;
pub mod repo;
pub mod service;

pub use config::{AssistantConfig, ConfigError};
pub use feeds::{
    CuratedNewsProvider, FeedError, GNewsProvider, NewsArticle, NewsProvider, WeatherProvider,
    WeatherReport, WttrWeatherProvider,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::reminder::{Reminder, ReminderId};
pub use model::task::{Task, TaskId, ValidationError};
pub use nlp::{answer, classify, resolve, Classification, Intent};
pub use repo::reminder_repo::{ReminderListQuery, ReminderRepository, SqliteReminderRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskListQuery, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::command_service::{CommandError, CommandOutcome, CommandService};
pub use service::reminder_service::{CreateReminderRequest, ReminderService};
pub use service::task_service::{CreateTaskRequest, TaskPatch, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

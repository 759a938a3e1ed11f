//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record created from commands or direct CRUD.
//! - Validate write-path invariants before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is never blank.
//! - `deadline` is a local wall-clock timestamp; `None` means "no deadline".

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for tasks.
pub type TaskId = Uuid;

/// Validation failures for task and reminder write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming whitespace.
    BlankTitle,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
        }
    }
}

impl Error for ValidationError {}

/// Actionable item with an optional deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Free-form details; empty when created from a command.
    pub description: String,
    pub deadline: Option<NaiveDateTime>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

impl Task {
    /// Creates an open task with a generated stable ID.
    pub fn new(title: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            deadline: None,
            completed: false,
            created_at,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Whether the deadline is set and strictly before `now` on an open task.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.deadline.is_some_and(|deadline| deadline < now)
    }
}

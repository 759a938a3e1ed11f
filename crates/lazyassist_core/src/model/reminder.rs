//! Reminder domain model.
//!
//! # Invariants
//! - `reminder_time` is always set; a reminder without a time is not stored.
//! - `title` is never blank.

use crate::model::task::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for reminders.
pub type ReminderId = Uuid;

/// Point-in-time notification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    pub reminder_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl Reminder {
    /// Creates a reminder with a generated stable ID.
    pub fn new(
        title: impl Into<String>,
        reminder_time: NaiveDateTime,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            reminder_time,
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        Ok(())
    }

    /// Whether the reminder should fire at or before `now`.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.reminder_time <= now
    }
}

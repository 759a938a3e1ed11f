//! Reminder use-case service.

use crate::model::reminder::{Reminder, ReminderId};
use crate::repo::reminder_repo::{ReminderListQuery, ReminderRepository};
use crate::repo::RepoResult;
use chrono::NaiveDateTime;

/// Request model for creating a reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReminderRequest {
    pub title: String,
    pub description: String,
    pub reminder_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Use-case service wrapper for reminder persistence.
pub struct ReminderService<R: ReminderRepository> {
    repo: R,
}

impl<R: ReminderRepository> ReminderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_reminder(&self, request: &CreateReminderRequest) -> RepoResult<Reminder> {
        let mut reminder = Reminder::new(
            request.title.trim(),
            request.reminder_time,
            request.created_at,
        );
        reminder.description = request.description.clone();
        self.repo.create_reminder(&reminder)?;
        Ok(reminder)
    }

    pub fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<Reminder>> {
        self.repo.get_reminder(id)
    }

    pub fn list_reminders(&self, query: &ReminderListQuery) -> RepoResult<Vec<Reminder>> {
        self.repo.list_reminders(query)
    }

    /// Reminders that should already have fired at `now`, oldest first.
    pub fn list_due(&self, now: NaiveDateTime) -> RepoResult<Vec<Reminder>> {
        self.repo.list_reminders(&ReminderListQuery {
            due_before: Some(now),
            ..ReminderListQuery::default()
        })
    }

    pub fn delete_reminder(&self, id: ReminderId) -> RepoResult<()> {
        self.repo.delete_reminder(id)
    }
}

//! Reminder repository contract and SQLite implementation.

use super::{parse_uuid, push_pagination, RepoError, RepoResult};
use crate::model::reminder::{Reminder, ReminderId};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    reminder_time,
    created_at
FROM reminders";

/// Filter and pagination options for listing reminders.
#[derive(Debug, Clone, Default)]
pub struct ReminderListQuery {
    /// Only reminders firing at or before this instant.
    pub due_before: Option<NaiveDateTime>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for reminder persistence.
pub trait ReminderRepository {
    fn create_reminder(&self, reminder: &Reminder) -> RepoResult<ReminderId>;
    fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<Reminder>>;
    fn list_reminders(&self, query: &ReminderListQuery) -> RepoResult<Vec<Reminder>>;
    fn delete_reminder(&self, id: ReminderId) -> RepoResult<()>;
}

/// SQLite-backed reminder repository.
pub struct SqliteReminderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReminderRepository for SqliteReminderRepository<'_> {
    fn create_reminder(&self, reminder: &Reminder) -> RepoResult<ReminderId> {
        reminder.validate()?;

        self.conn.execute(
            "INSERT INTO reminders (id, title, description, reminder_time, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                reminder.id.to_string(),
                reminder.title.as_str(),
                reminder.description.as_str(),
                reminder.reminder_time,
                reminder.created_at,
            ],
        )?;

        Ok(reminder.id)
    }

    fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<Reminder>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_reminder_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_reminders(&self, query: &ReminderListQuery) -> RepoResult<Vec<Reminder>> {
        let mut sql = format!("{REMINDER_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(due_before) = query.due_before {
            sql.push_str(" AND reminder_time <= ?");
            // Same text encoding rusqlite uses for `NaiveDateTime` columns.
            bind_values.push(Value::Text(
                due_before.format("%F %T%.f").to_string(),
            ));
        }

        sql.push_str(" ORDER BY reminder_time ASC, id ASC");
        push_pagination(&mut sql, &mut bind_values, query.limit, query.offset);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut reminders = Vec::new();
        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }

        Ok(reminders)
    }

    fn delete_reminder(&self, id: ReminderId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM reminders WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "reminder",
                id,
            });
        }
        Ok(())
    }
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<Reminder> {
    let id_text: String = row.get("id")?;
    let reminder = Reminder {
        id: parse_uuid("reminders", &id_text)?,
        title: row.get("title")?,
        description: row.get("description")?,
        reminder_time: row.get("reminder_time")?,
        created_at: row.get("created_at")?,
    };
    reminder.validate()?;
    Ok(reminder)
}

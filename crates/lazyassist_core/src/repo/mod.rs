//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for tasks and reminders.
//! - Keep SQL details out of services and the command orchestrator.
//!
//! # Invariants
//! - Write paths validate the model before any SQL mutation.
//! - Read paths reject malformed persisted rows instead of masking them.
//! - Missing rows on update/delete surface as `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::task::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod reminder_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by task and reminder persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: Uuid },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_uuid(table: &str, raw: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{raw}` in {table}.id")))
}

/// Appends `LIMIT`/`OFFSET` clauses for optional pagination.
pub(crate) fn push_pagination(
    sql: &mut String,
    bind_values: &mut Vec<rusqlite::types::Value>,
    limit: Option<u32>,
    offset: u32,
) {
    use rusqlite::types::Value;

    match limit {
        Some(limit) => {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }
        None if offset > 0 => sql.push_str(" LIMIT -1"),
        None => return,
    }
    if offset > 0 {
        sql.push_str(" OFFSET ?");
        bind_values.push(Value::Integer(i64::from(offset)));
    }
}

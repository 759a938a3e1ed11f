//! Task use-case service.
//!
//! # Responsibility
//! - Provide create/update/complete/delete/list entry points for tasks.
//! - Apply partial updates with explicit "clear deadline" semantics.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Updates on a missing task return `RepoError::NotFound`.

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{TaskListQuery, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;

/// Request model for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// Partial update for an existing task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the deadline.
    pub deadline: Option<Option<NaiveDateTime>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Use-case service wrapper for task persistence.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an open task and returns the stored record.
    pub fn create_task(&self, request: &CreateTaskRequest) -> RepoResult<Task> {
        let mut task = Task::new(request.title.trim(), request.created_at);
        task.description = request.description.clone();
        task.deadline = request.deadline;
        self.repo.create_task(&task)?;
        Ok(task)
    }

    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    pub fn list_tasks(&self, query: &TaskListQuery) -> RepoResult<Vec<Task>> {
        self.repo.list_tasks(query)
    }

    /// Open tasks whose deadline is before `now`, earliest first.
    pub fn list_overdue(&self, now: NaiveDateTime) -> RepoResult<Vec<Task>> {
        let open = self.repo.list_tasks(&TaskListQuery {
            completed: Some(false),
            ..TaskListQuery::default()
        })?;
        Ok(open.into_iter().filter(|task| task.is_overdue(now)).collect())
    }

    /// Applies `patch` to the task and persists it.
    pub fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let mut task = self
            .repo
            .get_task(id)?
            .ok_or(RepoError::NotFound { entity: "task", id })?;
        patch.apply(&mut task);
        self.repo.update_task(&task)?;
        Ok(task)
    }

    pub fn complete_task(&self, id: TaskId) -> RepoResult<Task> {
        self.update_task(
            id,
            &TaskPatch {
                completed: Some(true),
                ..TaskPatch::default()
            },
        )
    }

    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.repo.delete_task(id)
    }
}

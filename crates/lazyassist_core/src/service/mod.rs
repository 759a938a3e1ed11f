//! Core use-case services.
//!
//! # Responsibility
//! - Wrap repositories into use-case level APIs for tasks and reminders.
//! - Orchestrate natural-language commands across NLP, storage and feeds.
//!
//! # Invariants
//! - Services stay storage-agnostic; they only see repository traits.

pub mod command_service;
pub mod reminder_service;
pub mod task_service;

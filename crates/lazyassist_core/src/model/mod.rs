//! Domain model for assistant-managed entities.
//!
//! # Responsibility
//! - Define task and reminder records shared by repositories and services.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID v4.
//! - Timestamps are local wall-clock `NaiveDateTime` values, matching what
//!   the temporal resolver produces.

pub mod reminder;
pub mod task;

//! Natural-language command understanding.
//!
//! # Responsibility
//! - Classify free-text commands into intents with raw slots.
//! - Resolve temporal phrases into absolute local timestamps.
//! - Answer a small set of canned questions.
//!
//! # Invariants
//! - Every function here is pure and synchronous; pattern tables are built
//!   once and never mutated, so calls are safe from any thread.
//! - Nothing here returns an error: absence is expressed as `None` or
//!   `Classification::Unknown`.

pub mod answer;
pub mod intent;
pub mod temporal;

pub use answer::answer;
pub use intent::{classify, Classification, Intent};
pub use temporal::{resolve, resolve_detailed, Resolution, TemporalRule};

//! Versioned document migration engine.
//!
//! When the setting schema evolves — keys renamed, values restructured,
//! settings removed — documents written by older versions of the application
//! must be upgraded before their values are extracted. The engine does this
//! with *fixers*: transforms registered under an integer source version `v`,
//! each defined to upgrade a document from version `v` to `v + 1`.
//!
//! # Why one step at a time? (for beginners)
//!
//! A document at version 1 being loaded by schema version 4 is migrated
//! 1 → 2 → 3 → 4, never 1 → 4 directly. Each fixer only has to understand a
//! single schema delta, which keeps fixers composable and independently
//! testable — and means a fixer is written once when the schema changes and
//! never touched again, no matter how far the schema evolves afterwards.

mod engine;
mod fixers;

pub use engine::{Fixer, FixerFailure, MigrateError, MigrationPlan, MigrationReport};
pub use fixers::rename_key;

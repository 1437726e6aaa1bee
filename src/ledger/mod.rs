/// The habit ledger: an in-memory store for habits and their completion log
///
/// This module owns the habit collection, keeps the completion log
/// consistent with it, and recomputes the derived streak and completed
/// fields whenever the log changes.

pub mod memory;

// Re-export the main ledger types
pub use memory::*;

use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur during ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
}

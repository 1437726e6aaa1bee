/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Habit, CompletionRecord) and the
/// streak calculation that derives habit state from the completion log.

pub mod completion;
pub mod habit;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use completion::*;
pub use habit::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),
}

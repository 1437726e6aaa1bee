/// Habit entity and related functionality
///
/// This module defines the core Habit struct that represents something the
/// user wants to do regularly, along with validation rules for names,
/// descriptions, and tags.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, HabitId};

/// A habit represents something the user wants to do regularly
///
/// This is the core entity in our system. The `streak` and `completed`
/// fields are derived from the completion log: the ledger recomputes them
/// whenever the log changes, and they are never accepted from callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Free-form labels, de-duplicated, kept in first-seen order
    pub tags: Vec<String>,
    /// Current consecutive-day run, derived from the completion log
    pub streak: u32,
    /// Whether today's completion record is marked completed, derived
    pub completed: bool,
    /// Which day this habit was created (day granularity)
    pub created_at: NaiveDate,
}

/// A partial update for a habit
///
/// Only the fields a caller may change are present; `id`, `created_at`, and
/// the derived fields have no path through here. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HabitUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// This is the main constructor that validates all fields and returns
    /// an error if any validation fails. New habits start with no streak
    /// and no completion for the creation day.
    pub fn new(
        name: String,
        description: String,
        tags: Vec<String>,
        created_at: NaiveDate,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;
        Self::validate_description(&description)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            description,
            tags: normalize_tags(tags),
            streak: 0,
            completed: false,
            created_at,
        })
    }

    /// Update the habit's properties with validation
    ///
    /// Validates the new values before applying any of them, so a rejected
    /// update leaves the habit unchanged.
    pub fn update(&mut self, update: HabitUpdate) -> Result<(), DomainError> {
        if let Some(ref new_name) = update.name {
            Self::validate_name(new_name)?;
        }

        if let Some(ref new_description) = update.description {
            Self::validate_description(new_description)?;
        }

        // Apply updates
        if let Some(new_name) = update.name {
            self.name = new_name;
        }
        if let Some(new_description) = update.description {
            self.description = new_description;
        }
        if let Some(new_tags) = update.tags {
            self.tags = normalize_tags(new_tags);
        }

        Ok(())
    }

    /// Check whether this habit carries the given tag
    pub fn is_tagged(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    // Validation helper methods

    /// Validate habit name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate the description
    fn validate_description(description: &str) -> Result<(), DomainError> {
        if description.len() > 500 {
            return Err(DomainError::Validation {
                message: "Description cannot be longer than 500 characters".to_string(),
            });
        }
        Ok(())
    }
}

/// Normalize a tag list: trim whitespace, drop empties, de-duplicate while
/// preserving first-seen order
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !normalized.iter().any(|t| t == trimmed) {
            normalized.push(trimmed.to_string());
        }
    }
    normalized
}

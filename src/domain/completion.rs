/// CompletionRecord entity for the per-day completion log
///
/// One record per (habit, day). Toggling the same day again flips the
/// existing record in place rather than inserting a second row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::HabitId;

/// A record of a habit's state on one specific day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Which habit this record is for
    pub habit_id: HabitId,
    /// Which day this record covers
    pub date: NaiveDate,
    /// Whether the habit was completed on that day
    pub completed: bool,
}

impl CompletionRecord {
    pub fn new(habit_id: HabitId, date: NaiveDate, completed: bool) -> Self {
        Self {
            habit_id,
            date,
            completed,
        }
    }
}

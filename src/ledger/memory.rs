/// In-memory implementation of the habit ledger
///
/// The ledger is an owned instance wired up by the composition root; there
/// is no module-level shared state. Every public operation completes in a
/// single synchronous step, so a caller embedding the ledger in a
/// concurrent setting must serialize access externally (e.g. behind a
/// mutex or a single-writer queue).

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{current_streak, CompletionRecord, Habit, HabitId, HabitUpdate};
use crate::ledger::LedgerError;

/// A point-in-time dump of the ledger state
///
/// Suitable for snapshot persistence by a hosting application. The derived
/// fields inside the stored habits are treated as stale cache on restore.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub habits: Vec<Habit>,
    pub completions: Vec<CompletionRecord>,
}

/// In-memory habit store with derived-state maintenance
///
/// The completion log is the source of truth for `streak` and `completed`;
/// the ledger caches them on the habit and refreshes the cache after every
/// mutation of the log. Read operations hand out clones, so callers can
/// never reach the stored habits directly.
#[derive(Debug, Default)]
pub struct Ledger {
    habits: Vec<Habit>,
    completions: Vec<CompletionRecord>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a ledger from a snapshot, recomputing derived state
    ///
    /// Uses the current date; see [`Ledger::from_snapshot_at`].
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self::from_snapshot_at(snapshot, today())
    }

    /// Restore a ledger from a snapshot as of the given date
    ///
    /// Streaks and completed flags stored in the snapshot may predate
    /// `today`, so both are recomputed from the completion log. Completion
    /// records that reference a habit missing from the snapshot are
    /// dropped.
    pub fn from_snapshot_at(snapshot: LedgerSnapshot, today: NaiveDate) -> Self {
        let LedgerSnapshot {
            habits,
            mut completions,
        } = snapshot;

        let before = completions.len();
        completions.retain(|record| habits.iter().any(|habit| habit.id == record.habit_id));
        if completions.len() < before {
            tracing::warn!(
                "Dropped {} completion records without a matching habit",
                before - completions.len()
            );
        }

        let mut ledger = Self {
            habits,
            completions,
        };

        let ids: Vec<HabitId> = ledger.habits.iter().map(|habit| habit.id.clone()).collect();
        for id in &ids {
            ledger.refresh_derived(id, today);
        }

        tracing::debug!(
            "Restored ledger with {} habits and {} completion records",
            ledger.habits.len(),
            ledger.completions.len()
        );
        ledger
    }

    /// Dump the current state for persistence by the composition root
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            habits: self.habits.clone(),
            completions: self.completions.clone(),
        }
    }

    /// List all habits in insertion order
    ///
    /// Returns clones; mutating the returned habits does not touch the
    /// store. Callers sort if they need a different order.
    pub fn list_habits(&self) -> Vec<Habit> {
        self.habits.clone()
    }

    /// Look up one habit by ID
    pub fn get_habit(&self, id: &HabitId) -> Option<Habit> {
        self.habits.iter().find(|habit| &habit.id == id).cloned()
    }

    /// Create a new habit dated today
    pub fn create_habit(
        &mut self,
        name: String,
        description: String,
        tags: Vec<String>,
    ) -> Result<Habit, LedgerError> {
        self.create_habit_on(name, description, tags, today())
    }

    /// Create a new habit with an explicit creation date
    pub fn create_habit_on(
        &mut self,
        name: String,
        description: String,
        tags: Vec<String>,
        today: NaiveDate,
    ) -> Result<Habit, LedgerError> {
        let habit = Habit::new(name, description, tags, today)?;
        tracing::debug!("Created habit: {} ({})", habit.name, habit.id.to_string());
        self.habits.push(habit.clone());
        Ok(habit)
    }

    /// Merge a partial update into an existing habit
    ///
    /// Only name, description, and tags can change here; the derived
    /// fields, the ID, and the creation date have no path through this
    /// operation.
    pub fn update_habit(&mut self, id: &HabitId, update: HabitUpdate) -> Result<Habit, LedgerError> {
        let habit = self
            .habits
            .iter_mut()
            .find(|habit| &habit.id == id)
            .ok_or_else(|| LedgerError::HabitNotFound {
                habit_id: id.to_string(),
            })?;

        habit.update(update)?;
        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id.to_string());
        Ok(habit.clone())
    }

    /// Delete a habit and purge its completion log in the same step
    ///
    /// Returns whether a habit was actually found and removed. No state is
    /// observable where the habit exists without its records or vice versa.
    pub fn delete_habit(&mut self, id: &HabitId) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| &habit.id != id);
        if self.habits.len() == before {
            return false;
        }

        self.completions.retain(|record| &record.habit_id != id);
        tracing::debug!("Deleted habit {} and its completion records", id.to_string());
        true
    }

    /// Toggle today's completion for a habit
    pub fn toggle_completion(&mut self, id: &HabitId) -> Result<bool, LedgerError> {
        self.toggle_completion_on(id, today())
    }

    /// Flip or create the completion record for the given day
    ///
    /// If no record exists for (habit, day) one is created with
    /// `completed = true`; otherwise the existing record's flag is flipped.
    /// The habit's streak and completed flag are recomputed afterwards.
    /// Returns the resulting completed value.
    pub fn toggle_completion_on(
        &mut self,
        id: &HabitId,
        today: NaiveDate,
    ) -> Result<bool, LedgerError> {
        if !self.habits.iter().any(|habit| &habit.id == id) {
            return Err(LedgerError::HabitNotFound {
                habit_id: id.to_string(),
            });
        }

        let completed = match self
            .completions
            .iter_mut()
            .find(|record| &record.habit_id == id && record.date == today)
        {
            Some(record) => {
                record.completed = !record.completed;
                record.completed
            }
            None => {
                self.completions
                    .push(CompletionRecord::new(id.clone(), today, true));
                true
            }
        };

        self.refresh_derived(id, today);
        tracing::debug!(
            "Toggled habit {} for {}: completed={}",
            id.to_string(),
            today,
            completed
        );
        Ok(completed)
    }

    /// All completion records for one habit, unordered contract
    pub fn completions_for_habit(&self, id: &HabitId) -> Vec<CompletionRecord> {
        self.completions
            .iter()
            .filter(|record| &record.habit_id == id)
            .cloned()
            .collect()
    }

    /// All completion records across habits for one date
    pub fn completions_for_date(&self, date: NaiveDate) -> Vec<CompletionRecord> {
        self.completions
            .iter()
            .filter(|record| record.date == date)
            .cloned()
            .collect()
    }

    /// Union of all tags across current habits, first-seen order
    pub fn list_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for habit in &self.habits {
            for tag in &habit.tags {
                if !tags.contains(tag) {
                    tags.push(tag.clone());
                }
            }
        }
        tags
    }

    /// Recompute the cached streak and completed flag for one habit
    fn refresh_derived(&mut self, id: &HabitId, today: NaiveDate) {
        let records = self.completions_for_habit(id);
        let streak = current_streak(&records, today);
        let completed = records
            .iter()
            .find(|record| record.date == today)
            .map(|record| record.completed)
            .unwrap_or(false);

        if let Some(habit) = self.habits.iter_mut().find(|habit| &habit.id == id) {
            habit.streak = streak;
            habit.completed = completed;
        }
    }
}

/// Midnight-normalized "today", matching the day granularity of the log
fn today() -> NaiveDate {
    Utc::now().naive_utc().date()
}

/// End-to-end workflows across the ledger and the table view
use chrono::{Duration, NaiveDate};
use habit_ledger::*;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// A ledger with eleven habits, each toggled for a different number of
    /// trailing days
    fn populated_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        for index in 0..11u32 {
            let habit = ledger
                .create_habit_on(
                    format!("Habit {}", index),
                    String::new(),
                    vec!["demo".to_string()],
                    day() - Duration::days(30),
                )
                .unwrap();

            // Habit N gets completions for the last N days ending today
            for offset in 0..index as i64 {
                ledger
                    .toggle_completion_on(&habit.id, day() - Duration::days(offset))
                    .unwrap();
            }
        }
        ledger
    }

    #[test]
    fn test_ledger_feeds_a_paginated_table() {
        let ledger = populated_ledger();

        let columns = vec![
            Column::new("Name", |habit: &Habit| habit.name.clone()),
            Column::new("Streak", |habit: &Habit| habit.streak.to_string()),
        ];
        let mut view = TableView::with_page_size(ledger.list_habits(), columns, 5).unwrap();

        assert_eq!(view.page_count(), 3);
        assert_eq!(view.current_page().len(), 5);
        assert_eq!(view.current_page()[0].name, "Habit 0");

        assert!(view.next_page());
        assert!(view.next_page());
        assert_eq!(view.current_page().len(), 1);
        assert!(!view.can_go_next());

        // The last habit was toggled for the ten trailing days
        let last = &view.current_page()[0];
        assert_eq!(last.name, "Habit 10");
        assert_eq!(last.streak, 10);
        assert_eq!(view.columns()[1].cell(last), "10");
    }

    #[test]
    fn test_full_habit_lifecycle() {
        let mut ledger = Ledger::new();

        let habit = ledger
            .create_habit_on(
                "Exercise".to_string(),
                "30 minutes of exercise".to_string(),
                vec!["health".to_string(), "fitness".to_string()],
                day(),
            )
            .unwrap();
        let id = habit.id.clone();

        // Toggle today twice: flips the same record, no second row
        assert!(ledger.toggle_completion_on(&id, day()).unwrap());
        assert!(!ledger.toggle_completion_on(&id, day()).unwrap());
        assert_eq!(ledger.completions_for_habit(&id).len(), 1);

        // Rename without touching the rest
        ledger
            .update_habit(
                &id,
                HabitUpdate {
                    name: Some("Morning Exercise".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let habit = ledger.get_habit(&id).unwrap();
        assert_eq!(habit.name, "Morning Exercise");
        assert_eq!(habit.tags, vec!["health", "fitness"]);

        // Delete cascades to the completion log
        assert!(ledger.delete_habit(&id));
        assert!(ledger.get_habit(&id).is_none());
        assert!(ledger.completions_for_habit(&id).is_empty());
    }

    #[test]
    fn test_snapshot_survives_a_file_round_trip() {
        let ledger = populated_ledger();
        let expected: Vec<(String, u32)> = ledger
            .list_habits()
            .into_iter()
            .map(|habit| (habit.name, habit.streak))
            .collect();

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("habits.json");

        let raw = serde_json::to_string_pretty(&ledger.snapshot()).unwrap();
        std::fs::write(&path, raw).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let snapshot: LedgerSnapshot = serde_json::from_str(&raw).unwrap();
        let restored = Ledger::from_snapshot_at(snapshot, day());

        let actual: Vec<(String, u32)> = restored
            .list_habits()
            .into_iter()
            .map(|habit| (habit.name, habit.streak))
            .collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_restore_on_a_later_day_ages_the_streaks() {
        let ledger = populated_ledger();
        let snapshot = ledger.snapshot();

        // Two days later every streak anchor is stale
        let restored = Ledger::from_snapshot_at(snapshot, day() + Duration::days(2));
        for habit in restored.list_habits() {
            assert_eq!(habit.streak, 0);
            assert!(!habit.completed);
        }
    }

    #[test]
    fn test_tag_filter_then_table_view() {
        let mut ledger = populated_ledger();
        ledger
            .create_habit_on(
                "Meditation".to_string(),
                String::new(),
                vec!["mindfulness".to_string()],
                day(),
            )
            .unwrap();

        let mut records = ledger.list_habits();
        records.retain(|habit| habit.is_tagged("mindfulness"));

        let view = TableView::<Habit, ()>::with_page_size(records, Vec::new(), 5).unwrap();
        assert_eq!(view.total_records(), 1);
        assert_eq!(view.current_page()[0].name, "Meditation");

        let empty = ledger
            .list_habits()
            .into_iter()
            .filter(|habit| habit.is_tagged("no-such-tag"))
            .collect::<Vec<_>>();
        let view = TableView::<Habit, ()>::with_page_size(empty, Vec::new(), 5).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.page_count(), 1);
    }
}

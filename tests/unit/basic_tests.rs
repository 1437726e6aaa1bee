/// Basic unit tests to verify core functionality
use chrono::NaiveDate;
use habit_ledger::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new(
            "Test Habit".to_string(),
            "A test habit".to_string(),
            vec!["health".to_string()],
            day(),
        );

        assert!(habit.is_ok());
        let habit = habit.unwrap();
        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.streak, 0);
    }

    #[test]
    fn test_ledger_creation() {
        let ledger = Ledger::new();
        assert!(ledger.list_habits().is_empty());
        assert!(ledger.list_tags().is_empty());
    }

    #[test]
    fn test_completion_record_creation() {
        let habit_id = HabitId::new();
        let record = CompletionRecord::new(habit_id.clone(), day(), true);

        assert_eq!(record.habit_id, habit_id);
        assert_eq!(record.date, day());
        assert!(record.completed);
    }

    #[test]
    fn test_table_view_creation() {
        let view = TableView::<u32, ()>::new((0..25).collect(), Vec::new());

        assert_eq!(view.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.page_index(), 0);
    }

    #[test]
    fn test_habit_id_string_round_trip() {
        let id = HabitId::new();
        let parsed = HabitId::from_string(&id.to_string());

        assert!(parsed.is_ok());
        assert_eq!(parsed.unwrap(), id);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut ledger = Ledger::new();
        ledger
            .create_habit_on(
                "Read".to_string(),
                String::new(),
                vec!["learning".to_string()],
                day(),
            )
            .unwrap();

        let raw = serde_json::to_string(&ledger.snapshot());
        assert!(raw.is_ok());

        let snapshot: LedgerSnapshot = serde_json::from_str(&raw.unwrap()).unwrap();
        assert_eq!(snapshot.habits.len(), 1);
        assert_eq!(snapshot.habits[0].name, "Read");
    }
}

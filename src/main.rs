/// Command line entry point for the habit ledger
///
/// This binary is the composition root: it owns the single Ledger instance,
/// loads and saves a JSON snapshot of it, and renders command output
/// through the tabular view engine. The ledger itself never touches the
/// filesystem.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use habit_ledger::{
    Column, CompletionRecord, Habit, HabitId, HabitUpdate, Ledger, LedgerError, LedgerSnapshot,
    TableView,
};

/// Get the default snapshot path with a robust fallback strategy
fn get_default_data_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|mut p| {
            p.push(".habit_ledger");
            p
        }),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push("habit_ledger");
            p
        }),
        // 3. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(".habit_ledger");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let mut data_path = potential_path.clone();
            data_path.push("habits.json");
            return Ok(data_path);
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("habit_ledger");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("habits.json");

    tracing::warn!("Using temporary directory for snapshot: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the habit ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON snapshot file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List habits as a paginated table
    List {
        /// Records per page
        #[arg(long, default_value_t = 10)]
        page_size: usize,

        /// 1-based page to show
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Only show habits carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Create a new habit
    Add {
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// May be given multiple times
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Show one habit in detail
    Show { id: String },

    /// Change a habit's name, description, or tags
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Replaces the tag list; may be given multiple times
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },

    /// Toggle today's completion for a habit
    Done { id: String },

    /// Delete a habit and its completion log
    Remove { id: String },

    /// List all tags in use
    Tags,

    /// Show completions across habits for one date (YYYY-MM-DD)
    Day { date: NaiveDate },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("habit_ledger={}", log_level))
        .with_writer(std::io::stderr) // Keep stdout for command output
        .init();

    // Determine snapshot path
    let data_path = match args.data {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_data_path()?,
    };

    info!("Using snapshot at: {}", data_path.display());

    let mut ledger = load_ledger(&data_path)?;
    run_command(&mut ledger, args.command)?;
    save_ledger(&data_path, &ledger)?;

    Ok(())
}

/// Load the ledger snapshot, seeding starter data on first run
fn load_ledger(path: &Path) -> Result<Ledger, Box<dyn std::error::Error>> {
    if path.exists() {
        let raw = std::fs::read_to_string(path)?;
        let snapshot: LedgerSnapshot = serde_json::from_str(&raw)?;
        Ok(Ledger::from_snapshot(snapshot))
    } else {
        info!("No snapshot found, seeding starter habits");
        seed_starter_ledger()
    }
}

/// Save the ledger state back to the snapshot file
fn save_ledger(path: &Path, ledger: &Ledger) -> Result<(), Box<dyn std::error::Error>> {
    let raw = serde_json::to_string_pretty(&ledger.snapshot())?;
    std::fs::write(path, raw)?;
    Ok(())
}

/// Build the starter ledger a fresh install begins with
///
/// A small set of example habits with a deterministic 60-day completion
/// history (roughly three days out of four, phased per habit), so streaks
/// and the calendar view have something to show immediately.
fn seed_starter_ledger() -> Result<Ledger, Box<dyn std::error::Error>> {
    let today = chrono::Utc::now().naive_utc().date();

    let starters: [(&str, &str, &[&str]); 8] = [
        ("Drink Water", "Drink 8 glasses of water daily", &["health"]),
        ("Meditation", "Meditate for 10 minutes", &["mindfulness", "health"]),
        ("Read", "Read for 30 minutes", &["productivity", "learning"]),
        ("Exercise", "30 minutes of exercise", &["health", "fitness"]),
        ("Journal", "Write in journal", &["mindfulness", "productivity"]),
        ("Learn a Language", "Practice for 20 minutes", &["learning", "productivity"]),
        ("Stretch", "Stretch for 10 minutes", &["health", "fitness"]),
        ("No Social Media", "Avoid social media until noon", &["productivity", "mindfulness"]),
    ];

    let mut snapshot = LedgerSnapshot::default();
    for (index, (name, description, tags)) in starters.iter().enumerate() {
        let habit = Habit::new(
            name.to_string(),
            description.to_string(),
            tags.iter().map(|tag| tag.to_string()).collect(),
            today - chrono::Duration::days(90),
        )?;

        for offset in 0..60i64 {
            if (offset + index as i64) % 4 == 0 {
                continue;
            }
            snapshot.completions.push(CompletionRecord::new(
                habit.id.clone(),
                today - chrono::Duration::days(offset),
                true,
            ));
        }

        snapshot.habits.push(habit);
    }

    Ok(Ledger::from_snapshot_at(snapshot, today))
}

fn parse_id(raw: &str) -> Result<HabitId, Box<dyn std::error::Error>> {
    HabitId::from_string(raw).map_err(|e| format!("Invalid habit id '{}': {}", raw, e).into())
}

fn run_command(ledger: &mut Ledger, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::List {
            page_size,
            page,
            tag,
        } => {
            let mut records = ledger.list_habits();
            if let Some(ref tag) = tag {
                records.retain(|habit| habit.is_tagged(tag));
            }

            let columns = vec![
                Column::new("Name", |habit: &Habit| habit.name.clone()),
                Column::new("Streak", |habit: &Habit| habit.streak.to_string()),
                Column::new("Today", |habit: &Habit| {
                    if habit.completed { "done".to_string() } else { "-".to_string() }
                }),
                Column::new("Tags", |habit: &Habit| habit.tags.join(", ")),
                Column::new("Id", |habit: &Habit| habit.id.to_string()),
            ];

            let mut view = TableView::with_page_size(records, columns, page_size)?;
            for _ in 1..page {
                if !view.next_page() {
                    break;
                }
            }

            render_table(&view);
        }

        Command::Add {
            name,
            description,
            tags,
        } => {
            let habit = ledger.create_habit(name, description, tags)?;
            println!("Created habit '{}' ({})", habit.name, habit.id.to_string());
        }

        Command::Show { id } => {
            let id = parse_id(&id)?;
            match ledger.get_habit(&id) {
                Some(habit) => {
                    let records = ledger.completions_for_habit(&id);
                    let done_days = records.iter().filter(|record| record.completed).count();

                    println!("{}", habit.name);
                    if !habit.description.is_empty() {
                        println!("  {}", habit.description);
                    }
                    println!("  Tags:      {}", habit.tags.join(", "));
                    println!("  Created:   {}", habit.created_at);
                    println!("  Streak:    {}", habit.streak);
                    println!("  Today:     {}", if habit.completed { "done" } else { "not done" });
                    println!("  Logged:    {} days ({} completed)", records.len(), done_days);
                }
                None => println!("No habit with id {}", id.to_string()),
            }
        }

        Command::Edit {
            id,
            name,
            description,
            tags,
        } => {
            let id = parse_id(&id)?;
            let update = HabitUpdate {
                name,
                description,
                tags,
            };
            match ledger.update_habit(&id, update) {
                Ok(habit) => println!("Updated habit '{}'", habit.name),
                Err(LedgerError::HabitNotFound { habit_id }) => {
                    println!("No habit with id {}", habit_id)
                }
                Err(e) => return Err(e.into()),
            }
        }

        Command::Done { id } => {
            let id = parse_id(&id)?;
            match ledger.toggle_completion(&id) {
                Ok(completed) => {
                    // The toggle refreshed the derived fields; re-read for the streak
                    if let Some(habit) = ledger.get_habit(&id) {
                        if completed {
                            println!("Marked '{}' done for today (streak: {})", habit.name, habit.streak);
                        } else {
                            println!("Marked '{}' not done for today (streak: {})", habit.name, habit.streak);
                        }
                    }
                }
                Err(LedgerError::HabitNotFound { habit_id }) => {
                    println!("No habit with id {}", habit_id)
                }
                Err(e) => return Err(e.into()),
            }
        }

        Command::Remove { id } => {
            let id = parse_id(&id)?;
            if ledger.delete_habit(&id) {
                println!("Removed habit and its completion log");
            } else {
                println!("No habit with id {}", id.to_string());
            }
        }

        Command::Tags => {
            let tags = ledger.list_tags();
            if tags.is_empty() {
                println!("No tags in use.");
            } else {
                for tag in tags {
                    println!("{}", tag);
                }
            }
        }

        Command::Day { date } => {
            let records = ledger.completions_for_date(date);
            if records.is_empty() {
                println!("No completions recorded for {}.", date);
            } else {
                for record in records {
                    let name = ledger
                        .get_habit(&record.habit_id)
                        .map(|habit| habit.name)
                        .unwrap_or_else(|| record.habit_id.to_string());
                    println!("{}: {}", name, if record.completed { "done" } else { "missed" });
                }
            }
        }
    }

    Ok(())
}

/// Print the current page of a habit table with aligned columns
fn render_table(view: &TableView<Habit>) {
    if view.is_empty() {
        println!("No results.");
        return;
    }

    let rows: Vec<Vec<String>> = view
        .current_page()
        .iter()
        .map(|habit| view.columns().iter().map(|column| column.cell(habit)).collect())
        .collect();

    let widths: Vec<usize> = view
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(column.header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = view
        .columns()
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column.header, width = *width))
        .collect();
    println!("{}", header.join("  "));

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    println!("{}", rule.join("  "));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        println!("{}", cells.join("  "));
    }

    println!(
        "Page {} of {} ({} habits)",
        view.page_index() + 1,
        view.page_count(),
        view.total_records()
    );
}

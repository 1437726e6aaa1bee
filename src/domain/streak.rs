/// Streak calculation over a habit's completion log
///
/// The streak is derived state: it is recomputed from the completion
/// records whenever the log changes and is never edited directly. "Today"
/// is passed in by the caller so the calculation stays deterministic under
/// test.

use chrono::NaiveDate;

use crate::domain::CompletionRecord;

/// Calculate the current streak from one habit's completion records
///
/// Only records marked completed count. The most recent completed day must
/// be today or yesterday for the streak to be alive at all; a completion
/// from two or more days ago anchors nothing. From the anchor the streak
/// extends backwards through exactly-consecutive days and stops at the
/// first larger gap.
///
/// The records are expected to belong to a single habit and to hold at most
/// one entry per day; the ledger maintains both invariants.
pub fn current_streak(records: &[CompletionRecord], today: NaiveDate) -> u32 {
    let mut done_days: Vec<NaiveDate> = records
        .iter()
        .filter(|record| record.completed)
        .map(|record| record.date)
        .collect();

    if done_days.is_empty() {
        return 0;
    }

    // Sort completed days newest first
    done_days.sort_unstable_by(|a, b| b.cmp(a));

    let most_recent = done_days[0];
    if (today - most_recent).num_days() > 1 {
        return 0;
    }

    // The anchor day itself counts as 1, then walk backwards while
    // consecutive days are exactly one apart.
    let mut streak = 1;
    for pair in done_days.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

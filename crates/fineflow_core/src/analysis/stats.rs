//! Journaling summary counters for profile and mood screens.

use crate::analysis::growth::journal_days_in;
use crate::model::entry::Entry;
use chrono::{DateTime, Days, Local, TimeZone};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JournalStats {
    pub total_entries: usize,
    /// Entries whose local date is today.
    pub today_entries: usize,
    /// Distinct local days with at least one entry.
    pub days_logged: usize,
    /// Consecutive journaling days ending today, or yesterday when today
    /// has no entry yet.
    pub current_streak: usize,
}

impl JournalStats {
    pub fn compute_at<Tz: TimeZone>(entries: &[Entry], now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let days = journal_days_in(entries, &tz);

        let mut cursor = if days.contains(&today) {
            Some(today)
        } else {
            today.checked_sub_days(Days::new(1))
        };
        let mut current_streak = 0;
        while let Some(day) = cursor.filter(|day| days.contains(day)) {
            current_streak += 1;
            cursor = day.checked_sub_days(Days::new(1));
        }

        Self {
            total_entries: entries.len(),
            today_entries: entries
                .iter()
                .filter(|entry| entry.local_date(&tz) == today)
                .count(),
            days_logged: days.len(),
            current_streak,
        }
    }

    pub fn compute(entries: &[Entry]) -> Self {
        Self::compute_at(entries, &Local::now())
    }
}

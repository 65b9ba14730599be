//! Growth stage derivation from distinct journaling days.
//!
//! # Invariants
//! - Only the number of distinct local calendar days matters. Several
//!   entries on one day count once.
//! - Stages are totally ordered and non-decreasing in the day count.

use crate::model::entry::Entry;
use chrono::{Local, NaiveDate, TimeZone};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Garden growth stage, ordered from `Seed` to `Blooming`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrowthStage {
    Seed,
    Rooted,
    Sprouting,
    Growing,
    Blooming,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        Self::Seed,
        Self::Rooted,
        Self::Sprouting,
        Self::Growing,
        Self::Blooming,
    ];

    /// Maps a distinct-day count to a stage.
    ///
    /// 0 → seed, 1..=2 → rooted, 3..=6 → sprouting, 7..=14 → growing,
    /// 15+ → blooming.
    pub fn from_unique_days(unique_days: usize) -> Self {
        match unique_days {
            0 => Self::Seed,
            1..=2 => Self::Rooted,
            3..=6 => Self::Sprouting,
            7..=14 => Self::Growing,
            _ => Self::Blooming,
        }
    }

    /// Ordinal stored in the cached garden record.
    pub fn index(self) -> u8 {
        match self {
            Self::Seed => 0,
            Self::Rooted => 1,
            Self::Sprouting => 2,
            Self::Growing => 3,
            Self::Blooming => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Rooted => "rooted",
            Self::Sprouting => "sprouting",
            Self::Growing => "growing",
            Self::Blooming => "blooming",
        }
    }
}

impl Display for GrowthStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct calendar days (as seen from `tz`) that hold at least one entry.
pub fn journal_days_in<'a, I, Tz>(entries: I, tz: &Tz) -> BTreeSet<NaiveDate>
where
    I: IntoIterator<Item = &'a Entry>,
    Tz: TimeZone,
{
    entries.into_iter().map(|entry| entry.local_date(tz)).collect()
}

/// Count of distinct calendar days in `tz` holding at least one entry.
pub fn unique_days_in<Tz: TimeZone>(entries: &[Entry], tz: &Tz) -> usize {
    journal_days_in(entries, tz).len()
}

/// Count of distinct local calendar days holding at least one entry.
pub fn unique_days(entries: &[Entry]) -> usize {
    unique_days_in(entries, &Local)
}

pub fn derive_stage_in<Tz: TimeZone>(entries: &[Entry], tz: &Tz) -> GrowthStage {
    GrowthStage::from_unique_days(unique_days_in(entries, tz))
}

/// Derives the growth stage from live entries in the local timezone.
pub fn derive_stage(entries: &[Entry]) -> GrowthStage {
    derive_stage_in(entries, &Local)
}

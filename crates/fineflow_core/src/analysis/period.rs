//! Relative period filtering.
//!
//! # Invariants
//! - The anchor is the start of the local calendar day of `now`, computed
//!   once per call.
//! - `Today` is an exact calendar-day match. Week/month/year only bound from
//!   below, so future-dated entries pass them.
//! - Output keeps input order and borrows from the input.

use crate::model::entry::Entry;
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named relative window used to scope entries before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisPeriod {
    Today,
    Week,
    Month,
    Year,
}

impl AnalysisPeriod {
    pub const ALL: [AnalysisPeriod; 4] = [Self::Today, Self::Week, Self::Month, Self::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Human-readable label for period pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Year => "This Year",
        }
    }

    /// Returns whether an entry dated `entry_local` (local wall time) falls in
    /// this period anchored at `anchor`.
    fn contains(self, anchor: NaiveDate, entry_local: NaiveDateTime) -> bool {
        match self {
            Self::Today => entry_local.date() == anchor,
            Self::Week => at_or_after(entry_local, anchor.checked_sub_days(Days::new(7))),
            Self::Month => at_or_after(entry_local, shift_months_overflowing(anchor, -1)),
            Self::Year => at_or_after(entry_local, shift_months_overflowing(anchor, -12)),
        }
    }
}

impl Display for AnalysisPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown period name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPeriod(pub String);

impl Display for UnknownPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown period `{}`; expected today|week|month|year",
            self.0
        )
    }
}

impl std::error::Error for UnknownPeriod {}

impl FromStr for AnalysisPeriod {
    type Err = UnknownPeriod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|period| period.as_str() == normalized)
            .ok_or_else(|| UnknownPeriod(value.to_string()))
    }
}

/// Selects entries inside `period`, anchored at the local day of `now`.
pub fn filter_by_period_at<'a, Tz: TimeZone>(
    entries: &'a [Entry],
    period: AnalysisPeriod,
    now: &DateTime<Tz>,
) -> Vec<&'a Entry> {
    let tz = now.timezone();
    let anchor = now.date_naive();

    entries
        .iter()
        .filter(|entry| period.contains(anchor, entry.date.with_timezone(&tz).naive_local()))
        .collect()
}

/// Selects entries inside `period`, anchored at the current local day.
pub fn filter_by_period(entries: &[Entry], period: AnalysisPeriod) -> Vec<&Entry> {
    filter_by_period_at(entries, period, &Local::now())
}

/// `bound` is the first included day; `None` means the window underflowed
/// the calendar and nothing is cut.
fn at_or_after(entry_local: NaiveDateTime, bound: Option<NaiveDate>) -> bool {
    bound.map_or(true, |day| entry_local >= day.and_time(NaiveTime::MIN))
}

/// Calendar-month shift that keeps the day number and lets overflow roll
/// forward: Mar 31 minus one month is Mar 3 (Mar 2 in leap years), and
/// Feb 29 minus a year is Mar 1.
fn shift_months_overflowing(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let month_index = date.year() * 12 + date.month0() as i32 + months;
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day0())))
}

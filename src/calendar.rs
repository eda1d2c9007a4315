//! Helpers for placing matches on the calendar.

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

/// Returns the next date strictly after `current` whose weekday is in `allowed`.
///
/// Scans forward one day at a time for up to 7 days, so a date on an allowed weekday moves
/// to the following week rather than staying in place. If `allowed` is empty the next day
/// is returned instead of scanning forever. The time of day is preserved.
pub fn next_match_date(current: DateTime<Utc>, allowed: &[Weekday]) -> DateTime<Utc> {
    for days in 1..=7 {
        let candidate = current + Duration::days(days);

        if allowed.contains(&candidate.weekday()) {
            return candidate;
        }
    }

    current + Duration::days(1)
}

/// An infinite iterator over successive match days.
///
/// Each step applies [`next_match_date`], yielding the dates consecutive rounds would be
/// played on.
#[derive(Clone, Debug)]
pub struct MatchDays<'a> {
    current: DateTime<Utc>,
    allowed: &'a [Weekday],
}

impl<'a> MatchDays<'a> {
    /// Creates a new `MatchDays` iterator starting after `start`.
    ///
    /// `start` itself is never yielded.
    pub fn new(start: DateTime<Utc>, allowed: &'a [Weekday]) -> Self {
        Self {
            current: start,
            allowed,
        }
    }
}

impl<'a> Iterator for MatchDays<'a> {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        self.current = next_match_date(self.current, self.allowed);
        Some(self.current)
    }
}

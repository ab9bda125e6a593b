use crate::models::DailyQuotaState;
use chrono::{NaiveDate, Utc};

/// Default daily like limit for non-premium viewers
pub const DEFAULT_DAILY_LIMIT: u32 = 20;

/// Outcome of one quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    Allowed,
    /// Not an error; the caller branches on it
    Denied,
}

/// Tracks accepts against a per-day limit
///
/// The counter is keyed to a calendar day; any check on a different day
/// resets it before evaluating. Checks are atomic within the single-threaded
/// turn: either the count increments and the check is Allowed, or nothing
/// changes.
#[derive(Debug, Clone)]
pub struct DailyQuotaTracker {
    state: DailyQuotaState,
    limit: u32,
}

impl DailyQuotaTracker {
    pub fn new(limit: u32) -> Self {
        Self {
            state: DailyQuotaState {
                date: Utc::now().date_naive(),
                count: 0,
            },
            limit,
        }
    }

    /// Restore from a persisted record; a stale date is handled lazily on
    /// the next check
    pub fn from_state(state: DailyQuotaState, limit: u32) -> Self {
        Self { state, limit }
    }

    /// Check the quota for today's date and consume one unit if allowed
    pub fn check_and_consume(&mut self, unlimited: bool) -> QuotaDecision {
        self.check_and_consume_on(Utc::now().date_naive(), unlimited)
    }

    /// Check the quota against an explicit date (injected clock)
    ///
    /// An unlimited viewer is always allowed and never increments the count.
    pub fn check_and_consume_on(&mut self, today: NaiveDate, unlimited: bool) -> QuotaDecision {
        if self.state.date != today {
            self.state = DailyQuotaState { date: today, count: 0 };
        }

        if unlimited {
            return QuotaDecision::Allowed;
        }

        if self.state.count < self.limit {
            self.state.count += 1;
            QuotaDecision::Allowed
        } else {
            QuotaDecision::Denied
        }
    }

    /// Likes left today, for display; resets nothing
    pub fn remaining_on(&self, today: NaiveDate) -> u32 {
        if self.state.date != today {
            self.limit
        } else {
            self.limit.saturating_sub(self.state.count)
        }
    }

    /// Current record, for persistence
    pub fn state(&self) -> DailyQuotaState {
        self.state
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_boundary_at_limit() {
        let today = day("2026-08-23");
        let mut tracker = DailyQuotaTracker::from_state(
            DailyQuotaState { date: today, count: 19 },
            DEFAULT_DAILY_LIMIT,
        );

        assert_eq!(tracker.check_and_consume_on(today, false), QuotaDecision::Allowed);
        assert_eq!(tracker.state().count, 20);

        assert_eq!(tracker.check_and_consume_on(today, false), QuotaDecision::Denied);
        assert_eq!(tracker.state().count, 20);
    }

    #[test]
    fn test_stale_date_resets_before_evaluating() {
        let yesterday = day("2026-08-22");
        let today = day("2026-08-23");
        let mut tracker = DailyQuotaTracker::from_state(
            DailyQuotaState { date: yesterday, count: 20 },
            DEFAULT_DAILY_LIMIT,
        );

        assert_eq!(tracker.check_and_consume_on(today, false), QuotaDecision::Allowed);
        assert_eq!(tracker.state(), DailyQuotaState { date: today, count: 1 });
    }

    #[test]
    fn test_unlimited_never_increments() {
        let today = day("2026-08-23");
        let mut tracker = DailyQuotaTracker::from_state(
            DailyQuotaState { date: today, count: 20 },
            DEFAULT_DAILY_LIMIT,
        );

        assert_eq!(tracker.check_and_consume_on(today, true), QuotaDecision::Allowed);
        assert_eq!(tracker.state().count, 20);
    }

    #[test]
    fn test_remaining() {
        let today = day("2026-08-23");
        let tracker = DailyQuotaTracker::from_state(
            DailyQuotaState { date: today, count: 5 },
            DEFAULT_DAILY_LIMIT,
        );

        assert_eq!(tracker.remaining_on(today), 15);
        assert_eq!(tracker.remaining_on(day("2026-08-24")), 20);
    }
}

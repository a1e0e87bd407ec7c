//! Daily win streak

use crate::daily::DateKey;
use serde::{Deserialize, Serialize};

/// Consecutive-day win streak
///
/// Only daily puzzles update the streak. Days are calendar dates in the
/// reference timezone, so "yesterday" is the previous date rather than
/// 24 hours ago.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakRecord {
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_win_date: Option<DateKey>,
}

impl StreakRecord {
    /// Apply the outcome of the daily puzzle for `today`
    ///
    /// Repeating a call with the same arguments changes nothing.
    ///
    /// # Examples
    /// ```
    /// use daily_wordle::daily::DateKey;
    /// use daily_wordle::progress::StreakRecord;
    ///
    /// let mut streak = StreakRecord::default();
    /// streak.record_outcome(true, DateKey::from_ymd(2024, 1, 1).unwrap());
    /// streak.record_outcome(true, DateKey::from_ymd(2024, 1, 2).unwrap());
    /// assert_eq!(streak.current_streak, 2);
    /// ```
    pub fn record_outcome(&mut self, won: bool, today: DateKey) {
        if won {
            match self.last_win_date {
                Some(last) if last == today => return,
                Some(last) if Some(last) == today.yesterday() => self.current_streak += 1,
                _ => self.current_streak = 1,
            }
            self.best_streak = self.best_streak.max(self.current_streak);
            self.last_win_date = Some(today);
        } else if self.last_win_date != Some(today) {
            self.current_streak = 0;
        }
    }

    /// Restore `best_streak >= current_streak`; returns whether anything changed
    pub fn repair(&mut self) -> bool {
        if self.best_streak < self.current_streak {
            self.best_streak = self.current_streak;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> DateKey {
        DateKey::from_ymd(2024, 1, d).unwrap()
    }

    #[test]
    fn consecutive_wins_increment_by_one() {
        let mut streak = StreakRecord::default();
        for d in 1..=4 {
            streak.record_outcome(true, day(d));
            assert_eq!(streak.current_streak, d);
        }
        assert_eq!(streak.best_streak, 4);
        assert_eq!(streak.last_win_date, Some(day(4)));
    }

    #[test]
    fn gap_resets_to_one() {
        let mut streak = StreakRecord::default();
        streak.record_outcome(true, day(1));
        streak.record_outcome(true, day(2));
        streak.record_outcome(true, day(4));

        assert_eq!(streak.current_streak, 1);
        assert_eq!(streak.best_streak, 2);
    }

    #[test]
    fn duplicate_delivery_is_idempotent() {
        let mut streak = StreakRecord::default();
        streak.record_outcome(true, day(1));
        streak.record_outcome(true, day(2));
        let once = streak.clone();

        streak.record_outcome(true, day(2));
        assert_eq!(streak, once);

        streak.record_outcome(false, day(3));
        let lost = streak.clone();
        streak.record_outcome(false, day(3));
        assert_eq!(streak, lost);
    }

    #[test]
    fn loss_resets_current_but_not_best() {
        let mut streak = StreakRecord::default();
        streak.record_outcome(true, day(1));
        streak.record_outcome(true, day(2));
        streak.record_outcome(false, day(3));

        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.best_streak, 2);
        assert_eq!(streak.last_win_date, Some(day(2)));

        streak.record_outcome(true, day(4));
        assert_eq!(streak.current_streak, 1);
    }

    #[test]
    fn loss_on_a_day_already_won_is_ignored() {
        let mut streak = StreakRecord::default();
        streak.record_outcome(true, day(1));
        streak.record_outcome(false, day(1));
        assert_eq!(streak.current_streak, 1);
    }

    #[test]
    fn yesterday_crosses_month_and_year() {
        let mut streak = StreakRecord::default();
        streak.record_outcome(true, DateKey::from_ymd(2023, 12, 31).unwrap());
        streak.record_outcome(true, DateKey::from_ymd(2024, 1, 1).unwrap());
        streak.record_outcome(true, DateKey::from_ymd(2024, 1, 2).unwrap());
        assert_eq!(streak.current_streak, 3);

        let mut leap = StreakRecord::default();
        leap.record_outcome(true, DateKey::from_ymd(2024, 2, 29).unwrap());
        leap.record_outcome(true, DateKey::from_ymd(2024, 3, 1).unwrap());
        assert_eq!(leap.current_streak, 2);
    }

    #[test]
    fn best_never_decreases() {
        let mut streak = StreakRecord::default();
        let mut best = 0;
        for (d, won) in [(1, true), (2, true), (3, false), (4, true), (6, true), (7, true), (8, true)] {
            streak.record_outcome(won, day(d));
            assert!(streak.best_streak >= best);
            assert!(streak.best_streak >= streak.current_streak);
            best = streak.best_streak;
        }
        assert_eq!(streak.best_streak, 3);
    }

    #[test]
    fn repair_raises_best() {
        let mut streak = StreakRecord {
            current_streak: 5,
            best_streak: 2,
            last_win_date: Some(day(1)),
        };
        assert!(streak.repair());
        assert_eq!(streak.best_streak, 5);
        assert!(!streak.repair());
    }
}

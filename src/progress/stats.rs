//! Completed-game history and derived statistics

use crate::core::Word;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGameRecord {
    pub word: Word,
    pub won: bool,
    pub attempts_used: usize,
    pub is_daily: bool,
    pub timestamp: DateTime<Utc>,
}

/// Rolling history of finished games, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(VecDeque<CompletedGameRecord>);

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting from the front beyond `cap`
    pub fn push(&mut self, record: CompletedGameRecord, cap: usize) {
        self.0.push_back(record);
        self.truncate(cap);
    }

    /// Drop the oldest records until at most `cap` remain
    pub fn truncate(&mut self, cap: usize) {
        while self.0.len() > cap {
            self.0.pop_front();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CompletedGameRecord> {
        self.0.iter()
    }
}

/// Daily wins counted by number of attempts
///
/// `attempts[i]` holds wins in `i + 1` guesses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyAttemptHistogram {
    pub attempts: Vec<u32>,
    pub total_wins: u32,
}

impl DailyAttemptHistogram {
    #[must_use]
    pub fn new(max_guesses: usize) -> Self {
        Self {
            attempts: vec![0; max_guesses],
            total_wins: 0,
        }
    }

    /// Count a win; attempts outside `1..=max_guesses` are ignored
    pub fn record_win(&mut self, attempts_used: usize, max_guesses: usize) {
        if !(1..=max_guesses).contains(&attempts_used) {
            return;
        }
        if self.attempts.len() < max_guesses {
            self.attempts.resize(max_guesses, 0);
        }
        self.attempts[attempts_used - 1] += 1;
        self.total_wins += 1;
    }

    /// Wins in exactly `attempts` guesses
    #[must_use]
    pub fn wins_in(&self, attempts: usize) -> u32 {
        attempts
            .checked_sub(1)
            .and_then(|i| self.attempts.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Fit the buckets to `max_guesses` and make `total_wins` their sum
    ///
    /// Returns whether anything changed.
    pub fn repair(&mut self, max_guesses: usize) -> bool {
        let before = self.clone();
        self.attempts.resize(max_guesses, 0);
        self.total_wins = self.attempts.iter().sum();
        *self != before
    }
}

/// Aggregate statistics derived from the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate_percent: u32,
    /// `guess_distribution[i]` holds wins in `i + 1` guesses; sums to `wins`
    pub guess_distribution: Vec<usize>,
}

/// Record a finished game in the history and, for daily wins, the histogram
pub fn record_completion(
    history: &mut History,
    histogram: &mut DailyAttemptHistogram,
    record: CompletedGameRecord,
    history_cap: usize,
    max_guesses: usize,
) {
    if record.won && record.is_daily {
        histogram.record_win(record.attempts_used, max_guesses);
    }
    history.push(record, history_cap);
}

/// Summarize `history`
///
/// The distribution has `max_guesses` buckets, grown if the history holds
/// wins that took more guesses than that.
///
/// # Examples
/// ```
/// use daily_wordle::progress::{History, compute_summary};
///
/// let summary = compute_summary(&History::new(), 6);
/// assert_eq!(summary.win_rate_percent, 0);
/// assert_eq!(summary.guess_distribution, vec![0; 6]);
/// ```
#[must_use]
pub fn compute_summary(history: &History, max_guesses: usize) -> Summary {
    let mut guess_distribution = vec![0usize; max_guesses];
    let mut wins = 0;

    for record in history.iter().filter(|r| r.won) {
        wins += 1;
        let bucket = record.attempts_used.max(1) - 1;
        if bucket >= guess_distribution.len() {
            guess_distribution.resize(bucket + 1, 0);
        }
        guess_distribution[bucket] += 1;
    }

    let total_games = history.len();
    Summary {
        total_games,
        wins,
        losses: total_games - wins,
        win_rate_percent: win_rate_percent(wins, total_games),
        guess_distribution,
    }
}

/// `round(100 * wins / total)` with halves rounding up; 0 for no games
fn win_rate_percent(wins: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rate = (wins * 100 + total / 2) / total;
    u32::try_from(rate).unwrap_or(100)
}

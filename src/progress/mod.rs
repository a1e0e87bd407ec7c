//! Player progress across games
//!
//! [`PlayerProgress`] loads the streak, history and histogram from the store,
//! applies [`CompletionEvent`]s to them and writes them back.

mod stats;
mod streak;

pub use stats::{
    CompletedGameRecord, DailyAttemptHistogram, History, Summary, compute_summary,
    record_completion,
};
pub use streak::StreakRecord;

use crate::config::GameConfig;
use crate::session::CompletionEvent;
use crate::store::{
    HISTOGRAM_KEY, HISTORY_KEY, PersistedStore, STREAK_KEY, load_json, save_json_or_warn,
};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerProgress {
    pub streak: StreakRecord,
    pub history: History,
    pub histogram: DailyAttemptHistogram,
    history_cap: usize,
    max_guesses: usize,
}

impl PlayerProgress {
    /// Empty progress for a new player
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            streak: StreakRecord::default(),
            history: History::new(),
            histogram: DailyAttemptHistogram::new(config.max_guesses),
            history_cap: config.history_cap,
            max_guesses: config.max_guesses,
        }
    }

    /// Load from `store`, repairing anything inconsistent
    ///
    /// Missing or malformed values start from their defaults.
    pub async fn load(store: &dyn PersistedStore, config: &GameConfig) -> Self {
        let mut progress = Self::new(config);

        if let Some(mut streak) = load_json::<StreakRecord>(store, STREAK_KEY).await {
            if streak.repair() {
                warn!(current = streak.current_streak, "repaired best streak below current");
            }
            progress.streak = streak;
        }

        if let Some(mut history) = load_json::<History>(store, HISTORY_KEY).await {
            history.truncate(config.history_cap);
            progress.history = history;
        }

        if let Some(mut histogram) = load_json::<DailyAttemptHistogram>(store, HISTOGRAM_KEY).await {
            if histogram.repair(config.max_guesses) {
                warn!(total = histogram.total_wins, "repaired daily histogram");
            }
            progress.histogram = histogram;
        }

        debug!(
            streak = progress.streak.current_streak,
            games = progress.history.len(),
            "progress loaded"
        );
        progress
    }

    /// Apply a finished game and persist the result
    ///
    /// Only daily games affect the streak and histogram. Write failures are
    /// logged; the in-memory progress is updated regardless.
    pub async fn apply(
        &mut self,
        store: &dyn PersistedStore,
        event: &CompletionEvent,
        now: DateTime<Utc>,
    ) {
        if event.is_daily {
            self.streak.record_outcome(event.won, event.date);
        }

        record_completion(
            &mut self.history,
            &mut self.histogram,
            CompletedGameRecord {
                word: event.word.clone(),
                won: event.won,
                attempts_used: event.attempts_used,
                is_daily: event.is_daily,
                timestamp: now,
            },
            self.history_cap,
            self.max_guesses,
        );

        if event.is_daily {
            save_json_or_warn(store, STREAK_KEY, &self.streak, None).await;
            save_json_or_warn(store, HISTOGRAM_KEY, &self.histogram, None).await;
        }
        save_json_or_warn(store, HISTORY_KEY, &self.history, None).await;
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        compute_summary(&self.history, self.max_guesses)
    }
}

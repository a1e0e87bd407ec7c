//! Deterministic daily word selection
//!
//! Maps a calendar date to an index into the word list through a SHA-256
//! digest of the `YYYY-MM-DD` text, so every client computes the same word for
//! the same day without coordination.

use super::DateKey;
use crate::core::Word;
use crate::error::GameError;
use crate::wordlists::WordList;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Stable numeric digest of a date key
///
/// First eight bytes of SHA-256 over the date text, big-endian.
#[must_use]
pub fn date_digest(date: DateKey) -> u64 {
    let hash = Sha256::digest(date.to_string().as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash[..8]);
    u64::from_be_bytes(prefix)
}

/// Picks "today's" word from a fixed list
#[derive(Debug, Clone)]
pub struct DailyWordSelector {
    words: Arc<WordList>,
}

impl DailyWordSelector {
    #[must_use]
    pub fn new(words: Arc<WordList>) -> Self {
        Self { words }
    }

    /// Build a selector from raw words
    ///
    /// # Errors
    /// Returns `GameError::Configuration` when no word of `length` letters
    /// remains, since no puzzle could ever be started.
    pub fn from_words(words: Vec<Word>, length: usize) -> Result<Self, GameError> {
        Ok(Self::new(Arc::new(WordList::new(words, length)?)))
    }

    /// Index into the word list for `date`
    #[must_use]
    pub fn index_for(&self, date: DateKey) -> usize {
        // Widening the length first keeps the modulo exact on every platform
        (date_digest(date) % self.words.len() as u64) as usize
    }

    /// The word for `date`
    ///
    /// Depends only on the date argument and the list, never on the clock or
    /// on previous calls.
    ///
    /// # Examples
    /// ```
    /// use daily_wordle::daily::{DailyWordSelector, DateKey};
    /// use daily_wordle::wordlists::{WORDS, loader::words_from_slice};
    ///
    /// let selector = DailyWordSelector::from_words(words_from_slice(WORDS), 5).unwrap();
    /// let day: DateKey = "2024-03-09".parse().unwrap();
    /// assert_eq!(selector.select_daily_word(day), selector.select_daily_word(day));
    /// ```
    #[must_use]
    pub fn select_daily_word(&self, date: DateKey) -> Word {
        let index = self.index_for(date);
        // index < len by construction of the modulo
        self.words.words()[index].clone()
    }

    /// Words for `days` consecutive dates starting at `from`
    #[must_use]
    pub fn schedule(&self, from: DateKey, days: usize) -> Vec<(DateKey, Word)> {
        from.range(days)
            .map(|date| (date, self.select_daily_word(date)))
            .collect()
    }

    #[must_use]
    pub fn word_list(&self) -> &Arc<WordList> {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::{WORDS, loader::words_from_slice};

    fn selector() -> DailyWordSelector {
        DailyWordSelector::from_words(words_from_slice(WORDS), 5).unwrap()
    }

    fn day(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn same_date_same_word() {
        let selector = selector();
        let first = selector.select_daily_word(day("2024-06-01"));
        for _ in 0..5 {
            assert_eq!(selector.select_daily_word(day("2024-06-01")), first);
        }
    }

    #[test]
    fn independent_of_call_order() {
        let a = selector();
        let b = selector();

        let forward: Vec<Word> = ["2024-01-01", "2024-01-02", "2024-01-03"]
            .iter()
            .map(|d| a.select_daily_word(day(d)))
            .collect();
        let backward: Vec<Word> = ["2024-01-03", "2024-01-02", "2024-01-01"]
            .iter()
            .map(|d| b.select_daily_word(day(d)))
            .rev()
            .collect();

        assert_eq!(forward, backward);
    }

    #[test]
    fn digest_is_stable_and_date_sensitive() {
        assert_eq!(date_digest(day("2024-03-09")), date_digest(day("2024-03-09")));
        assert_ne!(date_digest(day("2024-03-09")), date_digest(day("2024-03-10")));
    }

    #[test]
    fn selection_covers_many_words() {
        // Not a statistical test: just guards against a digest that collapses
        let selector = selector();
        let distinct: std::collections::HashSet<Word> = selector
            .schedule(day("2024-01-01"), 120)
            .into_iter()
            .map(|(_, w)| w)
            .collect();
        assert!(distinct.len() > 60, "only {} distinct words", distinct.len());
    }

    #[test]
    fn single_word_list_always_selects_it() {
        let selector = DailyWordSelector::from_words(words_from_slice(&["react"]), 5).unwrap();
        for (_, word) in selector.schedule(day("2030-12-30"), 5) {
            assert_eq!(word.text(), "REACT");
        }
    }

    #[test]
    fn empty_word_list_is_configuration_error() {
        let err = DailyWordSelector::from_words(Vec::new(), 5).unwrap_err();
        assert!(matches!(err, GameError::Configuration { .. }));
    }

    #[test]
    fn schedule_dates_are_consecutive() {
        let schedule = selector().schedule(day("2024-12-30"), 3);
        let dates: Vec<String> = schedule.iter().map(|(d, _)| d.to_string()).collect();
        assert_eq!(dates, vec!["2024-12-30", "2024-12-31", "2025-01-01"]);
    }
}

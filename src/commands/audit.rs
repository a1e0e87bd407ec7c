//! Daily selector audit
//!
//! Maps a long run of dates to their words in parallel and reports how evenly
//! the word list is covered.

use crate::core::Word;
use crate::daily::{DailyWordSelector, DateKey};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// Coverage statistics for a run of daily words
#[derive(Debug, Clone)]
pub struct AuditResult {
    pub from: DateKey,
    pub days: usize,
    pub list_size: usize,
    pub distinct_words: usize,
    /// Highest number of days any single word was picked
    pub max_repeats: usize,
    /// Words picked `max_repeats` times, alphabetical, at most ten
    pub most_repeated: Vec<Word>,
    /// Dates whose word equals the previous date's word
    pub back_to_back: usize,
    pub duration: Duration,
}

impl AuditResult {
    /// Share of the word list that appeared at least once
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        if self.list_size == 0 {
            return 0.0;
        }
        self.distinct_words as f64 / self.list_size as f64 * 100.0
    }
}

/// Audit `days` consecutive dates starting at `from`
///
/// # Panics
///
/// Panics if the progress bar template is malformed.
#[must_use]
pub fn run_audit(
    selector: &DailyWordSelector,
    from: DateKey,
    days: usize,
    show_progress: bool,
) -> AuditResult {
    let start = Instant::now();
    let dates: Vec<DateKey> = from.range(days).collect();

    let pb = if show_progress {
        let pb = ProgressBar::new(dates.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .expect("progress template is valid")
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    // Order is preserved so neighbouring dates can be compared
    let indices: Vec<usize> = dates
        .par_iter()
        .map(|&date| {
            let index = selector.index_for(date);
            pb.inc(1);
            index
        })
        .collect();
    pb.finish_with_message("Complete!");

    let mut counts: FxHashMap<usize, usize> = FxHashMap::default();
    for &index in &indices {
        *counts.entry(index).or_insert(0) += 1;
    }

    let max_repeats = counts.values().copied().max().unwrap_or(0);
    let words = selector.word_list();
    let mut most_repeated: Vec<Word> = counts
        .iter()
        .filter(|&(_, &n)| n == max_repeats)
        .filter_map(|(&i, _)| words.get(i).cloned())
        .collect();
    most_repeated.sort();
    most_repeated.truncate(10);

    AuditResult {
        from,
        days: dates.len(),
        list_size: words.len(),
        distinct_words: counts.len(),
        max_repeats,
        most_repeated,
        back_to_back: indices.windows(2).filter(|w| w[0] == w[1]).count(),
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;
    use crate::wordlists::{WORDS, WORDS_COUNT};

    fn start() -> DateKey {
        DateKey::from_ymd(2025, 1, 1).unwrap()
    }

    #[test]
    fn counts_add_up() {
        let selector = DailyWordSelector::from_words(words_from_slice(WORDS), 5).unwrap();
        let result = run_audit(&selector, start(), 365, false);

        assert_eq!(result.days, 365);
        assert_eq!(result.list_size, WORDS_COUNT);
        assert!(result.distinct_words <= 365);
        assert!(result.max_repeats >= 1);
        assert!(!result.most_repeated.is_empty());
        assert!(result.coverage_percent() > 0.0);
    }

    #[test]
    fn matches_sequential_selection() {
        let selector =
            DailyWordSelector::from_words(words_from_slice(&["crane", "slate", "floor"]), 5)
                .unwrap();
        let result = run_audit(&selector, start(), 30, false);

        let schedule = selector.schedule(start(), 30);
        let expected_back_to_back = schedule.windows(2).filter(|w| w[0].1 == w[1].1).count();
        assert_eq!(result.back_to_back, expected_back_to_back);
        assert!(result.distinct_words <= 3);
    }

    #[test]
    fn single_word_list_repeats_every_day() {
        let selector = DailyWordSelector::from_words(words_from_slice(&["crane"]), 5).unwrap();
        let result = run_audit(&selector, start(), 10, false);

        assert_eq!(result.distinct_words, 1);
        assert_eq!(result.max_repeats, 10);
        assert_eq!(result.back_to_back, 9);
        assert_eq!(result.most_repeated, vec![Word::new("crane").unwrap()]);
        assert!((result.coverage_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_days_is_empty() {
        let selector = DailyWordSelector::from_words(words_from_slice(&["crane"]), 5).unwrap();
        let result = run_audit(&selector, start(), 0, false);
        assert_eq!(result.days, 0);
        assert_eq!(result.distinct_words, 0);
        assert_eq!(result.max_repeats, 0);
    }
}

//! Word lists for the puzzle
//!
//! Provides the embedded word list compiled into the binary, file loading for
//! custom lists, and [`WordList`], the validated ordered set the selector and
//! offline dictionary index into.

mod embedded;
mod list;
pub mod loader;

pub use embedded::{WORDS, WORDS_COUNT};
pub use list::WordList;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_count_matches_const() {
        assert_eq!(WORDS.len(), WORDS_COUNT);
    }

    #[test]
    fn words_are_valid() {
        for &word in WORDS {
            assert_eq!(word.len(), 5, "Word '{word}' is not 5 letters");
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "Word '{word}' contains non-lowercase chars"
            );
        }
    }

    #[test]
    fn words_are_unique() {
        let unique: std::collections::HashSet<_> = WORDS.iter().collect();
        assert_eq!(unique.len(), WORDS.len());
    }

    #[test]
    fn fallback_word_is_listed() {
        assert!(WORDS.contains(&"react"));
    }
}

//! Validated, ordered puzzle word list

use crate::core::Word;
use crate::error::GameError;
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;

/// Fixed ordered set of puzzle words of one length
///
/// Order is significant: the daily selector maps a date to an index.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<Word>,
    lookup: FxHashSet<Word>,
}

impl WordList {
    /// Build a list keeping only words of `length` letters, first occurrence wins
    ///
    /// # Errors
    /// Returns `GameError::Configuration` if no word of the right length remains.
    pub fn new(words: impl IntoIterator<Item = Word>, length: usize) -> Result<Self, GameError> {
        let mut lookup = FxHashSet::default();
        let words: Vec<Word> = words
            .into_iter()
            .filter(|w| w.len() == length)
            .filter(|w| lookup.insert(w.clone()))
            .collect();

        if words.is_empty() {
            return Err(GameError::Configuration {
                reason: format!("word list has no {length}-letter words"),
            });
        }

        Ok(Self { words, lookup })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Never true for a constructed list
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.lookup.contains(word)
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Pick a uniformly random word, used for practice puzzles
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> &Word {
        // Construction guarantees at least one word
        self.words.choose(rng).unwrap_or(&self.words[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::{WORDS, loader::words_from_slice};

    #[test]
    fn filters_by_length_and_dedups() {
        let words = words_from_slice(&["crane", "cranes", "slate", "CRANE", "pi"]);
        let list = WordList::new(words, 5).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().text(), "CRANE");
        assert_eq!(list.get(1).unwrap().text(), "SLATE");
        assert!(list.contains(&Word::new("slate").unwrap()));
        assert!(!list.contains(&Word::new("cranes").unwrap()));
    }

    #[test]
    fn empty_list_is_configuration_error() {
        let err = WordList::new(Vec::new(), 5).unwrap_err();
        assert!(matches!(err, GameError::Configuration { .. }));

        // Words exist but none of the configured length
        let err = WordList::new(words_from_slice(WORDS), 7).unwrap_err();
        assert!(matches!(err, GameError::Configuration { .. }));
    }

    #[test]
    fn embedded_list_is_usable() {
        let list = WordList::new(words_from_slice(WORDS), 5).unwrap();
        assert_eq!(list.len(), WORDS.len());
    }

    #[test]
    fn random_word_comes_from_list() {
        let list = WordList::new(words_from_slice(&["crane", "slate"]), 5).unwrap();
        let mut rng = rand::rng();
        for _ in 0..20 {
            assert!(list.contains(list.random(&mut rng)));
        }
    }
}

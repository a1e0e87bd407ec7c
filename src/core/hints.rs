//! Best-known verdict per letter across all guesses of a session
//!
//! Drives the virtual keyboard colors. `Correct` never gets downgraded.

use super::{LetterVerdict, Word};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from letter to the most informative verdict seen so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterHints(BTreeMap<char, LetterVerdict>);

impl LetterHints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hint for a letter, if it has been guessed
    #[must_use]
    pub fn get(&self, letter: char) -> Option<LetterVerdict> {
        self.0.get(&letter.to_ascii_uppercase()).copied()
    }

    /// Merge a single observation
    ///
    /// Replaces the existing hint only when the new verdict is more
    /// informative: unset, `Absent` → `Present`/`Correct`, `Present` → `Correct`.
    pub fn merge(&mut self, letter: char, verdict: LetterVerdict) {
        let letter = letter.to_ascii_uppercase();
        match self.0.get(&letter) {
            Some(&existing) if existing >= verdict => {}
            _ => {
                self.0.insert(letter, verdict);
            }
        }
    }

    /// Merge every letter of a scored guess
    pub fn merge_guess(&mut self, word: &Word, verdicts: &[LetterVerdict]) {
        for (&letter, &verdict) in word.letters().iter().zip(verdicts) {
            self.merge(char::from(letter), verdict);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, LetterVerdict)> + '_ {
        self.0.iter().map(|(&c, &v)| (c, v))
    }
}

#[cfg(test)]
mod tests {
    use super::LetterVerdict::{Absent, Correct, Present};
    use super::*;

    #[test]
    fn unset_takes_any_verdict() {
        let mut hints = LetterHints::new();
        assert_eq!(hints.get('a'), None);

        hints.merge('a', Absent);
        assert_eq!(hints.get('A'), Some(Absent));
    }

    #[test]
    fn upgrades_follow_information_order() {
        let mut hints = LetterHints::new();
        hints.merge('L', Absent);
        hints.merge('L', Present);
        assert_eq!(hints.get('L'), Some(Present));

        hints.merge('L', Correct);
        assert_eq!(hints.get('L'), Some(Correct));
    }

    #[test]
    fn correct_is_sticky() {
        let mut hints = LetterHints::new();
        hints.merge('O', Correct);
        hints.merge('O', Present);
        hints.merge('O', Absent);
        assert_eq!(hints.get('O'), Some(Correct));
    }

    #[test]
    fn present_not_downgraded_to_absent() {
        let mut hints = LetterHints::new();
        hints.merge('Y', Present);
        hints.merge('Y', Absent);
        assert_eq!(hints.get('Y'), Some(Present));
    }

    #[test]
    fn merge_guess_keeps_best_within_one_row() {
        // LOLLY against ALLOW: the L's score Present, Correct, Absent
        let mut hints = LetterHints::new();
        let word = Word::new("lolly").unwrap();
        hints.merge_guess(&word, &[Present, Present, Correct, Absent, Absent]);

        assert_eq!(hints.get('L'), Some(Correct));
        assert_eq!(hints.get('O'), Some(Present));
        assert_eq!(hints.get('Y'), Some(Absent));
        assert_eq!(hints.iter().count(), 3);
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut hints = LetterHints::new();
        hints.merge('A', Present);
        hints.merge('B', Absent);

        let json = serde_json::to_string(&hints).unwrap();
        assert_eq!(json, r#"{"A":"present","B":"absent"}"#);

        let back: LetterHints = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hints);
    }
}

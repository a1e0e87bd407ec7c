//! Guess scoring
//!
//! Maps a (secret, guess) pair to one [`LetterVerdict`] per position, handling
//! duplicate letters the way the daily puzzle does: exact matches claim their
//! letters first, and only the remaining occurrences can mark a letter present.

use super::Word;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// Feedback for a single letter of a guess
///
/// Ordered by how much it tells the player: `Absent < Present < Correct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterVerdict {
    /// No remaining occurrence of the letter in the secret
    Absent,
    /// Letter occurs in the secret at another, unconsumed position
    Present,
    /// Letter is in the same position in the secret
    Correct,
}

impl LetterVerdict {
    /// Square emoji used for share lines and terminal output
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// Score `guess` against `secret`
///
/// # Algorithm
/// 1. Count the remaining occurrences of every letter of the secret
/// 2. First pass: mark exact position matches `Correct` and consume the letter
/// 3. Second pass: mark the rest `Present` while occurrences remain, else `Absent`
///
/// The first pass must finish before the second starts, otherwise an early
/// `Present` could steal an occurrence that a later exact match needs.
///
/// # Errors
/// Returns `GameError::InvalidLength` if the words differ in length.
///
/// # Examples
/// ```
/// use daily_wordle::core::{score, LetterVerdict::*, Word};
///
/// let secret = Word::new("allow").unwrap();
/// let guess = Word::new("lolly").unwrap();
///
/// let verdicts = score(&secret, &guess).unwrap();
/// assert_eq!(verdicts, vec![Present, Present, Correct, Absent, Absent]);
/// ```
pub fn score(secret: &Word, guess: &Word) -> Result<Vec<LetterVerdict>, GameError> {
    if secret.len() != guess.len() {
        return Err(GameError::InvalidLength {
            secret: secret.len(),
            guess: guess.len(),
        });
    }

    let secret_letters = secret.letters();
    let guess_letters = guess.letters();
    let mut result: Vec<Option<LetterVerdict>> = vec![None; guess.len()];
    let mut remaining = secret.char_counts();

    // First pass: exact position matches
    for (i, (&g, &s)) in guess_letters.iter().zip(secret_letters).enumerate() {
        if g == s {
            result[i] = Some(LetterVerdict::Correct);
            if let Some(count) = remaining.get_mut(&g) {
                *count = count.saturating_sub(1);
            }
        }
    }

    // Second pass: present or absent from what is left over
    for (slot, &g) in result.iter_mut().zip(guess_letters) {
        if slot.is_some() {
            continue;
        }
        *slot = Some(match remaining.get_mut(&g) {
            Some(count) if *count > 0 => {
                *count -= 1;
                LetterVerdict::Present
            }
            _ => LetterVerdict::Absent,
        });
    }

    Ok(result
        .into_iter()
        .map(|v| v.unwrap_or(LetterVerdict::Absent))
        .collect())
}

/// Whether every letter was marked `Correct`
#[must_use]
pub fn is_solved(verdicts: &[LetterVerdict]) -> bool {
    !verdicts.is_empty() && verdicts.iter().all(|&v| v == LetterVerdict::Correct)
}

/// Render a verdict row as emoji squares, e.g. "🟨🟨🟩⬜⬜"
#[must_use]
pub fn to_emoji(verdicts: &[LetterVerdict]) -> String {
    verdicts.iter().map(|v| v.emoji()).collect()
}

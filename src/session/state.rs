//! Session state: one puzzle, its guesses and its outcome

use crate::core::{LetterHints, LetterVerdict, Word, is_solved, score, to_emoji};
use crate::daily::DateKey;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Playing)
    }

    /// Status implied by a guess sequence
    fn derive(guesses: &[GuessRecord], max_guesses: usize) -> Self {
        match guesses.last() {
            Some(last) if is_solved(&last.verdicts) => Self::Won,
            _ if guesses.len() >= max_guesses => Self::Lost,
            _ => Self::Playing,
        }
    }
}

/// A scored guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub word: Word,
    pub verdicts: Vec<LetterVerdict>,
}

impl GuessRecord {
    #[must_use]
    pub fn emoji(&self) -> String {
        to_emoji(&self.verdicts)
    }
}

/// Emitted once when a session reaches `Won` or `Lost`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub date: DateKey,
    pub word: Word,
    pub won: bool,
    pub attempts_used: usize,
    pub is_daily: bool,
}

/// One puzzle being played
///
/// Serialized verbatim as the daily snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub date: DateKey,
    pub secret: Word,
    pub guesses: Vec<GuessRecord>,
    pub letter_hints: LetterHints,
    pub status: SessionStatus,
    pub is_daily: bool,
}

impl GameSession {
    #[must_use]
    pub fn new(date: DateKey, secret: Word, is_daily: bool) -> Self {
        Self {
            date,
            secret,
            guesses: Vec::new(),
            letter_hints: LetterHints::new(),
            status: SessionStatus::Playing,
            is_daily,
        }
    }

    #[must_use]
    pub fn attempts_used(&self) -> usize {
        self.guesses.len()
    }

    /// Score `guess`, record it and recompute the status
    ///
    /// The caller has already decided the guess is acceptable.
    ///
    /// # Errors
    /// `SessionFinished` if the session is over, `InvalidLength` if the guess
    /// and secret differ in length.
    pub fn apply_guess(&mut self, guess: Word, max_guesses: usize) -> Result<&GuessRecord, GameError> {
        if self.status.is_finished() {
            return Err(GameError::SessionFinished);
        }

        let verdicts = score(&self.secret, &guess)?;
        self.letter_hints.merge_guess(&guess, &verdicts);
        self.guesses.push(GuessRecord {
            word: guess,
            verdicts,
        });
        self.status = SessionStatus::derive(&self.guesses, max_guesses);

        Ok(self.guesses.last().expect("guess was just pushed"))
    }

    /// Clear all progress, keeping the secret
    pub fn reset(&mut self) {
        self.guesses.clear();
        self.letter_hints.clear();
        self.status = SessionStatus::Playing;
    }

    /// Completion event for a finished session
    #[must_use]
    pub fn completion_event(&self) -> Option<CompletionEvent> {
        self.status.is_finished().then(|| CompletionEvent {
            date: self.date,
            word: self.secret.clone(),
            won: self.status == SessionStatus::Won,
            attempts_used: self.attempts_used(),
            is_daily: self.is_daily,
        })
    }

    /// Shareable summary: header line plus one emoji row per guess
    #[must_use]
    pub fn share_text(&self, max_guesses: usize) -> String {
        let attempts = match self.status {
            SessionStatus::Won => self.attempts_used().to_string(),
            _ => "X".to_string(),
        };
        let mut text = format!("Wordle {} {attempts}/{max_guesses}", self.date);
        for guess in &self.guesses {
            text.push('\n');
            text.push_str(&guess.emoji());
        }
        text
    }

    /// Describe the first way a restored snapshot is inconsistent, if any
    ///
    /// Verdicts, hints and status are all recomputed from the guessed words
    /// and must match what was stored. A finished session is judged by its
    /// own guesses only, so changing `max_guesses` never reopens it.
    #[must_use]
    pub fn inconsistency(&self, word_length: usize, max_guesses: usize) -> Option<&'static str> {
        if self.secret.len() != word_length {
            return Some("secret has the wrong length");
        }

        let mut hints = LetterHints::new();
        for (i, guess) in self.guesses.iter().enumerate() {
            match score(&self.secret, &guess.word) {
                Ok(verdicts) if verdicts == guess.verdicts => {
                    hints.merge_guess(&guess.word, &verdicts);
                }
                _ => return Some("stored verdicts do not match the secret"),
            }
            // Nothing may follow a winning guess
            if i + 1 < self.guesses.len() && is_solved(&guess.verdicts) {
                return Some("guesses continue after a win");
            }
        }

        if hints != self.letter_hints {
            return Some("letter hints do not match the guesses");
        }
        let solved = self.guesses.last().is_some_and(|g| is_solved(&g.verdicts));
        let status_matches = match self.status {
            SessionStatus::Won => solved,
            SessionStatus::Lost => !solved && !self.guesses.is_empty(),
            SessionStatus::Playing => {
                SessionStatus::derive(&self.guesses, max_guesses) == SessionStatus::Playing
            }
        };
        if !status_matches {
            return Some("status does not match the guesses");
        }
        None
    }
}

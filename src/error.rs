//! Error types for the puzzle core

/// Errors raised by the scorer, selector, session manager and trackers.
///
/// Only `InvalidLength` and `Configuration` are programmer or setup faults;
/// the rest are recoverable and meant to be surfaced as transient messages.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("secret has {secret} letters but guess has {guess}")]
    InvalidLength { secret: usize, guess: usize },

    #[error("guess must be exactly {expected} letters, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("'{input}' contains characters other than letters")]
    InvalidCharacters { input: String },

    #[error("'{word}' is not in the word list")]
    NotAWord { word: String },

    #[error("a guess is already being validated")]
    ValidationInProgress,

    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },

    #[error("stored value under '{key}' is malformed")]
    PersistenceCorruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no puzzle has been started")]
    NoActiveSession,

    #[error("this puzzle is already finished")]
    SessionFinished,

    #[error("only practice puzzles can be reset")]
    NotPractice,
}

impl GameError {
    /// Whether the error is a transient input problem the player can fix by
    /// typing something else.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::WrongLength { .. }
                | Self::InvalidCharacters { .. }
                | Self::NotAWord { .. }
                | Self::ValidationInProgress
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = GameError::WrongLength {
            expected: 5,
            actual: 3,
        };
        assert_eq!(err.to_string(), "guess must be exactly 5 letters, got 3");

        let err = GameError::NotAWord {
            word: "XYZZY".to_string(),
        };
        assert_eq!(err.to_string(), "'XYZZY' is not in the word list");

        let err = GameError::Configuration {
            reason: "word list is empty".to_string(),
        };
        assert_eq!(err.to_string(), "invalid configuration: word list is empty");
    }

    #[test]
    fn user_input_classification() {
        assert!(GameError::ValidationInProgress.is_user_input());
        assert!(
            GameError::NotAWord {
                word: "QQQQQ".to_string()
            }
            .is_user_input()
        );
        assert!(!GameError::NoActiveSession.is_user_input());
        assert!(
            !GameError::InvalidLength {
                secret: 5,
                guess: 4
            }
            .is_user_input()
        );
    }
}

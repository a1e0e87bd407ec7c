//! Game sessions
//!
//! [`GameSession`] is the plain state of one puzzle; [`SessionManager`] owns
//! the current one, validates guesses and persists daily progress.

mod manager;
mod state;

pub use manager::{
    DAILY_SESSION_TTL, GuessOutcome, PendingGuess, SessionManager, SessionPhase, StartOutcome,
};
pub use state::{CompletionEvent, GameSession, GuessRecord, SessionStatus};

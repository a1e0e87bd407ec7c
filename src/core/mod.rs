//! Core domain types for the puzzle
//!
//! Words, per-letter verdicts, the duplicate-safe scorer and the letter-hint
//! merge. Everything here is pure and free of I/O.

mod feedback;
mod hints;
mod word;

pub use feedback::{LetterVerdict, is_solved, score, to_emoji};
pub use hints::LetterHints;
pub use word::{Word, WordError};

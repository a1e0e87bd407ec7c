//! Daily Wordle
//!
//! A daily word-guessing puzzle: every player gets the same secret for a
//! calendar date, guesses are scored with duplicate-aware feedback, and daily
//! results feed a win streak and guess statistics.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use daily_wordle::config::GameConfig;
//! use daily_wordle::daily::DailyWordSelector;
//! use daily_wordle::dictionary::WordListDictionary;
//! use daily_wordle::session::SessionManager;
//! use daily_wordle::store::MemoryStore;
//! use daily_wordle::wordlists::{WORDS, WordList, loader::words_from_slice};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), daily_wordle::error::GameError> {
//! let config = GameConfig::default();
//! let words = Arc::new(WordList::new(words_from_slice(WORDS), config.word_length)?);
//!
//! let mut manager = SessionManager::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(DailyWordSelector::new(Arc::clone(&words))),
//!     config.clone(),
//! )?;
//! manager.start_daily(config.reference_timezone.today()).await?;
//!
//! let dictionary = WordListDictionary::new(words);
//! manager.submit_guess("crane", &dictionary).await?;
//! # Ok(())
//! # }
//! ```

// Core domain types
pub mod core;

// Errors shared across modules
pub mod error;

// Configuration and data paths
pub mod config;

// Word lists
pub mod wordlists;

// Daily word selection
pub mod daily;

// Persistence
pub mod store;

// Word validity and meanings
pub mod dictionary;

// Session state machine
pub mod session;

// Streak and statistics
pub mod progress;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

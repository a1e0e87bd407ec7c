//! Session manager
//!
//! Owns the current [`GameSession`] and drives it through
//! `Uninitialized → Loading → Playing → {Won, Lost}`. Daily sessions are
//! snapshotted to the store after every change and restored on start when the
//! snapshot is for the same calendar date.
//!
//! A guess runs in two halves so that dictionary validation can happen on
//! another task: [`SessionManager::begin_guess`] checks the input and locks the
//! session, [`SessionManager::resolve_guess`] applies the verdict. The lock is
//! tagged with the session instance, so a validation that finishes after the
//! session was replaced is dropped rather than applied to the wrong puzzle.

use super::state::{CompletionEvent, GameSession, GuessRecord, SessionStatus};
use crate::config::GameConfig;
use crate::core::Word;
use crate::daily::{DailyWordSource, DateKey, resolve_daily_word};
use crate::dictionary::Dictionary;
use crate::error::GameError;
use crate::store::{DAILY_SESSION_KEY, PersistedStore, load_json, save_json_or_warn};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long a daily snapshot is kept; it is only ever restored on its own date
pub const DAILY_SESSION_TTL: Duration = Duration::from_secs(2 * 24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Loading,
    Playing,
    Won,
    Lost,
}

/// Result of starting the daily puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartOutcome {
    /// The session came from today's snapshot
    pub restored: bool,
    /// Non-fatal problem to show the player, e.g. the fallback word is in use
    pub warning: Option<String>,
}

/// A guess that passed input checks and is waiting for validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGuess {
    instance: u64,
    ticket: u64,
    word: Word,
    needs_validation: bool,
}

impl PendingGuess {
    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    /// False when the guess is the secret itself, which is always accepted
    #[must_use]
    pub const fn needs_validation(&self) -> bool {
        self.needs_validation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Accepted {
        record: GuessRecord,
        status: SessionStatus,
        /// Present exactly once, on the guess that finished the session
        completion: Option<CompletionEvent>,
    },
    /// The session was replaced while this guess was being validated
    Discarded,
}

pub struct SessionManager {
    store: Arc<dyn PersistedStore>,
    source: Arc<dyn DailyWordSource>,
    config: GameConfig,
    session: Option<GameSession>,
    loading: bool,
    // Bumped whenever `session` is replaced or reset
    instance: u64,
    next_ticket: u64,
    pending: Option<u64>,
}

impl SessionManager {
    /// # Errors
    /// Returns `GameError::Configuration` if `config` is invalid.
    pub fn new(
        store: Arc<dyn PersistedStore>,
        source: Arc<dyn DailyWordSource>,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            store,
            source,
            config,
            session: None,
            loading: false,
            instance: 0,
            next_ticket: 0,
            pending: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Identifies the current session; changes on every start or reset
    #[must_use]
    pub const fn instance(&self) -> u64 {
        self.instance
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            return SessionPhase::Loading;
        }
        match self.session.as_ref().map(|s| s.status) {
            None => SessionPhase::Uninitialized,
            Some(SessionStatus::Playing) => SessionPhase::Playing,
            Some(SessionStatus::Won) => SessionPhase::Won,
            Some(SessionStatus::Lost) => SessionPhase::Lost,
        }
    }

    /// Whether a guess is waiting for [`SessionManager::resolve_guess`]
    #[must_use]
    pub const fn is_validating(&self) -> bool {
        self.pending.is_some()
    }

    fn replace_session(&mut self, session: Option<GameSession>) {
        self.instance += 1;
        self.pending = None;
        self.session = session;
    }

    /// Start (or resume) the daily puzzle for `today`
    ///
    /// # Errors
    /// Returns `GameError::Configuration` if the only available secret does not
    /// have the configured length.
    pub async fn start_daily(&mut self, today: DateKey) -> Result<StartOutcome, GameError> {
        self.replace_session(None);
        self.loading = true;
        let result = self.load_or_create_daily(today).await;
        self.loading = false;

        let (session, outcome) = result?;
        info!(
            date = %today,
            restored = outcome.restored,
            guesses = session.attempts_used(),
            "daily session started"
        );
        self.replace_session(Some(session));
        Ok(outcome)
    }

    async fn load_or_create_daily(
        &self,
        today: DateKey,
    ) -> Result<(GameSession, StartOutcome), GameError> {
        if let Some(snapshot) = load_json::<GameSession>(self.store.as_ref(), DAILY_SESSION_KEY).await {
            if !snapshot.is_daily || snapshot.date != today {
                debug!(stored = %snapshot.date, %today, "ignoring snapshot from another day");
            } else if let Some(problem) =
                snapshot.inconsistency(self.config.word_length, self.config.max_guesses)
            {
                warn!(problem, "discarding inconsistent daily snapshot");
                if let Err(e) = self.store.delete(DAILY_SESSION_KEY).await {
                    warn!(error = %e, "failed to delete daily snapshot");
                }
            } else {
                return Ok((
                    snapshot,
                    StartOutcome {
                        restored: true,
                        warning: None,
                    },
                ));
            }
        }

        let resolved = resolve_daily_word(self.source.as_ref(), today, self.config.word_length).await;
        if resolved.word.len() != self.config.word_length {
            return Err(GameError::Configuration {
                reason: format!(
                    "no {}-letter daily word is available (fallback is {})",
                    self.config.word_length, resolved.word
                ),
            });
        }

        let session = GameSession::new(today, resolved.word, true);
        self.persist(&session).await;
        Ok((
            session,
            StartOutcome {
                restored: false,
                warning: resolved.warning,
            },
        ))
    }

    /// Start the daily puzzle again if `today` is a new calendar date
    ///
    /// Returns `None` if the current session is still current (or is practice).
    ///
    /// # Errors
    /// Same as [`SessionManager::start_daily`].
    pub async fn roll_over(&mut self, today: DateKey) -> Result<Option<StartOutcome>, GameError> {
        match &self.session {
            Some(s) if s.is_daily && s.date != today => self.start_daily(today).await.map(Some),
            _ => Ok(None),
        }
    }

    /// Start a practice puzzle with the given secret
    ///
    /// Never touches the stored daily snapshot.
    ///
    /// # Errors
    /// `WrongLength` if the secret does not have the configured length.
    pub fn start_practice(&mut self, secret: Word) -> Result<(), GameError> {
        if secret.len() != self.config.word_length {
            return Err(GameError::WrongLength {
                expected: self.config.word_length,
                actual: secret.len(),
            });
        }

        let today = self.config.reference_timezone.today();
        debug!(%today, "practice session started");
        self.replace_session(Some(GameSession::new(today, secret, false)));
        Ok(())
    }

    /// Clear the current practice session back to its first guess
    ///
    /// # Errors
    /// `NoActiveSession` without a session, `NotPractice` for a daily session.
    pub fn reset_practice(&mut self) -> Result<(), GameError> {
        let mut session = self.session.take().ok_or(GameError::NoActiveSession)?;
        if session.is_daily {
            self.session = Some(session);
            return Err(GameError::NotPractice);
        }
        session.reset();
        self.replace_session(Some(session));
        Ok(())
    }

    /// Check `raw` and lock the session until the guess is resolved
    ///
    /// # Errors
    /// - `NoActiveSession` / `SessionFinished` if there is nothing to guess
    /// - `ValidationInProgress` if another guess is pending
    /// - `WrongLength` / `InvalidCharacters` for malformed input
    pub fn begin_guess(&mut self, raw: &str) -> Result<PendingGuess, GameError> {
        let session = self.session.as_ref().ok_or(GameError::NoActiveSession)?;
        if self.pending.is_some() {
            return Err(GameError::ValidationInProgress);
        }
        if session.status.is_finished() {
            return Err(GameError::SessionFinished);
        }

        let input = raw.trim();
        let actual = input.chars().count();
        if actual != self.config.word_length {
            return Err(GameError::WrongLength {
                expected: self.config.word_length,
                actual,
            });
        }
        let word = Word::new(input).map_err(|_| GameError::InvalidCharacters {
            input: input.to_string(),
        })?;

        let needs_validation = word != session.secret;
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(ticket);

        Ok(PendingGuess {
            instance: self.instance,
            ticket,
            word,
            needs_validation,
        })
    }

    /// Apply a validated guess
    ///
    /// `is_valid` is ignored for the secret itself.
    ///
    /// # Errors
    /// `NotAWord` if the dictionary rejected the guess; no attempt is consumed.
    pub async fn resolve_guess(
        &mut self,
        pending: PendingGuess,
        is_valid: bool,
    ) -> Result<GuessOutcome, GameError> {
        if pending.instance != self.instance || self.pending != Some(pending.ticket) {
            debug!(word = %pending.word, "discarding stale guess");
            return Ok(GuessOutcome::Discarded);
        }
        self.pending = None;

        if pending.needs_validation && !is_valid {
            return Err(GameError::NotAWord {
                word: pending.word.to_string(),
            });
        }

        let session = self.session.as_mut().ok_or(GameError::NoActiveSession)?;
        let record = session
            .apply_guess(pending.word, self.config.max_guesses)?
            .clone();
        let status = session.status;
        let completion = session.completion_event();
        debug!(word = %record.word, ?status, attempt = session.attempts_used(), "guess applied");

        if let Some(event) = &completion {
            info!(won = event.won, attempts = event.attempts_used, daily = event.is_daily, "session finished");
        }
        if session.is_daily {
            let snapshot = session.clone();
            self.persist(&snapshot).await;
        }

        Ok(GuessOutcome::Accepted {
            record,
            status,
            completion,
        })
    }

    /// Release a pending guess without applying it
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Validate against `dictionary` and apply in one step
    ///
    /// # Errors
    /// Any error from [`SessionManager::begin_guess`] or
    /// [`SessionManager::resolve_guess`].
    pub async fn submit_guess(
        &mut self,
        raw: &str,
        dictionary: &dyn Dictionary,
    ) -> Result<GuessOutcome, GameError> {
        let pending = self.begin_guess(raw)?;
        let is_valid = if pending.needs_validation() {
            dictionary.is_valid_word(pending.word()).await
        } else {
            true
        };
        self.resolve_guess(pending, is_valid).await
    }

    async fn persist(&self, session: &GameSession) {
        save_json_or_warn(
            self.store.as_ref(),
            DAILY_SESSION_KEY,
            session,
            Some(DAILY_SESSION_TTL),
        )
        .await;
    }
}

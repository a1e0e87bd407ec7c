//! Command implementations
//!
//! [`GameContext`] bundles the injected handles every command needs.

pub mod audit;
pub mod define;
pub mod simple;

pub use audit::{AuditResult, run_audit};
pub use define::define_word;
pub use simple::run_simple;

use crate::config::GameConfig;
use crate::core::Word;
use crate::daily::{DailyWordSource, DateKey};
use crate::dictionary::Dictionary;
use crate::error::GameError;
use crate::progress::PlayerProgress;
use crate::session::{SessionManager, StartOutcome};
use crate::store::PersistedStore;
use crate::wordlists::WordList;
use std::sync::Arc;

/// Handles shared by the game front ends
#[derive(Clone)]
pub struct GameContext {
    pub config: GameConfig,
    pub store: Arc<dyn PersistedStore>,
    pub dictionary: Arc<dyn Dictionary>,
    pub source: Arc<dyn DailyWordSource>,
    pub words: Arc<WordList>,
}

impl GameContext {
    /// # Errors
    /// Returns `GameError::Configuration` if the configuration is invalid.
    pub fn session_manager(&self) -> Result<SessionManager, GameError> {
        SessionManager::new(
            Arc::clone(&self.store),
            Arc::clone(&self.source),
            self.config.clone(),
        )
    }

    pub async fn load_progress(&self) -> PlayerProgress {
        PlayerProgress::load(self.store.as_ref(), &self.config).await
    }

    #[must_use]
    pub fn today(&self) -> DateKey {
        self.config.reference_timezone.today()
    }

    #[must_use]
    pub fn random_word(&self) -> Word {
        self.words.random(&mut rand::rng()).clone()
    }
}

/// Which puzzle to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayMode {
    Daily,
    /// Practice with the given secret, or a random one from the word list
    Practice(Option<Word>),
}

impl PlayMode {
    /// Start the puzzle this mode names
    ///
    /// Returns a warning to show the player, if any.
    ///
    /// # Errors
    /// Any error from starting the session.
    pub async fn start(
        &self,
        ctx: &GameContext,
        manager: &mut SessionManager,
    ) -> Result<Option<String>, GameError> {
        match self {
            Self::Daily => {
                let StartOutcome { warning, .. } = manager.start_daily(ctx.today()).await?;
                Ok(warning)
            }
            Self::Practice(word) => {
                let secret = word.clone().unwrap_or_else(|| ctx.random_word());
                manager.start_practice(secret)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::daily::DailyWordSelector;
    use crate::dictionary::WordListDictionary;
    use crate::store::MemoryStore;
    use crate::wordlists::loader::words_from_slice;

    /// Offline context over a small word list and an in-memory store
    pub fn context(words: &[&str]) -> GameContext {
        let list = Arc::new(WordList::new(words_from_slice(words), 5).unwrap());
        GameContext {
            config: GameConfig::default(),
            store: Arc::new(MemoryStore::new()),
            dictionary: Arc::new(WordListDictionary::new(Arc::clone(&list))),
            source: Arc::new(DailyWordSelector::new(Arc::clone(&list))),
            words: list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn practice_picks_from_word_list() {
        let ctx = testing::context(&["crane", "slate"]);
        let mut manager = ctx.session_manager().unwrap();

        let warning = PlayMode::Practice(None)
            .start(&ctx, &mut manager)
            .await
            .unwrap();
        assert!(warning.is_none());

        let session = manager.session().unwrap();
        assert!(!session.is_daily);
        assert!(ctx.words.contains(&session.secret));
    }

    #[tokio::test]
    async fn daily_uses_today_in_reference_timezone() {
        let ctx = testing::context(&["crane", "slate"]);
        let mut manager = ctx.session_manager().unwrap();

        PlayMode::Daily.start(&ctx, &mut manager).await.unwrap();
        let session = manager.session().unwrap();
        assert!(session.is_daily);
        assert_eq!(session.date, ctx.today());
    }
}

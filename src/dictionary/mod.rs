//! Dictionary oracle
//!
//! Answers "is this a real word" and optionally supplies a definition. Every
//! failure mode (network, non-2xx, unparsable body) degrades to `false` /
//! `None`; nothing here returns an error to the session.

mod http;
mod word_list;

pub use http::FreeDictionaryClient;
pub use word_list::WordListDictionary;

use crate::core::Word;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One sense of a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    pub part_of_speech: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Definition metadata shown after a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMeaning {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonetic: Option<String>,
    pub meanings: Vec<Sense>,
}

#[async_trait]
pub trait Dictionary: Send + Sync {
    /// Whether `word` is a legal guess
    async fn is_valid_word(&self, word: &Word) -> bool;

    /// Definition of `word`, if one can be found
    async fn fetch_meaning(&self, word: &Word) -> Option<WordMeaning>;
}

/// Accepts every word. Useful for practice with made-up secrets and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

#[async_trait]
impl Dictionary for AcceptAll {
    async fn is_valid_word(&self, _word: &Word) -> bool {
        true
    }

    async fn fetch_meaning(&self, _word: &Word) -> Option<WordMeaning> {
        None
    }
}

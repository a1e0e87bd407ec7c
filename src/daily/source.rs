//! Where the daily secret comes from
//!
//! The local [`DailyWordSelector`] never fails. A remote endpoint can be used
//! instead; when it does fail the puzzle falls back to [`FALLBACK_WORD`] so the
//! game stays playable offline.

use super::{DailyWordSelector, DateKey};
use crate::core::{Word, WordError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Secret used when a remote daily word cannot be fetched
pub const FALLBACK_WORD: &str = "REACT";

/// Errors from fetching a daily word
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("daily word request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("daily word service returned an error: {0}")]
    Rejected(String),

    #[error("daily word service returned an invalid word: {0}")]
    InvalidWord(#[from] WordError),
}

/// Provider of the secret for a calendar date
#[async_trait]
pub trait DailyWordSource: Send + Sync {
    async fn daily_word(&self, date: DateKey) -> Result<Word, SourceError>;
}

#[async_trait]
impl DailyWordSource for DailyWordSelector {
    async fn daily_word(&self, date: DateKey) -> Result<Word, SourceError> {
        Ok(self.select_daily_word(date))
    }
}

/// The daily secret plus a warning to show when the fallback was used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDailyWord {
    pub word: Word,
    pub warning: Option<String>,
}

/// Fetch the word for `date`, falling back to [`FALLBACK_WORD`] on any failure
///
/// A fetched word of the wrong length counts as a failure.
pub async fn resolve_daily_word(
    source: &dyn DailyWordSource,
    date: DateKey,
    word_length: usize,
) -> ResolvedDailyWord {
    let failure = match source.daily_word(date).await {
        Ok(word) if word.len() == word_length => {
            return ResolvedDailyWord {
                word,
                warning: None,
            };
        }
        Ok(word) => SourceError::InvalidWord(WordError::InvalidLength {
            expected: word_length,
            actual: word.len(),
        }),
        Err(e) => e,
    };

    warn!(%date, error = %failure, "falling back to default daily word");
    ResolvedDailyWord {
        word: fallback_word(),
        warning: Some(format!(
            "Could not fetch today's word ({failure}); playing {FALLBACK_WORD} instead"
        )),
    }
}

fn fallback_word() -> Word {
    Word::new(FALLBACK_WORD).expect("fallback word is a valid word")
}

#[derive(Debug, Deserialize)]
struct RemoteResponse {
    #[serde(default)]
    success: bool,
    solution: Option<String>,
    error: Option<String>,
}

/// Daily word served by an HTTP endpoint returning
/// `{"success": true, "solution": "react"}`
#[derive(Debug, Clone)]
pub struct RemoteDailyWord {
    client: reqwest::Client,
    url: String,
}

impl RemoteDailyWord {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl DailyWordSource for RemoteDailyWord {
    async fn daily_word(&self, date: DateKey) -> Result<Word, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("date", date.to_string())])
            .send()
            .await?
            .error_for_status()?;

        let body: RemoteResponse = response.json().await?;
        match (body.success, body.solution) {
            (true, Some(solution)) => Ok(Word::new(solution)?),
            _ => Err(SourceError::Rejected(
                body.error
                    .unwrap_or_else(|| "response had no solution".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::{WORDS, loader::words_from_slice};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn day() -> DateKey {
        "2024-03-09".parse().unwrap()
    }

    #[tokio::test]
    async fn local_selector_never_falls_back() {
        let selector = DailyWordSelector::from_words(words_from_slice(WORDS), 5).unwrap();
        let resolved = resolve_daily_word(&selector, day(), 5).await;

        assert_eq!(resolved.word, selector.select_daily_word(day()));
        assert!(resolved.warning.is_none());
    }

    #[tokio::test]
    async fn remote_solution_is_used() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wordle-word"))
            .and(query_param("date", "2024-03-09"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "solution": "allow"})),
            )
            .mount(&server)
            .await;

        let source = RemoteDailyWord::new(format!("{}/wordle-word", server.uri())).unwrap();
        let resolved = resolve_daily_word(&source, day(), 5).await;

        assert_eq!(resolved.word.text(), "ALLOW");
        assert!(resolved.warning.is_none());
    }

    #[tokio::test]
    async fn server_error_falls_back_with_warning() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = RemoteDailyWord::new(server.uri()).unwrap();
        let resolved = resolve_daily_word(&source, day(), 5).await;

        assert_eq!(resolved.word.text(), FALLBACK_WORD);
        assert!(resolved.warning.unwrap().contains(FALLBACK_WORD));
    }

    #[tokio::test]
    async fn unsuccessful_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": false, "error": "no word today"})),
            )
            .mount(&server)
            .await;

        let source = RemoteDailyWord::new(server.uri()).unwrap();
        let resolved = resolve_daily_word(&source, day(), 5).await;

        assert_eq!(resolved.word.text(), FALLBACK_WORD);
        assert!(resolved.warning.unwrap().contains("no word today"));
    }

    #[tokio::test]
    async fn wrong_length_solution_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "solution": "planets"})),
            )
            .mount(&server)
            .await;

        let source = RemoteDailyWord::new(server.uri()).unwrap();
        let resolved = resolve_daily_word(&source, day(), 5).await;
        assert_eq!(resolved.word.text(), FALLBACK_WORD);
    }
}

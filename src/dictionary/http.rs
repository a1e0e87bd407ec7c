//! HTTP dictionary backed by dictionaryapi.dev
//!
//! Validity is decided by whether the service returns a definition for the
//! word, so obscure but legal words may be rejected.

use super::{Dictionary, Sense, WordMeaning};
use crate::core::Word;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Deserialize)]
struct ApiEntry {
    word: String,
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMeaning {
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: String,
    example: Option<String>,
}

impl ApiEntry {
    fn into_meaning(self) -> WordMeaning {
        let phonetic = self.phonetic.or_else(|| {
            self.phonetics
                .into_iter()
                .find_map(|p| p.text.filter(|t| !t.is_empty()))
        });

        // First definition of each part of speech
        let meanings = self
            .meanings
            .into_iter()
            .filter_map(|m| {
                let part_of_speech = m.part_of_speech;
                m.definitions.into_iter().next().map(|d| Sense {
                    part_of_speech,
                    definition: d.definition,
                    example: d.example,
                })
            })
            .collect();

        WordMeaning {
            word: self.word,
            phonetic,
            meanings,
        }
    }
}

/// Client for the free dictionary API
#[derive(Debug, Clone)]
pub struct FreeDictionaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl FreeDictionaryClient {
    /// Client against the public service
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against another deployment of the same API
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn lookup(&self, word: &Word) -> Result<Option<WordMeaning>, reqwest::Error> {
        let url = format!("{}/{}", self.base_url, word.text().to_ascii_lowercase());
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            debug!(word = %word, status = %response.status(), "no dictionary entry");
            return Ok(None);
        }

        let entries: Vec<ApiEntry> = response.json().await?;
        Ok(entries
            .into_iter()
            .next()
            .map(ApiEntry::into_meaning)
            .filter(|m| !m.meanings.is_empty()))
    }
}

#[async_trait]
impl Dictionary for FreeDictionaryClient {
    async fn is_valid_word(&self, word: &Word) -> bool {
        self.fetch_meaning(word).await.is_some()
    }

    async fn fetch_meaning(&self, word: &Word) -> Option<WordMeaning> {
        match self.lookup(word).await {
            Ok(meaning) => meaning,
            Err(e) => {
                warn!(word = %word, error = %e, "dictionary lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn crane_body() -> serde_json::Value {
        serde_json::json!([{
            "word": "crane",
            "phonetics": [{"text": ""}, {"text": "/kɹeɪn/"}],
            "meanings": [
                {
                    "partOfSpeech": "noun",
                    "definitions": [
                        {"definition": "A large wading bird.", "example": "A crane stood in the marsh."},
                        {"definition": "A lifting machine."}
                    ]
                },
                {
                    "partOfSpeech": "verb",
                    "definitions": [{"definition": "To stretch one's neck."}]
                }
            ]
        }])
    }

    #[tokio::test]
    async fn meaning_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/crane"))
            .respond_with(ResponseTemplate::new(200).set_body_json(crane_body()))
            .mount(&server)
            .await;

        let client = FreeDictionaryClient::with_base_url(server.uri()).unwrap();
        let word = Word::new("CRANE").unwrap();
        let meaning = client.fetch_meaning(&word).await.unwrap();

        assert_eq!(meaning.word, "crane");
        assert_eq!(meaning.phonetic.as_deref(), Some("/kɹeɪn/"));
        assert_eq!(meaning.meanings.len(), 2);
        assert_eq!(meaning.meanings[0].part_of_speech, "noun");
        assert_eq!(meaning.meanings[0].definition, "A large wading bird.");
        assert!(meaning.meanings[0].example.is_some());
        assert!(meaning.meanings[1].example.is_none());

        assert!(client.is_valid_word(&word).await);
    }

    #[tokio::test]
    async fn not_found_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(
                serde_json::json!({"title": "No Definitions Found"}),
            ))
            .mount(&server)
            .await;

        let client = FreeDictionaryClient::with_base_url(server.uri()).unwrap();
        let word = Word::new("xyzzy").unwrap();
        assert!(!client.is_valid_word(&word).await);
        assert!(client.fetch_meaning(&word).await.is_none());
    }

    #[tokio::test]
    async fn malformed_body_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = FreeDictionaryClient::with_base_url(server.uri()).unwrap();
        assert!(!client.is_valid_word(&Word::new("crane").unwrap()).await);
    }

    #[tokio::test]
    async fn unreachable_server_is_invalid() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = FreeDictionaryClient::with_base_url(uri).unwrap();
        assert!(!client.is_valid_word(&Word::new("crane").unwrap()).await);
    }
}

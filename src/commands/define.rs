//! Dictionary lookup command

use crate::core::Word;
use crate::dictionary::{Dictionary, WordMeaning};
use crate::error::GameError;

/// Look up the meaning of `raw`
///
/// # Errors
/// Returns `GameError::InvalidCharacters` if `raw` is not a word.
pub async fn define_word(
    dictionary: &dyn Dictionary,
    raw: &str,
) -> Result<Option<WordMeaning>, GameError> {
    let word = Word::new(raw).map_err(|_| GameError::InvalidCharacters {
        input: raw.trim().to_string(),
    })?;
    Ok(dictionary.fetch_meaning(&word).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::AcceptAll;

    #[tokio::test]
    async fn rejects_non_words() {
        let err = define_word(&AcceptAll, "cr4ne").await.unwrap_err();
        assert!(matches!(err, GameError::InvalidCharacters { ref input } if input == "cr4ne"));
    }

    #[tokio::test]
    async fn missing_meaning_is_none() {
        assert!(define_word(&AcceptAll, "crane").await.unwrap().is_none());
    }
}

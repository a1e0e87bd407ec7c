use super::{Dictionary, WordMeaning};
use crate::core::Word;
use crate::wordlists::WordList;
use async_trait::async_trait;
use std::sync::Arc;

/// Offline dictionary: a word is valid iff it is in the puzzle word list
#[derive(Debug, Clone)]
pub struct WordListDictionary {
    words: Arc<WordList>,
}

impl WordListDictionary {
    #[must_use]
    pub fn new(words: Arc<WordList>) -> Self {
        Self { words }
    }
}

#[async_trait]
impl Dictionary for WordListDictionary {
    async fn is_valid_word(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    async fn fetch_meaning(&self, _word: &Word) -> Option<WordMeaning> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;

    #[tokio::test]
    async fn membership_decides_validity() {
        let list = WordList::new(words_from_slice(&["crane", "slate"]), 5).unwrap();
        let dictionary = WordListDictionary::new(Arc::new(list));

        assert!(dictionary.is_valid_word(&Word::new("slate").unwrap()).await);
        assert!(!dictionary.is_valid_word(&Word::new("xyzzy").unwrap()).await);
        assert!(dictionary.fetch_meaning(&Word::new("crane").unwrap()).await.is_none());
    }
}

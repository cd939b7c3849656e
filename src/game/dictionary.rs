use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::DictionaryError;

/// A case-insensitive word list, loaded once.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load whitespace-separated words from a file.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path).map_err(|e| DictionaryError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let dictionary = Self::from_words(content.split_whitespace())?;
        info!(path = %path.display(), words = dictionary.len(), "dictionary loaded");
        Ok(dictionary)
    }

    /// Build a dictionary from an in-memory word list.
    pub fn from_words<I, W>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(DictionaryError::Empty);
        }
        Ok(Dictionary { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

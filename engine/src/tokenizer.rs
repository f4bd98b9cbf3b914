use crate::error::{Result, SearchError};
use std::collections::BTreeSet;

/// Split text into the non-empty runs between single spaces, in order.
/// Tabs, newlines and other whitespace stay inside words.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it holds no control characters (code points below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

/// Immutable stop-word set, fixed when the engine is built.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Keep the unique non-empty words; reject the set if any word is invalid.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .filter(|w| !w.as_ref().is_empty())
            .map(|w| w.as_ref().to_owned())
            .collect();
        if let Some(bad) = words.iter().find(|w| !is_valid_word(w)) {
            return Err(SearchError::invalid(format!("stop word {bad:?} contains control characters")));
        }
        Ok(Self { words })
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Tokenize document text, dropping stop words. Fails before returning anything
/// if a word carries control characters.
pub fn split_into_words_no_stop<'t>(text: &'t str, stop_words: &StopWords) -> Result<Vec<&'t str>> {
    let mut words = Vec::new();
    for word in split_into_words(text) {
        if !is_valid_word(word) {
            return Err(SearchError::invalid(format!("word {word:?} is invalid")));
        }
        if !stop_words.contains(word) {
            words.push(word);
        }
    }
    Ok(words)
}

//! Two-way inverted index.
//!
//! `word_to_docs` maps a word to the documents holding it, `doc_to_words` maps a
//! document to its words. Both directions carry the same term frequency for a
//! (word, document) pair and share one interned `Arc<str>` per word, so the text
//! of a word is stored once however many documents use it.

use crate::execution::ExecutionPolicy;
use crate::DocId;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type Word = Arc<str>;
pub type Postings = BTreeMap<DocId, f64>;
pub type WordFrequencies = BTreeMap<Word, f64>;

static NO_FREQUENCIES: WordFrequencies = BTreeMap::new();

#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_docs: BTreeMap<Word, Postings>,
    doc_to_words: BTreeMap<DocId, WordFrequencies>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `words` (stop words already removed) for `doc_id`. Each occurrence
    /// adds `1 / words.len()` to the pair's term frequency.
    pub fn insert(&mut self, doc_id: DocId, words: &[&str]) {
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        let doc_words = self.doc_to_words.entry(doc_id).or_default();
        for &word in words {
            let key = match self.word_to_docs.get_key_value(word) {
                Some((key, _)) => Arc::clone(key),
                None => Arc::from(word),
            };
            *self.word_to_docs.entry(Arc::clone(&key)).or_default().entry(doc_id).or_insert(0.0) +=
                inv_word_count;
            *doc_words.entry(key).or_insert(0.0) += inv_word_count;
        }
    }

    /// Erase every trace of `doc_id`. The per-word erasures are independent of each
    /// other and run under `policy`. Returns false if the document had no words.
    pub fn remove(&mut self, policy: ExecutionPolicy, doc_id: DocId) -> bool {
        let Some(doc_words) = self.doc_to_words.remove(&doc_id) else {
            return false;
        };

        let mut touched: Vec<(Word, Postings)> =
            doc_words.keys().filter_map(|word| self.word_to_docs.remove_entry(word)).collect();
        policy.for_each_mut(&mut touched, |(_, postings)| {
            postings.remove(&doc_id);
        });
        self.word_to_docs.extend(touched.into_iter().filter(|(_, postings)| !postings.is_empty()));
        true
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> {
        self.word_to_docs.get(word)
    }

    /// The stored spelling of `word`, borrowed from the index.
    pub fn canonical(&self, word: &str) -> Option<&str> {
        self.word_to_docs.get_key_value(word).map(|(key, _)| &**key)
    }

    pub fn contains(&self, word: &str, doc_id: DocId) -> bool {
        self.word_to_docs.get(word).is_some_and(|postings| postings.contains_key(&doc_id))
    }

    /// Word frequencies of a document; empty for unknown ids.
    pub fn word_frequencies(&self, doc_id: DocId) -> &WordFrequencies {
        self.doc_to_words.get(&doc_id).unwrap_or(&NO_FREQUENCIES)
    }

    pub fn word_count(&self) -> usize {
        self.word_to_docs.len()
    }
}

//! The search engine: document intake, TF-IDF ranking, matching and removal.

use crate::concurrent_map::ConcurrentMap;
use crate::error::{Result, SearchError};
use crate::execution::ExecutionPolicy;
use crate::index::{InvertedIndex, WordFrequencies};
use crate::query::{parse_query, Dedup, Query};
use crate::store::{compute_average_rating, DocumentData, DocumentIds, DocumentStore};
use crate::tokenizer::{split_into_words_no_stop, StopWords};
use crate::{DocId, Document, DocumentStatus, Rating};
use rayon::prelude::*;

/// Upper bound on the number of hits a search returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;
const RELEVANCE_BUCKET_COUNT: usize = 8;

/// Query words found in a document, ascending and unique, with the document's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMatch<'a> {
    pub words: Vec<&'a str>,
    pub status: DocumentStatus,
}

#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { stop_words: StopWords::new(stop_words)?, ..Self::default() })
    }

    /// Build from space-separated stop words.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self { stop_words: StopWords::from_text(text)?, ..Self::default() })
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Store and index a document. Nothing is modified when this fails.
    pub fn add_document(
        &mut self,
        document_id: DocId,
        document: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::invalid(format!("document id {document_id} is negative")));
        }
        if self.documents.contains(document_id) {
            return Err(SearchError::invalid(format!("document id {document_id} already exists")));
        }
        let words = split_into_words_no_stop(document, &self.stop_words)?;

        self.index.insert(document_id, &words);
        self.documents.insert(
            document_id,
            DocumentData { content: document.to_owned(), rating: compute_average_rating(ratings), status },
        );
        tracing::debug!(document_id, words = words.len(), "document added");
        Ok(())
    }

    /// Top hits among documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, status.predicate())
    }

    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        self.find_top_documents_with_policy(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// Rank documents by TF-IDF against `raw_query`.
    ///
    /// Only documents accepted by `predicate` collect relevance; any document
    /// holding a minus word is dropped whatever the predicate says. Hits are
    /// ordered by relevance, near-equal relevances (see [`RELEVANCE_EPSILON`])
    /// by rating, and at most [`MAX_RESULT_DOCUMENT_COUNT`] are returned.
    pub fn find_top_documents_with_policy<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        let query = parse_query(raw_query, &self.stop_words, Dedup::SortUnique)?;
        let mut matched = self.find_all_documents(policy, &query, &predicate);
        let total_hits = matched.len();

        sort_by_relevance(policy, &mut matched);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        tracing::debug!(query = raw_query, ?policy, total_hits, "search complete");
        Ok(matched)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document(&self, document_id: DocId) -> Option<&DocumentData> {
        self.documents.get(document_id)
    }

    /// Stored ids in ascending order.
    pub fn document_ids(&self) -> DocumentIds<'_> {
        self.documents.ids()
    }

    pub fn match_document(&self, raw_query: &str, document_id: DocId) -> Result<DocumentMatch<'_>> {
        self.match_document_with_policy(ExecutionPolicy::Sequential, raw_query, document_id)
    }

    /// Plus words of `raw_query` present in the document. A single minus word
    /// present in the document empties the list.
    pub fn match_document_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        document_id: DocId,
    ) -> Result<DocumentMatch<'_>> {
        let status = self.documents.get(document_id).ok_or(SearchError::NotFound(document_id))?.status;
        let dedup = match policy {
            ExecutionPolicy::Sequential => Dedup::SortUnique,
            ExecutionPolicy::Parallel => Dedup::Keep,
        };
        let query = parse_query(raw_query, &self.stop_words, dedup)?;

        if policy.any(&query.minus_words, |word| self.index.contains(word, document_id)) {
            return Ok(DocumentMatch { words: Vec::new(), status });
        }

        let found_in_document = |word: &&str| {
            if self.index.contains(word, document_id) {
                self.index.canonical(word)
            } else {
                None
            }
        };
        let mut words: Vec<&str> = match policy {
            ExecutionPolicy::Sequential => query.plus_words.iter().filter_map(found_in_document).collect(),
            ExecutionPolicy::Parallel => query.plus_words.par_iter().filter_map(found_in_document).collect(),
        };
        words.sort_unstable();
        words.dedup();
        Ok(DocumentMatch { words, status })
    }

    /// Word to term frequency for a document; empty when the id is unknown.
    pub fn word_frequencies(&self, document_id: DocId) -> &WordFrequencies {
        self.index.word_frequencies(document_id)
    }

    pub fn remove_document(&mut self, document_id: DocId) {
        self.remove_document_with_policy(ExecutionPolicy::Sequential, document_id)
    }

    /// Drop a document from the store and both index directions. Unknown ids are ignored.
    pub fn remove_document_with_policy(&mut self, policy: ExecutionPolicy, document_id: DocId) {
        if self.documents.remove(document_id).is_none() {
            return;
        }
        self.index.remove(policy, document_id);
        tracing::debug!(document_id, ?policy, "document removed");
    }

    fn inverse_document_freq(&self, documents_with_word: usize) -> f64 {
        (self.documents.len() as f64 / documents_with_word as f64).ln()
    }

    fn find_all_documents<P>(&self, policy: ExecutionPolicy, query: &Query<'_>, predicate: &P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(RELEVANCE_BUCKET_COUNT);

        policy.for_each(&query.plus_words, |word| {
            let Some(postings) = self.index.postings(word) else {
                return;
            };
            let idf = self.inverse_document_freq(postings.len());
            for (&document_id, &term_freq) in postings {
                let Some(data) = self.documents.get(document_id) else {
                    continue;
                };
                if predicate(document_id, data.status, data.rating) {
                    *relevance.access(document_id) += term_freq * idf;
                }
            }
        });

        policy.for_each(&query.minus_words, |word| {
            if let Some(postings) = self.index.postings(word) {
                for document_id in postings.keys() {
                    relevance.erase(document_id);
                }
            }
        });

        relevance
            .build_ordinary_map()
            .into_iter()
            .filter_map(|(document_id, score)| {
                self.documents.get(document_id).map(|data| Document::new(document_id, score, data.rating))
            })
            .collect()
    }
}

/// Order by relevance descending. Neighbours whose relevances differ by less than
/// [`RELEVANCE_EPSILON`] form a run ordered by rating descending, then by id, so
/// rounding noise in the sums never changes the order.
fn sort_by_relevance(policy: ExecutionPolicy, documents: &mut [Document]) {
    policy.sort_by(documents, |lhs, rhs| {
        rhs.relevance
            .total_cmp(&lhs.relevance)
            .then(rhs.rating.cmp(&lhs.rating))
            .then(lhs.id.cmp(&rhs.id))
    });
    for run in documents.chunk_by_mut(|a, b| (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON) {
        run.sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id)));
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = DocumentIds<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.ids()
    }
}

use crate::{DocId, DocumentStatus, Rating};
use std::collections::{btree_map, BTreeMap};
use std::iter::Copied;

pub type DocumentIds<'a> = Copied<btree_map::Keys<'a, DocId, DocumentData>>;

/// Metadata kept for every stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentData {
    pub content: String,
    pub rating: Rating,
    pub status: DocumentStatus,
}

/// Truncating integer mean; zero for no ratings.
pub fn compute_average_rating(ratings: &[Rating]) -> Rating {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as Rating
}

/// Document metadata keyed by id. The key set is the engine's identifier set
/// and iterates in ascending order.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: BTreeMap<DocId, DocumentData>,
}

impl DocumentStore {
    pub fn insert(&mut self, id: DocId, data: DocumentData) {
        self.documents.insert(id, data);
    }

    pub fn remove(&mut self, id: DocId) -> Option<DocumentData> {
        self.documents.remove(&id)
    }

    pub fn get(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn ids(&self) -> DocumentIds<'_> {
        self.documents.keys().copied()
    }
}

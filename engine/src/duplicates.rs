use crate::index::Word;
use crate::search_server::SearchServer;
use crate::DocId;
use std::collections::BTreeSet;

/// Remove every document whose set of distinct words was already seen on a
/// document with a lower id. Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let mut seen: BTreeSet<Vec<Word>> = BTreeSet::new();
    let duplicates: Vec<DocId> = server
        .document_ids()
        .filter(|&id| {
            let words: Vec<Word> = server.word_frequencies(id).keys().cloned().collect();
            !seen.insert(words)
        })
        .collect();

    for &document_id in &duplicates {
        server.remove_document(document_id);
        tracing::info!(document_id, "found duplicate document");
    }
    duplicates
}

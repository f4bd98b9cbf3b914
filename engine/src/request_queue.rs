use crate::error::Result;
use crate::search_server::SearchServer;
use crate::{DocId, Document, DocumentStatus, Rating};
use std::collections::VecDeque;

/// Number of most recent requests remembered (one per minute of a day).
pub const REQUEST_WINDOW: usize = 1440;

/// Wraps searches on a borrowed engine and remembers, for the last
/// [`REQUEST_WINDOW`] requests, which ones found nothing.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<bool>,
    no_result_requests: usize,
}

impl<'a> RequestQueue<'a> {
    pub fn new(server: &'a SearchServer) -> Self {
        Self { server, requests: VecDeque::with_capacity(REQUEST_WINDOW), no_result_requests: 0 }
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents(raw_query)?;
        self.record(&result);
        Ok(result)
    }

    pub fn add_find_request_by_status(&mut self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        let result = self.server.find_top_documents_by_status(raw_query, status)?;
        self.record(&result);
        Ok(result)
    }

    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        let result = self.server.find_top_documents_with(raw_query, predicate)?;
        self.record(&result);
        Ok(result)
    }

    /// Requests in the current window that returned nothing.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    fn record(&mut self, result: &[Document]) {
        let empty = result.is_empty();
        self.requests.push_back(empty);
        self.no_result_requests += usize::from(empty);
        if self.requests.len() > REQUEST_WINDOW && self.requests.pop_front() == Some(true) {
            self.no_result_requests -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("and in at").unwrap();
        server.add_document(1, "curly cat curly tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document(2, "curly dog and fancy collar", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
        server.add_document(3, "big cat fancy collar ", DocumentStatus::Actual, &[1, 2, 8]).unwrap();
        server.add_document(4, "big dog sparrow Eugene", DocumentStatus::Actual, &[1, 3, 2]).unwrap();
        server.add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Actual, &[1, 1, 1]).unwrap();
        server
    }

    #[test]
    fn window_evicts_oldest_requests() {
        let server = server();
        let mut queue = RequestQueue::new(&server);
        for _ in 0..REQUEST_WINDOW - 1 {
            queue.add_find_request("empty request").unwrap();
        }
        queue.add_find_request("curly dog").unwrap();
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW - 1);
        queue.add_find_request("big collar").unwrap();
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW - 2);
        queue.add_find_request("sparrow").unwrap();
        assert_eq!(queue.no_result_requests(), REQUEST_WINDOW - 3);
    }

    #[test]
    fn failed_query_is_not_recorded() {
        let server = server();
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request("--cat").is_err());
        assert!(queue.requests.is_empty());
    }

    #[test]
    fn status_and_predicate_variants_record() {
        let server = server();
        let mut queue = RequestQueue::new(&server);
        assert!(queue.add_find_request_by_status("cat", DocumentStatus::Banned).unwrap().is_empty());
        let hits = queue.add_find_request_with("dog", |id, _, _| id == 4).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(queue.no_result_requests(), 1);
    }
}

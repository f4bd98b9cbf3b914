//! Error types for the search engine.

use crate::DocId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Rejected input: bad document id, malformed query word, bad page size.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation addressed to a document the engine does not hold.
    #[error("document {0} not found")]
    NotFound(DocId),
}

impl SearchError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SearchError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

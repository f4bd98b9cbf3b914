pub mod concurrent_map;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod execution;
pub mod index;
pub mod paginator;
pub mod process_queries;
pub mod query;
pub mod request_queue;
pub mod search_server;
pub mod store;
pub mod tokenizer;

pub use document::{DocId, Document, DocumentStatus, Rating};
pub use error::{Result, SearchError};
pub use execution::ExecutionPolicy;
pub use search_server::{DocumentMatch, SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

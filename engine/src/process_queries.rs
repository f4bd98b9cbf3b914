//! Running independent queries against one engine in parallel.

use crate::error::Result;
use crate::search_server::SearchServer;
use crate::Document;
use rayon::prelude::*;

/// One result list per query, in the order the queries were given.
/// The first malformed query fails the batch.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    queries.par_iter().map(|query| server.find_top_documents(query.as_ref())).collect()
}

/// All hits of all queries in a single list.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}

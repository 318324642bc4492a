//! Retrieval: embed the query and fetch the nearest stored passages.

use std::sync::Arc;

use crate::db::VectorIndex;
use crate::embeddings::Embedder;
use crate::errors::AppError;

/// Placeholder passage when the index holds nothing to retrieve.
pub const NO_RELEVANT_DOCUMENTS: &str = "No relevant documents in the database.";

/// Placeholder passage when embedding or index lookup failed.
pub const RETRIEVAL_ERROR: &str = "Error retrieving information.";

/// Passages for one query, most similar first.
///
/// `sources_count` is the number of real passages retrieved; on the
/// placeholder paths (empty index, retrieval fault) it is 0 even though a
/// single placeholder document still flows downstream.
pub struct RetrievedSet {
    pub documents: Vec<String>,
    pub sources_count: usize,
}

impl RetrievedSet {
    fn fallback(text: &str) -> Self {
        Self {
            documents: vec![text.to_string()],
            sources_count: 0,
        }
    }
}

/// Orchestrates the embedder and the vector index for one query.
pub struct Retriever {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn Embedder>,
}

impl Retriever {
    pub fn new(index: Arc<dyn VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self { index, embedder }
    }

    /// Fetches up to `n` nearest passages for `query`.
    ///
    /// Never fails the request: embedder or index faults are logged and
    /// degrade to a placeholder set.
    pub async fn retrieve(&self, query: &str, n: u64) -> RetrievedSet {
        match self.try_retrieve(query, n).await {
            Ok(set) => set,
            Err(e) => {
                tracing::error!(error = %e, "Retrieval failed");
                metrics::counter!("astro_rag_retrieval_errors_total").increment(1);
                RetrievedSet::fallback(RETRIEVAL_ERROR)
            }
        }
    }

    async fn try_retrieve(&self, query: &str, n: u64) -> Result<RetrievedSet, AppError> {
        let total = self.index.count().await?;
        if total == 0 {
            return Ok(RetrievedSet::fallback(NO_RELEVANT_DOCUMENTS));
        }

        let embedding = self.embedder.embed_query(query).await?;
        let documents = self.index.query(&embedding, n.min(total)).await?;
        if documents.is_empty() {
            return Ok(RetrievedSet::fallback(NO_RELEVANT_DOCUMENTS));
        }

        let sources_count = documents.len();
        tracing::debug!(sources_count, "Retrieved passages");
        Ok(RetrievedSet {
            documents,
            sources_count,
        })
    }
}

//! Service layer: the retrieval-and-answer pipeline.
//!
//! Services are thread-safe and designed for shared use via Arc; nothing
//! here mutates shared state at request time.

use std::sync::Arc;

use crate::db::VectorIndex;
use crate::embeddings::Embedder;
use crate::services::rag::RagService;

pub mod answer;
pub mod context;
pub mod rag;
pub mod retrieval;

/// Application state container for dependency injection
#[derive(Clone)]
pub struct AppState {
    pub rag_service: Arc<RagService>,
}

impl AppState {
    pub fn new(index: Arc<dyn VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            rag_service: Arc::new(RagService::new(index, embedder)),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::db::VectorIndex;
    use crate::embeddings::Embedder;
    use crate::errors::AppError;

    /// In-memory index returning its documents in stored order.
    pub struct FixedIndex {
        documents: Vec<String>,
        last_k: Mutex<Option<u64>>,
    }

    impl FixedIndex {
        pub fn with_documents(documents: &[&str]) -> Self {
            Self {
                documents: documents.iter().map(|d| d.to_string()).collect(),
                last_k: Mutex::new(None),
            }
        }

        pub fn last_k(&self) -> Option<u64> {
            *self.last_k.lock().unwrap()
        }
    }

    #[async_trait]
    impl VectorIndex for FixedIndex {
        async fn query(&self, _embedding: &[f32], k: u64) -> Result<Vec<String>, AppError> {
            *self.last_k.lock().unwrap() = Some(k);
            Ok(self.documents.iter().take(k as usize).cloned().collect())
        }

        async fn count(&self) -> Result<u64, AppError> {
            Ok(self.documents.len() as u64)
        }
    }

    /// Index whose every call fails.
    pub struct FailingIndex;

    #[async_trait]
    impl VectorIndex for FailingIndex {
        async fn query(&self, _embedding: &[f32], _k: u64) -> Result<Vec<String>, AppError> {
            Err(AppError::DatabaseConnectionError("index offline".into()))
        }

        async fn count(&self) -> Result<u64, AppError> {
            Err(AppError::DatabaseConnectionError("index offline".into()))
        }
    }

    /// Four-dimensional deterministic embedder.
    pub struct TestEmbedder;

    #[async_trait]
    impl Embedder for TestEmbedder {
        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, AppError> {
            Ok(vec![0.25; 4])
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    /// Embedder whose every call fails.
    pub struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, AppError> {
            Err(AppError::EmbeddingError("model offline".into()))
        }

        fn dimension(&self) -> usize {
            4
        }
    }
}

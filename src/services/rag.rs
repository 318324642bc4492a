//! The question-answering pipeline: retrieve, assemble, synthesize.

use std::sync::Arc;

use serde::Serialize;

use crate::db::VectorIndex;
use crate::embeddings::Embedder;
use crate::errors::AppError;
use crate::services::{answer, context, retrieval::Retriever};

/// Display name reported by the info endpoint.
pub const MODEL_NAME: &str = "Research paper retrieval assistant";

/// How many passages to retrieve per question.
const RETRIEVAL_TOP_N: u64 = 5;

/// A complete answer for one question.
#[derive(Debug, Serialize)]
pub struct RagAnswer {
    pub text: String,
    /// Number of passages retrieved, independent of how many were quoted.
    pub sources_count: usize,
}

/// Read-only introspection of the corpus and model.
#[derive(Debug, Serialize)]
pub struct IndexInfo {
    pub documents_count: u64,
    pub embedding_dimensions: usize,
    pub model_name: &'static str,
}

pub struct RagService {
    retriever: Retriever,
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn Embedder>,
}

impl RagService {
    pub fn new(index: Arc<dyn VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            retriever: Retriever::new(index.clone(), embedder.clone()),
            index,
            embedder,
        }
    }

    /// Answers `question` from the corpus.
    ///
    /// Retrieval faults are already recovered inside [`Retriever`]; anything
    /// unexpected past that point is caught here and turned into a textual
    /// error answer with zero sources, never a failed request.
    pub async fn answer(&self, question: &str) -> RagAnswer {
        match self.run(question).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!(error = ?e, question, "Pipeline failed");
                RagAnswer {
                    text: format!("System error: {}", e),
                    sources_count: 0,
                }
            }
        }
    }

    async fn run(&self, question: &str) -> Result<RagAnswer, AppError> {
        tracing::debug!(question, "Answering question");

        let retrieved = self.retriever.retrieve(question, RETRIEVAL_TOP_N).await;
        let context = context::assemble(&retrieved.documents);
        let text = answer::synthesize(&context, question);

        metrics::counter!("astro_rag_questions_total").increment(1);

        Ok(RagAnswer {
            text,
            sources_count: retrieved.sources_count,
        })
    }

    pub async fn info(&self) -> Result<IndexInfo, AppError> {
        Ok(IndexInfo {
            documents_count: self.index.count().await?,
            embedding_dimensions: self.embedder.dimension(),
            model_name: MODEL_NAME,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::answer::NOT_AVAILABLE;
    use crate::services::test_support::{FixedIndex, TestEmbedder};

    fn service(documents: &[&str]) -> RagService {
        RagService::new(
            Arc::new(FixedIndex::with_documents(documents)),
            Arc::new(TestEmbedder),
        )
    }

    #[tokio::test]
    async fn sources_count_is_decoupled_from_quoted_sentences() {
        // Five passages retrieved, only two sentences lexically match.
        let svc = service(&[
            "Cats are mammals with fur.",
            "Dogs are mammals too apparently.",
            "Fish live in water always.",
            "Rocks contain many minerals.",
            "Clouds are made of droplets.",
        ]);

        let result = svc.answer("which animals are mammals").await;
        assert_eq!(result.sources_count, 5);
        assert_eq!(result.text.matches('•').count(), 2);
    }

    #[tokio::test]
    async fn empty_index_answers_not_available_with_zero_sources() {
        let svc = service(&[]);

        let result = svc.answer("anything").await;
        assert_eq!(result.text, NOT_AVAILABLE);
        assert_eq!(result.sources_count, 0);
    }

    #[tokio::test]
    async fn answering_is_idempotent() {
        let svc = service(&[
            "Telescopes gather light from distant stars.",
            "Mirrors focus that light onto sensors.",
        ]);

        let first = svc.answer("how do telescopes gather light").await;
        let second = svc.answer("how do telescopes gather light").await;
        assert_eq!(first.text, second.text);
        assert_eq!(first.sources_count, second.sources_count);
    }

    #[tokio::test]
    async fn filtered_retrieval_still_reports_all_sources() {
        // Four passages are too short to survive assembly; the context is the
        // single surviving passage, but all five retrieved are counted.
        let svc = service(&[
            "tiny",
            "short",
            "Neutron stars spin rapidly after collapse.",
            "n/a",
            "-",
        ]);

        let result = svc.answer("how fast do neutron stars spin").await;
        assert_eq!(result.sources_count, 5);
        assert!(result.text.contains("• Neutron stars spin rapidly after collapse."));
        assert_eq!(result.text.matches('•').count(), 1);
    }

    #[tokio::test]
    async fn info_reports_corpus_and_model() {
        let svc = service(&["A single stored passage."]);

        let info = svc.info().await.unwrap();
        assert_eq!(info.documents_count, 1);
        assert_eq!(info.embedding_dimensions, 4);
        assert_eq!(info.model_name, MODEL_NAME);
    }
}

use async_trait::async_trait;

use crate::config::EmbeddingsConfig;
use crate::errors::AppError;

/// Maps free text to a fixed-dimension embedding vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, AppError>;

    /// Dimensionality of the vectors this embedder produces. Must match the
    /// dimensionality of the vectors stored in the index.
    fn dimension(&self) -> usize;
}

/// Embedder backed by an OpenAI-format embeddings endpoint
/// (`POST { "input": text, "model": ... }`).
pub struct CloudEmbedder {
    client: reqwest::Client,
    config: EmbeddingsConfig,
}

impl CloudEmbedder {
    pub fn new(config: EmbeddingsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Embedder for CloudEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let payload = serde_json::json!({
            "input": text,
            "model": self.config.model,
        });

        let res = self
            .client
            .post(&self.config.model_api_url)
            .header("Authorization", format!("Bearer {}", self.config.model_api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::EmbeddingError(format!("Request failed: {}", e)))?;

        if !res.status().is_success() {
            return Err(AppError::EmbeddingError(format!("API error: {}", res.status())));
        }

        // Response matches the OpenAI format: data[0].embedding
        let body: serde_json::Value = res
            .json()
            .await
            .map_err(|e| AppError::EmbeddingError(format!("Parse error: {}", e)))?;

        let embedding: Vec<f32> = body["data"][0]["embedding"]
            .as_array()
            .ok_or_else(|| AppError::EmbeddingError("Invalid response format".to_string()))?
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| AppError::EmbeddingError("Non-numeric embedding value".to_string()))
            })
            .collect::<Result<_, _>>()?;

        if embedding.len() != self.config.embedding_dim {
            return Err(AppError::EmbeddingError(format!(
                "Expected {} dimensions, got {}",
                self.config.embedding_dim,
                embedding.len()
            )));
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.config.embedding_dim
    }
}

/// Deterministic stand-in embedder for development without a model endpoint.
pub struct MockEmbedder {
    dim: usize,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_query(&self, _text: &str) -> Result<Vec<f32>, AppError> {
        Ok(vec![0.5; self.dim])
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

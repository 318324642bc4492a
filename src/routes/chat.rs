use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::errors::AppError;
use crate::services::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    /// The question to answer (required, 1-1000 chars). Defaults to empty
    /// when the key is absent so the request still fails validation with
    /// 400 rather than a deserialization rejection.
    #[serde(default)]
    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub sources_count: usize,
    pub status: &'static str,
}

/// Question-answering endpoint
///
/// Rejects empty or whitespace-only questions with 400 before the pipeline
/// runs; everything past validation always yields a well-formed answer body.
#[instrument(skip(state, payload), fields(message_len = payload.message.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let question = payload.message.trim();
    if question.is_empty() {
        return Err(AppError::MissingField("message".to_string()));
    }

    let answer = state.rag_service.answer(question).await;

    Ok(Json(ChatResponse {
        response: answer.text,
        sources_count: answer.sources_count,
        status: "success",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{FixedIndex, TestEmbedder};
    use std::sync::Arc;

    fn state(documents: &[&str]) -> AppState {
        AppState::new(
            Arc::new(FixedIndex::with_documents(documents)),
            Arc::new(TestEmbedder),
        )
    }

    #[tokio::test]
    async fn whitespace_only_message_is_rejected() {
        let result = chat(
            State(state(&["A passage that would match."])),
            Json(ChatRequest {
                message: "   ".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::MissingField(_))));
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let result = chat(
            State(state(&[])),
            Json(ChatRequest {
                message: String::new(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn absent_message_key_fails_validation_not_deserialization() {
        let payload: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.message, "");

        let result = chat(State(state(&[])), Json(payload)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use tracing::instrument;

use crate::errors::AppError;
use crate::services::AppState;

#[derive(Serialize)]
pub struct InfoResponse {
    pub documents_count: u64,
    pub embedding_dimensions: usize,
    pub model_name: &'static str,
    pub status: &'static str,
}

/// Corpus and model introspection endpoint
#[instrument(skip(state))]
pub async fn info(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let info = state.rag_service.info().await?;

    Ok(Json(InfoResponse {
        documents_count: info.documents_count,
        embedding_dimensions: info.embedding_dimensions,
        model_name: info.model_name,
        status: "success",
    }))
}

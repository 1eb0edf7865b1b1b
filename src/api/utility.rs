use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::json;

use super::upload::read_file_field;
use super::{ApiError, AppState};
use crate::models::{ConfigResponse, HealthResponse, UploadResponse, WelcomeResponse};

pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the AI Learning Assistant API on GCP".to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Reports the local Piper TTS paths. Synthesis itself goes through the
/// cloud speech provider, so these are informational only.
pub async fn config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(state.runtime_config.as_ref().clone())
}

/// Store the multipart `file` field in object storage and return its public URL.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let file = read_file_field(multipart).await?;
    let url = state
        .assistant
        .store_image(
            file.filename.as_deref(),
            file.content_type.as_deref(),
            &file.bytes,
        )
        .await?;
    Ok(Json(UploadResponse { url }))
}

pub async fn debug_body(body: Bytes) -> Json<serde_json::Value> {
    let raw = String::from_utf8_lossy(&body).into_owned();
    tracing::debug!("Raw body received: {}", raw);
    Json(json!({ "raw": raw }))
}

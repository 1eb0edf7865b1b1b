use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::upload::read_file_field;
use super::{ApiError, AppState};
use crate::models::{TranscriptionResponse, TtsRequest, TRANSCRIBE_PROMPT};

/// Transcribe the multipart `file` field, which must be `audio/*`.
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let file = read_file_field(multipart).await?;
    let transcription = state
        .assistant
        .transcribe(file.content_type.as_deref(), &file.bytes)
        .await?;

    Ok(Json(TranscriptionResponse {
        prompt: TRANSCRIBE_PROMPT.to_string(),
        transcription,
    }))
}

pub async fn text_to_speech(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> Result<Response, ApiError> {
    let audio = state.assistant.text_to_speech(&request.text).await?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio).into_response())
}

//! Generation-backed endpoints: research answers, summaries, image
//! question answering and illustrative image search.

use axum::extract::{Multipart, State};
use axum::Json;

use super::upload::read_file_field;
use super::{ApiError, AppState};
use crate::models::{
    AnswerResponse, ImageAnalysisResponse, ImagePayload, ImageUrlsResponse, KeywordQuery,
    ResearchQuery, SummarizeRequest, ANALYZED_IMAGE_FILENAME,
};

pub async fn research(
    State(state): State<AppState>,
    Json(query): Json<ResearchQuery>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let answer = state.assistant.research(&query).await?;
    Ok(Json(AnswerResponse { answer }))
}

pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let answer = state.assistant.summarize(&request.content).await?;
    Ok(Json(AnswerResponse { answer }))
}

/// Answer the question shown in a base64 data-URI image.
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(payload): Json<ImagePayload>,
) -> Result<Json<ImageAnalysisResponse>, ApiError> {
    let response = state.assistant.analyze_data_uri(&payload.image_data).await?;
    Ok(Json(ImageAnalysisResponse {
        filename: ANALYZED_IMAGE_FILENAME.to_string(),
        response,
    }))
}

/// Multipart variant of [`analyze_image`]; the `file` field must be `image/*`.
pub async fn analyze_image_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ImageAnalysisResponse>, ApiError> {
    let file = read_file_field(multipart).await?;
    let response = state
        .assistant
        .analyze_upload(file.content_type.as_deref(), file.bytes)
        .await?;
    Ok(Json(ImageAnalysisResponse {
        filename: file
            .filename
            .unwrap_or_else(|| ANALYZED_IMAGE_FILENAME.to_string()),
        response,
    }))
}

/// Provider failures on this path produce `200` with an empty list.
pub async fn gen_keywords(
    State(state): State<AppState>,
    Json(query): Json<KeywordQuery>,
) -> Json<ImageUrlsResponse> {
    let image_urls = state
        .assistant
        .image_urls(&query.question, &query.emotion)
        .await;
    Json(ImageUrlsResponse { image_urls })
}

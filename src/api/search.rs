//! Serper passthrough endpoints. Upstream failures surface as `502`.

use axum::extract::State;
use axum::Json;

use super::{ApiError, AppState};
use crate::models::{LensQuery, ScholarQuery};

pub async fn search_scholar(
    State(state): State<AppState>,
    Json(query): Json<ScholarQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(state.assistant.search_scholar(&query.q).await?))
}

pub async fn search_lens(
    State(state): State<AppState>,
    Json(query): Json<LensQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(state.assistant.search_lens(&query.url).await?))
}

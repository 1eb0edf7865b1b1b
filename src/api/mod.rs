//! HTTP surface of the learning assistant.
//!
//! All endpoints live under `/api`; the root path only returns a welcome
//! message.

pub mod ai;
pub mod audio;
pub mod error;
pub mod search;
pub mod upload;
pub mod utility;

pub use error::ApiError;

use crate::assistant::Assistant;
use crate::models::ConfigResponse;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Uploads and data URIs for photos and recordings.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub runtime_config: Arc<ConfigResponse>,
}

impl AppState {
    pub fn new(assistant: Assistant, runtime_config: ConfigResponse) -> Self {
        Self {
            assistant: Arc::new(assistant),
            runtime_config: Arc::new(runtime_config),
        }
    }
}

/// Create the main API router.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route("/research", post(ai::research))
        .route("/summarize", post(ai::summarize))
        .route("/analyze-image", post(ai::analyze_image))
        .route("/analyze-image/upload", post(ai::analyze_image_upload))
        .route("/gen_keywords", post(ai::gen_keywords))
        .route("/transcribe", post(audio::transcribe))
        .route("/text-to-speech", post(audio::text_to_speech))
        .route("/search-scholar", post(search::search_scholar))
        .route("/search-lens", post(search::search_lens))
        .route("/health", get(utility::health))
        .route("/config", get(utility::config))
        .route("/upload-image", post(utility::upload_image))
        .route("/debug-body", post(utility::debug_body));

    Router::new()
        .route("/", get(utility::root))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Credentials are allowed, so a `*` entry mirrors the caller's origin
/// instead of sending a literal wildcard.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", origin, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

//! Data models and structures
//!
//! Request/response bodies for the HTTP API and the environment-sourced
//! service configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_RESEARCH_LEVEL: i64 = 3;
pub const TRANSCRIBE_PROMPT: &str = "Say something about your favorite technology.";
pub const ANALYZED_IMAGE_FILENAME: &str = "image.png";

fn default_level() -> i64 {
    DEFAULT_RESEARCH_LEVEL
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchQuery {
    pub question: String,
    pub emotion: String,
    #[serde(default = "default_level")]
    pub level: i64,
}

/// Body of the keyword/image search endpoint. Extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordQuery {
    pub question: String,
    pub emotion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePayload {
    /// `data:<mime>;base64,<payload>`
    pub image_data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScholarQuery {
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LensQuery {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerResponse {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageAnalysisResponse {
    pub filename: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrlsResponse {
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptionResponse {
    pub prompt: String,
    pub transcription: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigResponse {
    pub model_path: Option<String>,
    pub piper_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WelcomeResponse {
    pub message: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub speech_api_key: String,
    pub serper_api_key: String,
    pub gcp_project_id: String,
    pub gcp_region: String,
    pub gcs_bucket_name: String,
    pub gcs_hmac_access_key_id: String,
    pub gcs_hmac_secret: String,
    pub gcs_endpoint: String,
    pub allowed_origins: Vec<String>,
    pub piper_model_path: Option<String>,
    pub piper_executable: Option<String>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| crate::Error::Config(format!("{} not set", key)))
        };

        let gemini_api_key = require("GEMINI_API_KEY")?;

        Ok(Self {
            speech_api_key: get("GOOGLE_CLOUD_API_KEY").unwrap_or_else(|| gemini_api_key.clone()),
            gemini_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| "gemini-flash-latest".to_string()),
            serper_api_key: get("SERPER_API_KEY")
                .unwrap_or_else(|| "your_serper_api_key".to_string()),
            gcp_project_id: require("GCP_PROJECT_ID")?,
            gcp_region: get("GCP_REGION").unwrap_or_else(|| "us-central1".to_string()),
            gcs_bucket_name: require("GCS_BUCKET_NAME")?,
            gcs_hmac_access_key_id: require("GCS_HMAC_ACCESS_KEY_ID")?,
            gcs_hmac_secret: require("GCS_HMAC_SECRET")?,
            gcs_endpoint: get("GCS_ENDPOINT")
                .unwrap_or_else(|| "https://storage.googleapis.com".to_string()),
            allowed_origins: parse_allowed_origins(get("ALLOWED_ORIGINS").as_deref()),
            piper_model_path: get("PIPER_MODEL_PATH"),
            piper_executable: get("PIPER_EXECUTABLE"),
        })
    }
}

/// Comma-separated origin list; unset means every origin (`*`).
fn parse_allowed_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or("*")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("GEMINI_API_KEY", "gemini-key"),
        ("GCP_PROJECT_ID", "learning-app"),
        ("GCS_BUCKET_NAME", "uploads"),
        ("GCS_HMAC_ACCESS_KEY_ID", "GOOG1EXAMPLE"),
        ("GCS_HMAC_SECRET", "secret"),
    ];

    #[test]
    fn test_research_query_level_defaults_to_three() {
        let query: ResearchQuery =
            serde_json::from_str(r#"{"question": "What is DNA?", "emotion": "sad"}"#).unwrap();
        assert_eq!(query.level, 3);

        let query: ResearchQuery =
            serde_json::from_str(r#"{"question": "q", "emotion": "sad", "level": -4}"#).unwrap();
        assert_eq!(query.level, -4);
    }

    #[test]
    fn test_keyword_query_ignores_level() {
        let query: KeywordQuery = serde_json::from_str(
            r#"{"question": "photosynthesis", "emotion": "happy", "level": 1}"#,
        )
        .unwrap();
        assert_eq!(query.question, "photosynthesis");
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();

        assert_eq!(config.gemini_model, "gemini-flash-latest");
        assert_eq!(config.speech_api_key, "gemini-key");
        assert_eq!(config.serper_api_key, "your_serper_api_key");
        assert_eq!(config.gcp_region, "us-central1");
        assert_eq!(config.gcs_endpoint, "https://storage.googleapis.com");
        assert_eq!(config.allowed_origins, vec!["*"]);
        assert!(config.piper_model_path.is_none());
    }

    #[test]
    fn test_config_missing_required_key() {
        let err = Config::from_lookup(lookup(&REQUIRED[1..])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY not set"));
    }

    #[test]
    fn test_config_empty_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("GCS_BUCKET_NAME", ""));
        // Later entries win in the HashMap.
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("GCS_BUCKET_NAME"));
    }

    #[test]
    fn test_allowed_origins_list() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((
            "ALLOWED_ORIGINS",
            "https://app.example.com, http://localhost:3000,,",
        ));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["https://app.example.com", "http://localhost:3000"]
        );
    }
}

//! Error handling and custom error types
//!
//! Provides unified error handling across the service using thiserror.
//! HTTP status mapping happens once, in [`crate::api::ApiError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    MalformedInput(String),

    #[error("{0}")]
    InvalidMediaType(String),

    #[error("Serper API failed: {0}")]
    SearchProvider(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Speech provider error: {0}")]
    Speech(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True for failures caused by the caller's input rather than a provider.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::MalformedInput(_) | Error::InvalidMediaType(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Object storage for user uploads
//!
//! Uploads go to a Google Cloud Storage bucket through its S3-interoperable
//! XML API, so the AWS S3 SDK can be used with HMAC credentials.

pub mod client;
pub mod mock;

pub use client::GcsClient;
pub use mock::MockStorageClient;

use crate::Result;
use async_trait::async_trait;
use std::path::Path;
use uuid::Uuid;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Store `data` under `key` with public-read access and return its public URL.
    async fn upload_file(&self, key: &str, data: &[u8], content_type: &str) -> Result<String>;
}

/// Unique object key for an upload, keeping the original file extension
/// (`.jpg` when there is none).
pub fn object_key_for(filename: Option<&str>) -> String {
    let suffix = filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| ".jpg".to_string());

    format!("{}{}", Uuid::new_v4().simple(), suffix)
}

//! Multipart file extraction shared by the upload endpoints.

use super::ApiError;
use axum::extract::Multipart;

/// The `file` field of a multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Read the `file` field, ignoring any other fields.
pub async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Read error: {}", e)))?
            .to_vec();

        return Ok(UploadedFile {
            filename,
            content_type,
            bytes,
        });
    }

    Err(ApiError::bad_request("Missing file in multipart form"))
}

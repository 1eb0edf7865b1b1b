//! Decoding of inline and uploaded media
//!
//! Turns data URIs and multipart uploads into raw bytes plus a MIME type,
//! rejecting anything that is not the expected kind of media.

use crate::{Error, Result};
use base64::Engine as _;
use regex::Regex;
use std::io::Cursor;
use std::sync::LazyLock;

static DATA_URI_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data:(?P<mime_type>[\w/]+);base64").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMedia {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Decode a `data:<mime>;base64,<payload>` string.
pub fn decode_data_uri(uri: &str) -> Result<DecodedMedia> {
    let (header, payload) = uri.split_once(',').ok_or_else(|| {
        Error::MalformedInput("Invalid Base64 data: missing ',' separator".to_string())
    })?;

    let mime_type = DATA_URI_HEADER
        .captures(header)
        .and_then(|caps| caps.name("mime_type"))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::MalformedInput("Invalid Base64 data URL format".to_string()))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::MalformedInput(format!("Invalid Base64 data: {}", e)))?;

    Ok(DecodedMedia { bytes, mime_type })
}

/// Reject uploads whose declared content type is not under `prefix`
/// (for example `"image/"` or `"audio/"`).
pub fn require_media_type<'a>(content_type: Option<&'a str>, prefix: &str) -> Result<&'a str> {
    match content_type {
        Some(ct) if ct.starts_with(prefix) => Ok(ct),
        other => {
            let kind = prefix.trim_end_matches('/');
            tracing::debug!("Rejected upload with content type {:?}", other);
            Err(Error::InvalidMediaType(format!(
                "Invalid file type, must be {}.",
                kind
            )))
        }
    }
}

/// Check that the bytes open as an image and return its pixel dimensions.
///
/// Only the header is read; the image is not fully decoded.
pub fn sniff_image(media: &DecodedMedia) -> Result<(u32, u32)> {
    image::ImageReader::new(Cursor::new(&media.bytes))
        .with_guessed_format()
        .map_err(|e| Error::MalformedInput(format!("Could not process image bytes: {}", e)))?
        .into_dimensions()
        .map_err(|e| Error::MalformedInput(format!("Could not process image bytes: {}", e)))
}

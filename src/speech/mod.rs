//! Speech-to-text and text-to-speech integration
//!
//! Backed by the Google Cloud Speech-to-Text and Text-to-Speech REST APIs.

pub mod google;
pub mod mock;

pub use google::GoogleSpeechClient;
pub use mock::MockSpeechClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Transcribe recorded audio. Returns an empty string when nothing was recognised.
    async fn transcribe(&self, audio: &[u8]) -> Result<String>;

    /// Synthesize `text` into MP3 audio.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

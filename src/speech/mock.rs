use super::SpeechService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockSpeechClient {
    transcription: Arc<Mutex<String>>,
    audio: Arc<Mutex<Vec<u8>>>,
    should_fail: Arc<Mutex<bool>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockSpeechClient {
    pub fn new() -> Self {
        Self {
            transcription: Arc::new(Mutex::new(String::new())),
            audio: Arc::new(Mutex::new(b"ID3".to_vec())),
            should_fail: Arc::new(Mutex::new(false)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_transcription(self, text: &str) -> Self {
        *self.transcription.lock().unwrap() = text.to_string();
        self
    }

    pub fn with_audio(self, audio: Vec<u8>) -> Self {
        *self.audio.lock().unwrap() = audio;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn record_call(&self) -> Result<()> {
        *self.call_count.lock().unwrap() += 1;
        if *self.should_fail.lock().unwrap() {
            return Err(Error::Speech("Mock failure".to_string()));
        }
        Ok(())
    }
}

impl Default for MockSpeechClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechService for MockSpeechClient {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String> {
        self.record_call()?;
        Ok(self.transcription.lock().unwrap().clone())
    }

    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        self.record_call()?;
        Ok(self.audio.lock().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_speech_roundtrip() {
        let client = MockSpeechClient::new().with_transcription("hello there");

        assert_eq!(client.transcribe(b"audio").await.unwrap(), "hello there");
        assert_eq!(client.synthesize("hi").await.unwrap(), b"ID3");
        assert_eq!(client.get_call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_speech_failure() {
        let client = MockSpeechClient::new().with_failure(true);
        assert!(client.transcribe(b"audio").await.is_err());
        assert!(client.synthesize("hi").await.is_err());
    }
}

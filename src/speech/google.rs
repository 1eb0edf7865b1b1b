use super::SpeechService;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_STT_BASE_URL: &str = "https://speech.googleapis.com";
const DEFAULT_TTS_BASE_URL: &str = "https://texttospeech.googleapis.com";
const LANGUAGE_CODE: &str = "en-US";
// Browser recordings are usually 48 kHz WebM/Opus.
const SAMPLE_RATE_HERTZ: u32 = 48_000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognizeRequest {
    config: RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig {
    sample_rate_hertz: u32,
    language_code: String,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest {
    input: SynthesisInput,
    voice: VoiceSelection,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection {
    language_code: String,
    ssml_gender: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

pub struct GoogleSpeechClient {
    client: Client,
    api_key: String,
    stt_base_url: String,
    tts_base_url: String,
    timeout: Duration,
}

impl GoogleSpeechClient {
    pub fn new(api_key: String) -> Self {
        Self::new_with_client(api_key, Client::new())
    }

    pub fn new_with_client(api_key: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            stt_base_url: DEFAULT_STT_BASE_URL.to_string(),
            tts_base_url: DEFAULT_TTS_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Point both speech endpoints at a single base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.stt_base_url = base_url.clone();
        self.tts_base_url = base_url;
        self
    }

    async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        url: String,
        request: &Req,
    ) -> Result<Resp> {
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", url, e);
                Error::Speech(format!("Failed to reach speech API: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Speech API error (status {}): {}", status, error_text);
            return Err(Error::Speech(format!(
                "API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse speech API response: {}", e);
            Error::Speech(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl SpeechService for GoogleSpeechClient {
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        tracing::debug!("Transcribing {} bytes of audio", audio.len());

        let request = RecognizeRequest {
            config: RecognitionConfig {
                sample_rate_hertz: SAMPLE_RATE_HERTZ,
                language_code: LANGUAGE_CODE.to_string(),
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio {
                content: base64::engine::general_purpose::STANDARD.encode(audio),
            },
        };

        let url = format!("{}/v1/speech:recognize", self.stt_base_url);
        let response: RecognizeResponse = self.post(url, &request).await?;

        Ok(response
            .results
            .first()
            .and_then(|r| r.alternatives.first())
            .map(|a| a.transcript.clone())
            .unwrap_or_default())
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        tracing::debug!("Synthesizing speech for {} chars", text.len());

        let request = SynthesizeRequest {
            input: SynthesisInput {
                text: text.to_string(),
            },
            voice: VoiceSelection {
                language_code: LANGUAGE_CODE.to_string(),
                ssml_gender: "NEUTRAL".to_string(),
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3".to_string(),
            },
        };

        let url = format!("{}/v1/text:synthesize", self.tts_base_url);
        let response: SynthesizeResponse = self.post(url, &request).await?;

        base64::engine::general_purpose::STANDARD
            .decode(response.audio_content)
            .map_err(|e| Error::Speech(format!("Failed to decode synthesized audio: {}", e)))
    }
}

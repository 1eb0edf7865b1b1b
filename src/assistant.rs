//! Request orchestration for every learning-assistant use case.
//!
//! Each method validates its input, composes the provider request, makes a
//! single provider call (two for image search) and normalizes the result.

use crate::ai::{GeminiClient, GenerationParams, GenerationService};
use crate::media::{self, DecodedMedia};
use crate::models::{Config, ResearchQuery};
use crate::normalize;
use crate::prompts;
use crate::search::{SearchService, SerperClient};
use crate::speech::{GoogleSpeechClient, SpeechService};
use crate::storage::{self, GcsClient, StorageService};
use crate::{keywords, Result};
use tracing::info;

/// Provider clients shared by all requests.
pub struct Assistant {
    generator: Box<dyn GenerationService>,
    speech: Box<dyn SpeechService>,
    search: Box<dyn SearchService>,
    storage: Box<dyn StorageService>,
}

/// Injectable service bundle used to construct [`Assistant`] in tests/harnesses.
pub struct AssistantServices {
    pub generator: Box<dyn GenerationService>,
    pub speech: Box<dyn SpeechService>,
    pub search: Box<dyn SearchService>,
    pub storage: Box<dyn StorageService>,
}

impl Assistant {
    pub fn with_services(services: AssistantServices) -> Self {
        Self {
            generator: services.generator,
            speech: services.speech,
            search: services.search,
            storage: services.storage,
        }
    }

    /// Construct the real provider clients from configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!("Generation provider: Gemini (model: {})", config.gemini_model);
        let generator = GeminiClient::new_with_client(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            http_client.clone(),
        );

        let speech =
            GoogleSpeechClient::new_with_client(config.speech_api_key.clone(), http_client.clone());
        let search = SerperClient::new_with_client(config.serper_api_key.clone(), http_client);

        info!(
            "Storage: bucket {} in project {} ({})",
            config.gcs_bucket_name, config.gcp_project_id, config.gcp_region
        );
        let storage = GcsClient::new(
            config.gcs_hmac_access_key_id.clone(),
            config.gcs_hmac_secret.clone(),
            config.gcs_endpoint.clone(),
            config.gcp_region.clone(),
            config.gcs_bucket_name.clone(),
        )
        .await?;

        Ok(Self::with_services(AssistantServices {
            generator: Box::new(generator),
            speech: Box::new(speech),
            search: Box::new(search),
            storage: Box::new(storage),
        }))
    }

    pub async fn research(&self, query: &ResearchQuery) -> Result<String> {
        let prompt = prompts::compose_research_prompt(&query.question, &query.emotion, query.level);
        self.generator
            .generate(&prompt, &GenerationParams::research())
            .await
    }

    pub async fn summarize(&self, content: &str) -> Result<String> {
        let prompt = prompts::compose_summary_prompt(content);
        let raw = self
            .generator
            .generate(&prompt, &GenerationParams::summary())
            .await?;
        Ok(normalize::normalize_summary(&raw))
    }

    /// Answer the question shown in an image sent as a data URI.
    pub async fn analyze_data_uri(&self, image_data: &str) -> Result<String> {
        let image = media::decode_data_uri(image_data)?;
        self.analyze(&image).await
    }

    /// Answer the question shown in an uploaded image file.
    pub async fn analyze_upload(&self, content_type: Option<&str>, bytes: Vec<u8>) -> Result<String> {
        let mime_type = media::require_media_type(content_type, "image/")?;
        let image = DecodedMedia {
            bytes,
            mime_type: mime_type.to_string(),
        };
        self.analyze(&image).await
    }

    async fn analyze(&self, image: &DecodedMedia) -> Result<String> {
        let (width, height) = media::sniff_image(image)?;
        info!("Analyzing {}x{} {} image", width, height, image.mime_type);

        let raw = self
            .generator
            .describe_image(
                prompts::image_analysis_instruction(),
                image,
                &GenerationParams::image_analysis(),
            )
            .await?;
        Ok(normalize::normalize_image_analysis(&raw))
    }

    /// Image URLs illustrating the question. Empty when any provider fails.
    pub async fn image_urls(&self, question: &str, emotion: &str) -> Vec<String> {
        keywords::generate_image_urls(
            self.generator.as_ref(),
            self.search.as_ref(),
            question,
            emotion,
        )
        .await
    }

    pub async fn search_scholar(&self, query: &str) -> Result<serde_json::Value> {
        self.search.scholar(query).await
    }

    pub async fn search_lens(&self, image_url: &str) -> Result<serde_json::Value> {
        self.search.lens(image_url).await
    }

    pub async fn transcribe(&self, content_type: Option<&str>, audio: &[u8]) -> Result<String> {
        media::require_media_type(content_type, "audio/")?;
        self.speech.transcribe(audio).await
    }

    pub async fn text_to_speech(&self, text: &str) -> Result<Vec<u8>> {
        self.speech.synthesize(text).await
    }

    /// Store an uploaded image and return its public URL.
    pub async fn store_image(
        &self,
        filename: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<String> {
        let content_type = media::require_media_type(content_type, "image/")?;
        let key = storage::object_key_for(filename);
        let url = self.storage.upload_file(&key, data, content_type).await?;
        info!("Stored upload as {}", key);
        Ok(url)
    }
}

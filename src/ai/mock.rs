use super::{GenerationParams, GenerationService};
use crate::media::DecodedMedia;
use crate::prompts::Prompt;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory [`GenerationService`] that replays canned responses and records
/// the prompts it was given.
#[derive(Clone)]
pub struct MockGenerationClient {
    text_responses: Arc<Mutex<Vec<String>>>,
    image_responses: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
    call_count: Arc<Mutex<usize>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self {
            text_responses: Arc::new(Mutex::new(Vec::new())),
            image_responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_text_response(self, response: &str) -> Self {
        self.text_responses
            .lock()
            .unwrap()
            .push(response.to_string());
        self
    }

    pub fn with_image_response(self, response: &str) -> Self {
        self.image_responses
            .lock()
            .unwrap()
            .push(response.to_string());
        self
    }

    /// Every call fails with `Error::AiProvider(message)`.
    pub fn with_failure(self, message: &str) -> Self {
        *self.failure.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_response(&self, responses: &Mutex<Vec<String>>, fallback: String) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::AiProvider(message));
        }

        let responses = responses.lock().unwrap();
        if responses.is_empty() {
            Ok(fallback)
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

impl Default for MockGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerationService for MockGenerationClient {
    async fn generate(&self, prompt: &Prompt, _params: &GenerationParams) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.next_response(
            &self.text_responses,
            format!("Mock answer for {}", prompt.user),
        )
    }

    async fn describe_image(
        &self,
        _instruction: &str,
        image: &DecodedMedia,
        _params: &GenerationParams,
    ) -> Result<String> {
        self.next_response(
            &self.image_responses,
            format!("Mock analysis of {} bytes", image.bytes.len()),
        )
    }
}

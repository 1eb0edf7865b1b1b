use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::ai::{GenerationParams, GenerationService};
use crate::media::DecodedMedia;
use crate::prompts::Prompt;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use std::time::Duration;

pub struct GeminiClient {
    http: GeminiHttpClient,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                model,
                Duration::from_secs(60),
                client,
            ),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn generation_config(params: &GenerationParams) -> Option<GenerationConfig> {
        if params.is_default() {
            return None;
        }
        Some(GenerationConfig {
            temperature: params.temperature,
            top_p: params.top_p,
            max_output_tokens: params.max_output_tokens,
        })
    }

    async fn send(&self, request: GenerateContentRequest) -> Result<String> {
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;
        response
            .text()
            .ok_or_else(|| Error::AiProvider("No text in Gemini response".to_string()))
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate(&self, prompt: &Prompt, params: &GenerationParams) -> Result<String> {
        let request = GenerateContentRequest {
            system_instruction: Some(Content::system(prompt.system.clone())),
            contents: vec![Content::user(vec![Part::Text {
                text: prompt.user.clone(),
            }])],
            generation_config: Self::generation_config(params),
        };

        self.send(request).await
    }

    async fn describe_image(
        &self,
        instruction: &str,
        image: &DecodedMedia,
        params: &GenerationParams,
    ) -> Result<String> {
        tracing::debug!(
            "Analyzing image ({} bytes, {}) via Gemini",
            image.bytes.len(),
            image.mime_type
        );

        let request = GenerateContentRequest {
            system_instruction: None,
            contents: vec![Content::user(vec![
                Part::Text {
                    text: instruction.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
                    },
                },
            ])],
            generation_config: Self::generation_config(params),
        };

        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-flash-latest";

    fn make_client(server: &MockServer, model: &str) -> GeminiClient {
        GeminiClient::new("test-key".to_string(), model.to_string()).with_base_url(server.uri())
    }

    fn text_response(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }]
                }
            }]
        }))
    }

    fn prompt() -> Prompt {
        Prompt {
            system: "be a tutor".to_string(),
            user: "Query: tides".to_string(),
        }
    }

    #[tokio::test]
    async fn test_generate_sends_system_instruction_and_params() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-flash-latest:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "system_instruction": { "parts": [{ "text": "be a tutor" }] },
                "contents": [{ "role": "user", "parts": [{ "text": "Query: tides" }] }],
                "generationConfig": { "maxOutputTokens": 4096 }
            })))
            .respond_with(text_response("Tides are caused by the moon."))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);
        let text = client
            .generate(&prompt(), &GenerationParams::research())
            .await
            .unwrap();
        assert_eq!(text, "Tides are caused by the moon.");
    }

    #[tokio::test]
    async fn test_default_params_omit_generation_config() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"/v1beta/models/.+:generateContent"))
            .respond_with(text_response("ok"))
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);
        client
            .generate(&prompt(), &GenerationParams::default())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("generationConfig").is_none());
    }

    #[tokio::test]
    async fn test_multiple_text_parts_are_concatenated() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"/v1beta/models/.+:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Hello, " }, { "text": "world" }] }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);
        let text = client
            .generate(&prompt(), &GenerationParams::default())
            .await
            .unwrap();
        assert_eq!(text, "Hello, world");
    }

    #[tokio::test]
    async fn test_describe_image_sends_inline_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"/v1beta/models/.+:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{
                    "parts": [
                        { "text": "Answer the question shown in the image." },
                        { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
                    ]
                }]
            })))
            .respond_with(text_response("The answer is 4."))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);
        let image = DecodedMedia {
            bytes: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
        };
        let text = client
            .describe_image(
                "Answer the question shown in the image.",
                &image,
                &GenerationParams::image_analysis(),
            )
            .await
            .unwrap();
        assert_eq!(text, "The answer is 4.");
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"/v1beta/models/.+:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);
        let err = client
            .generate(&prompt(), &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(ref m) if m.contains("quota exceeded")));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"/v1beta/models/.+:generateContent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server, DEFAULT_MODEL);
        let err = client
            .generate(&prompt(), &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_strips_models_prefix_from_model_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-flash-latest:generateContent"))
            .respond_with(text_response("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "models/gemini-flash-latest");
        assert_eq!(client.model(), "gemini-flash-latest");
        client
            .generate(&prompt(), &GenerationParams::default())
            .await
            .unwrap();
    }
}

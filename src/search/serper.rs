use super::{SearchService, MAX_IMAGE_URLS};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    images: Vec<ImageResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResult {
    image_url: Option<String>,
}

pub struct SerperClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl SerperClient {
    pub fn new(api_key: String) -> Self {
        Self::new_with_client(api_key, Client::new())
    }

    pub fn new_with_client(api_key: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn post<Resp: DeserializeOwned>(
        &self,
        endpoint: &str,
        payload: serde_json::Value,
    ) -> Result<Resp> {
        tracing::debug!("Sending Serper {} request", endpoint);

        let response = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .timeout(self.timeout)
            .header("X-API-KEY", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Serper: {}", e);
                Error::SearchProvider(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Serper API error (status {}): {}", status, error_text);
            return Err(Error::SearchProvider(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Serper response: {}", e);
            Error::SearchProvider(format!("invalid response body: {}", e))
        })
    }
}

#[async_trait]
impl SearchService for SerperClient {
    async fn scholar(&self, query: &str) -> Result<serde_json::Value> {
        self.post("scholar", serde_json::json!({ "q": query })).await
    }

    async fn lens(&self, image_url: &str) -> Result<serde_json::Value> {
        self.post("lens", serde_json::json!({ "url": image_url }))
            .await
    }

    async fn image_urls(&self, query: &str) -> Result<Vec<String>> {
        let response: ImagesResponse = self
            .post("images", serde_json::json!({ "q": query }))
            .await?;

        Ok(response
            .images
            .into_iter()
            .filter_map(|image| image.image_url)
            .take(MAX_IMAGE_URLS)
            .collect())
    }
}

use super::{SearchService, MAX_IMAGE_URLS};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockSearchClient {
    image_urls: Arc<Mutex<Vec<String>>>,
    payload: Arc<Mutex<serde_json::Value>>,
    queries: Arc<Mutex<Vec<String>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self {
            image_urls: Arc::new(Mutex::new(Vec::new())),
            payload: Arc::new(Mutex::new(serde_json::json!({}))),
            queries: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_image_urls(self, urls: Vec<String>) -> Self {
        *self.image_urls.lock().unwrap() = urls;
        self
    }

    /// JSON returned by `scholar` and `lens`.
    pub fn with_payload(self, payload: serde_json::Value) -> Self {
        *self.payload.lock().unwrap() = payload;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    /// Queries received so far, in call order.
    pub fn get_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn record(&self, query: &str) -> Result<()> {
        self.queries.lock().unwrap().push(query.to_string());
        if *self.should_fail.lock().unwrap() {
            return Err(Error::SearchProvider("Mock failure".to_string()));
        }
        Ok(())
    }
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchService for MockSearchClient {
    async fn scholar(&self, query: &str) -> Result<serde_json::Value> {
        self.record(query)?;
        Ok(self.payload.lock().unwrap().clone())
    }

    async fn lens(&self, image_url: &str) -> Result<serde_json::Value> {
        self.record(image_url)?;
        Ok(self.payload.lock().unwrap().clone())
    }

    async fn image_urls(&self, query: &str) -> Result<Vec<String>> {
        self.record(query)?;
        Ok(self
            .image_urls
            .lock()
            .unwrap()
            .iter()
            .take(MAX_IMAGE_URLS)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_queries() {
        let client = MockSearchClient::new()
            .with_image_urls(vec!["https://img.test/1.jpg".to_string()]);

        let urls = client.image_urls("cats").await.unwrap();
        assert_eq!(urls, vec!["https://img.test/1.jpg"]);
        client.scholar("dogs").await.unwrap();
        assert_eq!(client.get_queries(), vec!["cats", "dogs"]);
    }

    #[tokio::test]
    async fn test_mock_failure() {
        let client = MockSearchClient::new().with_failure(true);
        assert!(matches!(
            client.lens("https://x").await,
            Err(Error::SearchProvider(_))
        ));
    }
}

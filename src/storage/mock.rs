use super::StorageService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Stored object as seen by the mock: bytes plus declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

#[derive(Clone)]
pub struct MockStorageClient {
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    base_url: String,
    upload_count: Arc<Mutex<usize>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockStorageClient {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            base_url: "https://storage.googleapis.com/mock-bucket".to_string(),
            upload_count: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_upload_count(&self) -> usize {
        *self.upload_count.lock().unwrap()
    }

    pub fn get_objects(&self) -> HashMap<String, StoredObject> {
        self.objects.lock().unwrap().clone()
    }
}

impl Default for MockStorageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageService for MockStorageClient {
    async fn upload_file(&self, key: &str, data: &[u8], content_type: &str) -> Result<String> {
        if *self.should_fail.lock().unwrap() {
            return Err(Error::Storage("Mock failure".to_string()));
        }

        *self.upload_count.lock().unwrap() += 1;
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("{}/{}", self.base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_storage_upload() {
        let client = MockStorageClient::new();

        let url = client
            .upload_file("abc.png", b"png bytes", "image/png")
            .await
            .unwrap();

        assert_eq!(url, "https://storage.googleapis.com/mock-bucket/abc.png");
        assert_eq!(client.get_upload_count(), 1);
        let stored = client.get_objects().remove("abc.png").unwrap();
        assert_eq!(stored.content_type, "image/png");
        assert_eq!(stored.data, b"png bytes");
    }

    #[tokio::test]
    async fn test_mock_storage_with_custom_base_url() {
        let client = MockStorageClient::new().with_base_url("https://storage.test".to_string());
        let url = client
            .upload_file("file.jpg", b"data", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(url, "https://storage.test/file.jpg");
    }

    #[tokio::test]
    async fn test_mock_storage_failure() {
        let client = MockStorageClient::new().with_failure(true);
        let result = client.upload_file("x", b"", "image/png").await;
        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(client.get_upload_count(), 0);
    }
}

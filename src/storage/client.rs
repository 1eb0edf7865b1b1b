use super::StorageService;
use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Region, RequestChecksumCalculation};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{types::ObjectCannedAcl, Client as S3Client};

pub struct GcsClient {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl GcsClient {
    pub async fn new(
        access_key_id: String,
        secret_access_key: String,
        endpoint: String,
        region: String,
        bucket: String,
    ) -> Result<Self> {
        let credentials = aws_sdk_s3::config::Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "gcs-hmac",
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(region))
            .endpoint_url(endpoint.clone())
            .load()
            .await;

        // GCS rejects the SDK's default flexible checksums and virtual-host buckets.
        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .build();

        Ok(Self {
            client: S3Client::from_conf(config),
            public_base_url: format!("{}/{}", endpoint.trim_end_matches('/'), bucket),
            bucket,
        })
    }

    fn get_public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl StorageService for GcsClient {
    async fn upload_file(&self, key: &str, data: &[u8], content_type: &str) -> Result<String> {
        tracing::debug!(
            "Uploading {} ({} bytes, {}) to bucket {}",
            key,
            data.len(),
            content_type,
            self.bucket
        );

        let body = ByteStream::from(data.to_vec());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Failed to upload file: {}", e)))?;

        Ok(self.get_public_url(key))
    }
}

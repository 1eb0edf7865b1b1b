//! Web search integration (Serper.dev)
//!
//! Scholar and Lens results are passed through untouched; image search is
//! projected down to an ordered list of image URLs.

pub mod mock;
pub mod serper;

pub use mock::MockSearchClient;
pub use serper::SerperClient;

use crate::Result;
use async_trait::async_trait;

/// Upper bound on image URLs returned from a single search.
pub const MAX_IMAGE_URLS: usize = 10;

#[async_trait]
pub trait SearchService: Send + Sync {
    async fn scholar(&self, query: &str) -> Result<serde_json::Value>;
    async fn lens(&self, image_url: &str) -> Result<serde_json::Value>;

    /// Image URLs for `query` in provider ranking order, at most [`MAX_IMAGE_URLS`].
    async fn image_urls(&self, query: &str) -> Result<Vec<String>>;
}

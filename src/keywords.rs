//! Keyword generation chained into image search.
//!
//! Unlike every other use case this path fails open: any provider failure is
//! logged and turned into an empty result.

use crate::ai::{GenerationParams, GenerationService};
use crate::prompts;
use crate::search::SearchService;
use crate::Result;
use tracing::{info, warn};

/// Ask the model for search keywords, then look up matching images.
///
/// Never fails; returns an empty list if either provider call fails.
pub async fn generate_image_urls(
    generator: &dyn GenerationService,
    search: &dyn SearchService,
    question: &str,
    emotion: &str,
) -> Vec<String> {
    match try_generate_image_urls(generator, search, question, emotion).await {
        Ok(urls) => urls,
        Err(e) => {
            warn!("Image keyword search failed, returning no images: {}", e);
            Vec::new()
        }
    }
}

async fn try_generate_image_urls(
    generator: &dyn GenerationService,
    search: &dyn SearchService,
    question: &str,
    emotion: &str,
) -> Result<Vec<String>> {
    let prompt = prompts::compose_keyword_prompt(question, emotion);
    let raw = generator
        .generate(&prompt, &GenerationParams::default())
        .await?;
    let keywords = raw.trim();
    info!("Generated image search keywords: {}", keywords);

    let urls = search.image_urls(keywords).await?;
    info!("Image search returned {} urls", urls.len());
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockGenerationClient;
    use crate::search::MockSearchClient;
    use pretty_assertions::assert_eq;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://img.test/{i}.jpg")).collect()
    }

    #[tokio::test]
    async fn test_keywords_are_trimmed_and_forwarded() {
        let generator =
            MockGenerationClient::new().with_text_response("  plants, sunlight, chlorophyll \n");
        let search = MockSearchClient::new().with_image_urls(urls(3));

        let result = generate_image_urls(&generator, &search, "photosynthesis", "happy").await;

        assert_eq!(result, urls(3));
        assert_eq!(search.get_queries(), vec!["plants, sunlight, chlorophyll"]);
        let prompts = generator.get_prompts();
        assert_eq!(prompts[0].user, "Query: photosynthesis\nEmotion: happy");
    }

    #[tokio::test]
    async fn test_result_is_capped_at_ten() {
        let generator = MockGenerationClient::new().with_text_response("a, b");
        let search = MockSearchClient::new().with_image_urls(urls(12));

        let result = generate_image_urls(&generator, &search, "q", "sad").await;
        assert_eq!(result, urls(10));
    }

    #[tokio::test]
    async fn test_generation_failure_yields_empty_list() {
        let generator = MockGenerationClient::new().with_failure("quota exceeded");
        let search = MockSearchClient::new().with_image_urls(urls(3));

        let result = generate_image_urls(&generator, &search, "q", "sad").await;
        assert!(result.is_empty());
        assert!(search.get_queries().is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_yields_empty_list() {
        let generator = MockGenerationClient::new().with_text_response("a, b");
        let search = MockSearchClient::new().with_failure(true);

        let result = generate_image_urls(&generator, &search, "q", "sad").await;
        assert!(result.is_empty());
    }
}

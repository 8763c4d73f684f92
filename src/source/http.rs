use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::cache::MemoryCache;
use crate::domain::UserPagesDto;
use crate::source::PageSource;

/// One-shot GET of the user document. Failures are returned, never retried.
pub struct HttpSource {
    client: Client,
    url: Url,
    cache: Arc<MemoryCache>,
}

impl HttpSource {
    pub fn new(url: Url, cache: Arc<MemoryCache>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("storyreel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, url, cache })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_pages(&self) -> Result<UserPagesDto> {
        if let Some(doc) = self.cache.get_object::<UserPagesDto>(self.url.as_str()) {
            tracing::debug!("Serving {} from cache", self.url);
            return Ok(doc);
        }

        let response = self.client.get(self.url.clone()).send().await?;
        response.error_for_status_ref()?;
        let body = response.bytes().await?;

        let doc: UserPagesDto = serde_json::from_slice(&body)?;
        self.cache.set(self.url.as_str(), body.to_vec());
        tracing::info!("Fetched {} pages from {}", doc.pages.len(), self.url);
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cached_document_skips_network() {
        let cache = Arc::new(MemoryCache::default());
        // Port 9 (discard) is never served; a network attempt would fail.
        let url = Url::parse("http://127.0.0.1:9/users.json").unwrap();
        let doc = UserPagesDto::default();
        cache.set_object(url.as_str(), &doc);

        let source = HttpSource::new(url, cache).unwrap();
        assert_eq!(source.fetch_pages().await.unwrap(), doc);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let url = Url::parse("http://127.0.0.1:9/users.json").unwrap();
        let source = HttpSource::new(url, Arc::new(MemoryCache::default())).unwrap();
        assert!(source.fetch_pages().await.is_err());
    }
}

//! reqwest-backed content API client

use std::time::Duration;

use async_trait::async_trait;

use super::wire::{PageResponse, RawDocument};
use super::{ContentFetcher, FetchError};
use crate::config::CmsConfig;
use crate::content::{ListingPage, PostDocument};

/// HTTP client for the remote content API
///
/// Connection pooling is enabled by default in `reqwest::Client`.
pub struct CmsClient {
    http: reqwest::Client,
    config: CmsConfig,
}

impl CmsClient {
    /// Build a client from the CMS configuration
    pub fn new(config: CmsConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .user_agent(format!("blogfront/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// URL of the listing query for the first page
    fn first_page_url(&self, page_size: usize, lang: &str) -> String {
        format!(
            "{}/documents?type={}&pageSize={}&lang={}",
            self.config.api_url.trim_end_matches('/'),
            self.config.content_type,
            page_size,
            lang
        )
    }

    /// URL of a single document
    fn document_url(&self, uid: &str) -> String {
        format!(
            "{}/documents/{}",
            self.config.api_url.trim_end_matches('/'),
            uid
        )
    }

    /// GET a URL and parse it as a listing page
    async fn get_listing(&self, url: &str) -> Result<ListingPage, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let page: PageResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        Ok(page.into_listing_page())
    }
}

#[async_trait]
impl ContentFetcher for CmsClient {
    async fn fetch_first_page(
        &self,
        page_size: usize,
        lang: &str,
    ) -> Result<ListingPage, FetchError> {
        let url = self.first_page_url(page_size, lang);
        self.get_listing(&url).await
    }

    async fn fetch_page(&self, token: &str) -> Result<ListingPage, FetchError> {
        // The token is itself the URL of the next page
        self.get_listing(token).await
    }

    async fn fetch_post(&self, uid: &str) -> Result<PostDocument, FetchError> {
        let url = self.document_url(uid);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let raw: RawDocument =
            serde_json::from_str(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;

        Ok(raw.into_document(uid))
    }
}

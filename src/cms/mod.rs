//! Content fetch adapter for the remote headless CMS
//!
//! Everything that knows about the wire shape of the content API lives
//! here: the reqwest-backed client, the raw response types, and the
//! rich-text flattening. The view layer only ever sees the plain models
//! from [`crate::content`].

mod client;
mod error;
pub mod richtext;
mod wire;

pub use client::CmsClient;
pub use error::FetchError;
pub use wire::{PageResponse, RawDocument};

use crate::content::{ListingPage, PostDocument};
use async_trait::async_trait;

/// Boundary between the view layer and the remote content API
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Query the first page of post summaries for the listing
    async fn fetch_first_page(
        &self,
        page_size: usize,
        lang: &str,
    ) -> Result<ListingPage, FetchError>;

    /// Follow a continuation token to the next page of results
    async fn fetch_page(&self, token: &str) -> Result<ListingPage, FetchError>;

    /// Fetch a single post document by its uid
    async fn fetch_post(&self, uid: &str) -> Result<PostDocument, FetchError>;
}

//! Post and listing-page models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A blog post summary as it appears on the listing page
///
/// Produced by the content fetch adapter; rich-text fields have already
/// been flattened to plain strings by the time a summary exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    /// Opaque slug identifying the post (`/post/{id}`)
    pub id: String,

    /// Publication date, when the API provided one
    pub published_at: Option<DateTime<FixedOffset>>,

    /// Post title
    pub title: String,

    /// Post subtitle
    pub subtitle: String,

    /// Author display name
    pub author: String,
}

/// One page of listing results returned by the content API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage {
    /// Opaque cursor for the next page; `None` means no further pages
    pub continuation_token: Option<String>,

    /// Page index reported by the API (1-based)
    pub page: u32,

    /// Posts in API order
    pub posts: Vec<PostSummary>,
}

impl ListingPage {
    /// An empty, exhausted page
    pub fn empty() -> Self {
        Self {
            continuation_token: None,
            page: 1,
            posts: Vec::new(),
        }
    }
}

/// A full post document for the individual post page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDocument {
    pub id: String,
    pub published_at: Option<DateTime<FixedOffset>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Body sections in document order
    pub sections: Vec<ContentSection>,
}

/// A heading plus flattened body text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSection {
    pub heading: String,
    pub body: String,
}

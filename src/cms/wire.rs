//! Raw wire types for the content API
//!
//! The listing endpoint and continuation URLs both answer with the same
//! shape: `{ next_page, page, results: [...] }`. These types mirror that
//! shape exactly; conversion into the crate's own models happens in the
//! `into_*` methods.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;

use super::richtext;
use crate::content::{ContentSection, ListingPage, PostDocument, PostSummary};

/// One page of listing results, as sent by the API
#[derive(Debug, Deserialize)]
pub struct PageResponse {
    /// URL of the next results page, null on the last page
    pub next_page: Option<String>,

    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: u32,

    /// Documents in API order; a response without this field is malformed
    pub results: Vec<RawDocument>,
}

fn default_page() -> u32 {
    1
}

/// A single raw document record
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub first_publication_date: Option<String>,

    #[serde(default)]
    pub data: RawData,
}

/// Document payload; every field may be a plain string or a rich-text
/// block array
#[derive(Debug, Default, Deserialize)]
pub struct RawData {
    #[serde(default)]
    pub title: Value,

    #[serde(default)]
    pub subtitle: Value,

    #[serde(default)]
    pub author: Value,

    #[serde(default)]
    pub content: Vec<RawSection>,
}

/// A raw body section
#[derive(Debug, Deserialize)]
pub struct RawSection {
    #[serde(default)]
    pub heading: Value,

    #[serde(default)]
    pub body: Value,
}

impl PageResponse {
    /// Normalize a wire page into the listing model, dropping records
    /// that carry no uid (they cannot be linked to)
    pub fn into_listing_page(self) -> ListingPage {
        let posts = self
            .results
            .into_iter()
            .filter_map(RawDocument::into_summary)
            .collect();

        ListingPage {
            continuation_token: self.next_page,
            page: self.page,
            posts,
        }
    }
}

impl RawDocument {
    /// Normalize a record into a post summary; `None` when the record
    /// has no usable uid
    pub fn into_summary(self) -> Option<PostSummary> {
        let id = self.uid.filter(|uid| !uid.is_empty())?;

        Some(PostSummary {
            id,
            published_at: parse_publication_date(self.first_publication_date.as_deref()),
            title: richtext::as_text(&self.data.title),
            subtitle: richtext::as_text(&self.data.subtitle),
            author: richtext::as_text(&self.data.author),
        })
    }

    /// Normalize a record into a full post document
    ///
    /// `fallback_uid` covers APIs that omit the uid on single-document
    /// responses; it is the uid the document was requested under.
    pub fn into_document(self, fallback_uid: &str) -> PostDocument {
        let sections = self
            .data
            .content
            .iter()
            .map(|section| ContentSection {
                heading: richtext::as_text(&section.heading),
                body: richtext::as_text(&section.body),
            })
            .collect();

        PostDocument {
            id: self
                .uid
                .filter(|uid| !uid.is_empty())
                .unwrap_or_else(|| fallback_uid.to_string()),
            published_at: parse_publication_date(self.first_publication_date.as_deref()),
            title: richtext::as_text(&self.data.title),
            subtitle: richtext::as_text(&self.data.subtitle),
            author: richtext::as_text(&self.data.author),
            sections,
        }
    }
}

/// Parse the API's RFC 3339 publication date; unparseable or missing
/// dates become `None` and surface as a placeholder in the view
fn parse_publication_date(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_page() {
        let json = r#"{
            "next_page": null,
            "page": 2,
            "results": [{
                "uid": "p2",
                "first_publication_date": "2023-11-20T00:00:00Z",
                "data": { "title": "T2", "subtitle": "S2", "author": "A2" }
            }]
        }"#;

        let response: PageResponse = serde_json::from_str(json).unwrap();
        let page = response.into_listing_page();

        assert_eq!(page.continuation_token, None);
        assert_eq!(page.page, 2);
        assert_eq!(page.posts.len(), 1);
        let post = &page.posts[0];
        assert_eq!(post.id, "p2");
        assert_eq!(post.title, "T2");
        assert_eq!(post.subtitle, "S2");
        assert_eq!(post.author, "A2");
        assert!(post.published_at.is_some());
    }

    #[test]
    fn test_missing_results_is_an_error() {
        let json = r#"{ "next_page": "url" }"#;
        assert!(serde_json::from_str::<PageResponse>(json).is_err());
    }

    #[test]
    fn test_rich_text_fields_are_flattened() {
        let json = r#"{
            "next_page": "page2url",
            "results": [{
                "uid": "p1",
                "first_publication_date": "2023-11-14T22:13:20Z",
                "data": {
                    "title": "Plain title",
                    "subtitle": [{ "type": "paragraph", "text": "Rich subtitle" }],
                    "author": [{ "type": "paragraph", "text": "Jane" }]
                }
            }]
        }"#;

        let page = serde_json::from_str::<PageResponse>(json)
            .unwrap()
            .into_listing_page();

        assert_eq!(page.continuation_token.as_deref(), Some("page2url"));
        assert_eq!(page.page, 1);
        assert_eq!(page.posts[0].subtitle, "Rich subtitle");
        assert_eq!(page.posts[0].author, "Jane");
    }

    #[test]
    fn test_records_without_uid_are_dropped() {
        let json = r#"{
            "next_page": null,
            "results": [
                { "data": { "title": "orphan" } },
                { "uid": "kept", "data": { "title": "kept" } }
            ]
        }"#;

        let page = serde_json::from_str::<PageResponse>(json)
            .unwrap()
            .into_listing_page();

        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].id, "kept");
    }

    #[test]
    fn test_bad_dates_become_none() {
        assert!(parse_publication_date(Some("not-a-date")).is_none());
        assert!(parse_publication_date(None).is_none());
        assert!(parse_publication_date(Some("2023-11-20T00:00:00Z")).is_some());
    }

    #[test]
    fn test_into_document_with_sections() {
        let json = r#"{
            "uid": "p1",
            "first_publication_date": "2023-11-14T22:13:20Z",
            "data": {
                "title": "T1",
                "subtitle": "S1",
                "author": "A1",
                "content": [{
                    "heading": "Part one",
                    "body": [
                        { "type": "paragraph", "text": "First." },
                        { "type": "paragraph", "text": "Second." }
                    ]
                }]
            }
        }"#;

        let doc = serde_json::from_str::<RawDocument>(json)
            .unwrap()
            .into_document("p1");

        assert_eq!(doc.id, "p1");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].heading, "Part one");
        assert_eq!(doc.sections[0].body, "First.\nSecond.");
    }
}

//! Listing view model
//!
//! Converts listing pages into display-ready state and drives the
//! incremental "load more" flow. The state is an owned value that gets
//! replaced, never mutated in place, on every successful load.

use serde::Serialize;

use crate::cms::{ContentFetcher, FetchError};
use crate::content::{ListingPage, PostSummary};
use crate::helpers::date::display_date;

/// A post summary formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    /// Opaque slug, used for the `/post/{id}` link
    pub id: String,
    /// Display-formatted publication date ("14 nov 2023")
    pub published_at: String,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostCard {
    fn from_summary(post: &PostSummary) -> Self {
        Self {
            id: post.id.clone(),
            published_at: display_date(post.published_at.as_ref()),
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
        }
    }
}

/// Display state of the listing page for one page view
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    /// Rendered posts, append-only across loads
    pub posts: Vec<PostCard>,
    /// Cursor for the next page; `None` once the listing is exhausted
    pub continuation_token: Option<String>,
    /// 1-based index of the page the state last absorbed
    pub page_index: u32,
}

impl ViewState {
    /// Build the initial state from the server-side first page
    pub fn initialize(page: &ListingPage) -> Self {
        Self {
            posts: page.posts.iter().map(PostCard::from_summary).collect(),
            continuation_token: page.continuation_token.clone(),
            page_index: 1,
        }
    }

    /// Whether another page may exist (the load-more affordance renders
    /// only while this holds)
    pub fn has_more(&self) -> bool {
        self.continuation_token.is_some()
    }

    /// Fetch the next page and return the grown state
    ///
    /// Without a token past the first page this is a no-op and returns
    /// the state unchanged. A token-less *first* page still fires the
    /// request (which the API then rejects); the guard is asymmetric on
    /// purpose and only suppresses later pages.
    ///
    /// Exactly one fetch per call, no retries. On failure the error is
    /// returned and `self` is left as it was, so the caller keeps a
    /// usable state.
    pub async fn load_more(&self, fetcher: &dyn ContentFetcher) -> Result<ViewState, FetchError> {
        if self.continuation_token.is_none() && self.page_index != 1 {
            return Ok(self.clone());
        }

        let token = self.continuation_token.as_deref().unwrap_or_default();
        let next = fetcher.fetch_page(token).await?;

        let mut posts = self.posts.clone();
        posts.extend(next.posts.iter().map(PostCard::from_summary));

        Ok(ViewState {
            posts,
            continuation_token: next.continuation_token,
            page_index: next.page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostDocument;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::Mutex;

    /// Serves queued pages in order and counts fetches
    struct MockFetcher {
        pages: Mutex<Vec<Result<ListingPage, FetchError>>>,
        calls: Mutex<usize>,
    }

    impl MockFetcher {
        fn new(pages: Vec<Result<ListingPage, FetchError>>) -> Self {
            Self {
                pages: Mutex::new(pages),
                calls: Mutex::new(0),
            }
        }

        fn call_count(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ContentFetcher for MockFetcher {
        async fn fetch_first_page(
            &self,
            _page_size: usize,
            _lang: &str,
        ) -> Result<ListingPage, FetchError> {
            self.fetch_page("").await
        }

        async fn fetch_page(&self, _token: &str) -> Result<ListingPage, FetchError> {
            *self.calls.lock().unwrap() += 1;
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                return Err(FetchError::Malformed("no more queued pages".to_string()));
            }
            pages.remove(0)
        }

        async fn fetch_post(&self, _uid: &str) -> Result<PostDocument, FetchError> {
            unimplemented!("not used by listing tests")
        }
    }

    fn summary(id: &str, title: &str) -> PostSummary {
        PostSummary {
            id: id.to_string(),
            published_at: DateTime::from_timestamp(1_700_000_000, 0)
                .map(|d| d.fixed_offset()),
            title: title.to_string(),
            subtitle: format!("{} subtitle", title),
            author: "Jane".to_string(),
        }
    }

    fn page(token: Option<&str>, page: u32, posts: Vec<PostSummary>) -> ListingPage {
        ListingPage {
            continuation_token: token.map(str::to_string),
            page,
            posts,
        }
    }

    #[test]
    fn test_initialize_formats_and_starts_on_page_one() {
        let state = ViewState::initialize(&page(
            Some("page2url"),
            1,
            vec![summary("p1", "T1")],
        ));

        assert_eq!(state.page_index, 1);
        assert_eq!(state.continuation_token.as_deref(), Some("page2url"));
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.posts[0].published_at, "14 nov 2023");
        assert!(state.has_more());
    }

    #[test]
    fn test_initialize_empty_listing() {
        let state = ViewState::initialize(&ListingPage::empty());
        assert!(state.posts.is_empty());
        assert!(!state.has_more());
    }

    #[tokio::test]
    async fn test_load_more_appends_in_order() {
        let fetcher = MockFetcher::new(vec![
            Ok(page(Some("page3url"), 2, vec![summary("p2", "T2")])),
            Ok(page(None, 3, vec![summary("p3", "T3")])),
        ]);

        let state = ViewState::initialize(&page(
            Some("page2url"),
            1,
            vec![summary("p1", "T1")],
        ));

        let state = state.load_more(&fetcher).await.unwrap();
        assert_eq!(state.page_index, 2);
        assert_eq!(state.continuation_token.as_deref(), Some("page3url"));

        let state = state.load_more(&fetcher).await.unwrap();
        assert_eq!(state.page_index, 3);
        assert_eq!(state.continuation_token, None);

        let ids: Vec<&str> = state.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_exhausted_state_is_terminal() {
        let fetcher = MockFetcher::new(vec![Ok(page(None, 2, vec![summary("p2", "T2")]))]);

        let state = ViewState::initialize(&page(
            Some("page2url"),
            1,
            vec![summary("p1", "T1")],
        ));

        let state = state.load_more(&fetcher).await.unwrap();
        assert!(!state.has_more());
        assert_eq!(state.posts.len(), 2);

        // Token gone and past page one: no further fetch, posts untouched
        let after = state.load_more(&fetcher).await.unwrap();
        assert_eq!(after.posts, state.posts);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_tokenless_first_page_still_fetches() {
        let fetcher = MockFetcher::new(vec![Ok(page(None, 2, vec![summary("p2", "T2")]))]);

        let state = ViewState::initialize(&page(None, 1, vec![summary("p1", "T1")]));
        assert_eq!(state.page_index, 1);

        let state = state.load_more(&fetcher).await.unwrap();
        assert_eq!(fetcher.call_count(), 1);
        assert_eq!(state.posts.len(), 2);
    }

    #[tokio::test]
    async fn test_tokenless_later_page_is_a_noop() {
        let fetcher = MockFetcher::new(vec![]);

        let state = ViewState {
            posts: vec![PostCard::from_summary(&summary("p1", "T1"))],
            continuation_token: None,
            page_index: 2,
        };

        let after = state.load_more(&fetcher).await.unwrap();
        assert_eq!(fetcher.call_count(), 0);
        assert_eq!(after.posts, state.posts);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_state_usable() {
        let fetcher = MockFetcher::new(vec![Err(FetchError::Status {
            status: 500,
            url: "page2url".to_string(),
        })]);

        let state = ViewState::initialize(&page(
            Some("page2url"),
            1,
            vec![summary("p1", "T1")],
        ));

        let result = state.load_more(&fetcher).await;
        assert!(result.is_err());

        // Old state survives the failure untouched
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.continuation_token.as_deref(), Some("page2url"));
    }

    #[tokio::test]
    async fn test_repeat_of_identical_post_formats_identically() {
        let fetcher = MockFetcher::new(vec![Ok(page(None, 2, vec![summary("p1", "T1")]))]);

        let state = ViewState::initialize(&page(
            Some("page2url"),
            1,
            vec![summary("p1", "T1")],
        ));

        let state = state.load_more(&fetcher).await.unwrap();
        assert_eq!(state.posts[0].published_at, state.posts[1].published_at);
    }
}

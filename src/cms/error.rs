//! Content API error types

use thiserror::Error;

/// Errors surfaced by the content fetch adapter
///
/// None of these are retried automatically; callers decide whether to
/// fail the render or show a transient message.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response parsed but is missing required fields
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether this error is a plain 404 from the API
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}

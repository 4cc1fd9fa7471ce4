//! Content module - domain models for posts and listing pages

mod post;

pub use post::{ContentSection, ListingPage, PostDocument, PostSummary};

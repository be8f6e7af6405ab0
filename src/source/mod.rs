//! Feed source abstraction layer.
//!
//! This module defines the [`FeedSource`] trait, the [`Article`] record every
//! source produces, and the [`FilterType`] categories a source is asked for.
//! The concrete Google News client lives in [`google_news`]; the XML walk it
//! delegates to lives in [`parser`].
//!
//! The state machine in [`crate::state`] only sees the trait, so tests can
//! hand it a fake source instead of the network.

mod article;
mod filter;
mod google_news;
pub mod parser;

pub use article::Article;
pub use filter::FilterType;
pub use google_news::GoogleNewsSource;
pub use parser::ParseError;

use thiserror::Error;

/// Why a fetch produced no articles.
///
/// Callers treat every variant the same way; [`Display`](std::fmt::Display)
/// is the message shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: status {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid feed: {0}")]
    Parse(#[from] ParseError),
}

/// Something that can produce the articles for a category.
///
/// Fetches run on a background worker thread, so implementations must be
/// [`Send`] and [`Sync`].
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the current articles for `filter`.
    ///
    /// Exactly one request per call; no retries and no caching.
    fn fetch(&self, filter: FilterType) -> Result<Vec<Article>, FetchError>;
}

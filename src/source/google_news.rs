//! Google News RSS client.

use reqwest::blocking::Client;

use super::filter::GOOGLE_NEWS_BASE;
use super::{parser, Article, FeedSource, FetchError, FilterType};

/// Fetches category feeds from Google News over HTTP.
pub struct GoogleNewsSource {
    client: Client,
    base_url: String,
}

impl GoogleNewsSource {
    /// Build a source with a client identifying itself as `newsline/<version>`.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(GOOGLE_NEWS_BASE)
    }

    /// Same as [`new`](Self::new) but requesting feeds from another host.
    pub(crate) fn with_base_url(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("newsline/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl FeedSource for GoogleNewsSource {
    fn fetch(&self, filter: FilterType) -> Result<Vec<Article>, FetchError> {
        let url = filter.feed_url_at(&self.base_url);
        tracing::debug!(%url, category = ?filter, "fetching feed");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "feed request rejected");
            return Err(FetchError::Status(status));
        }

        let body = response.bytes()?;
        let articles = parser::parse_feed(&body)?;
        tracing::info!(category = ?filter, count = articles.len(), "fetched feed");
        Ok(articles)
    }
}

//! Load / reload state machine behind the article list.
//!
//! [`NewsState`] owns the selected category, the status of the most recent
//! fetch and the last successfully loaded items. A load is split in two so
//! the UI can show `Loading` while the fetch runs elsewhere:
//!
//! ```text
//!  begin_load(filter) ──► LoadTicket ──► (worker fetches) ──► complete(ticket, result)
//!        │                                                        │
//!        └─ state = Loading                      Ok  ─► items replaced, state = Loaded
//!                                                Err ─► items kept,     state = Error(msg)
//! ```
//!
//! Every `begin_*` call supersedes the loads before it. A completion whose
//! ticket is not the newest is dropped, so a slow fetch for an old category
//! can never overwrite the list of the one now selected.

use chrono::{DateTime, FixedOffset};

use crate::source::{Article, FeedSource, FetchError, FilterType};

/// Asia/Tokyo. Japan observes no daylight saving, so a fixed offset is exact.
const DISPLAY_OFFSET_SECS: i32 = 9 * 3600;
const DISPLAY_DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Outcome of the most recent fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Error(String),
}

/// Display-ready projection of an [`Article`].
///
/// Equality and hashing cover every field so a freshly loaded list can be
/// compared against the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewItem {
    pub title: String,
    pub link: String,
    pub source: String,
    /// `yyyy/MM/dd HH:mm` in Tokyo time, or `None` if the feed date was
    /// missing or unreadable.
    pub pub_date: Option<String>,
}

impl From<Article> for ViewItem {
    fn from(article: Article) -> Self {
        let pub_date = format_pub_date(&article.pub_date);
        Self {
            title: article.title,
            link: article.link,
            source: article.source,
            pub_date,
        }
    }
}

/// Format an RFC 2822 feed date (`Mon, 02 Jan 2023 03:04:05 GMT`) in Tokyo
/// time. Month and weekday names are always English, whatever the host
/// locale.
pub fn format_pub_date(raw: &str) -> Option<String> {
    let tokyo = FixedOffset::east_opt(DISPLAY_OFFSET_SECS)?;
    let parsed = DateTime::parse_from_rfc2822(raw.trim()).ok()?;
    Some(
        parsed
            .with_timezone(&tokyo)
            .format(DISPLAY_DATE_FORMAT)
            .to_string(),
    )
}

/// Proof that a load was started; hand it back to [`NewsState::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub filter: FilterType,
    generation: u64,
}

pub struct NewsState {
    filter: FilterType,
    load_state: LoadState,
    items: Vec<ViewItem>,
    generation: u64,
}

impl NewsState {
    /// A state with nothing loaded yet. No fetch is issued until
    /// [`begin_load`](Self::begin_load) is called.
    pub fn new(filter: FilterType) -> Self {
        Self {
            filter,
            load_state: LoadState::Loaded,
            items: Vec::new(),
            generation: 0,
        }
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn items(&self) -> &[ViewItem] {
        &self.items
    }

    /// Heading for the list: the selected category's label.
    pub fn title(&self) -> &'static str {
        self.filter.label()
    }

    /// Select `filter` and enter `Loading`.
    pub fn begin_load(&mut self, filter: FilterType) -> LoadTicket {
        self.filter = filter;
        self.load_state = LoadState::Loading;
        self.generation += 1;
        tracing::debug!(category = ?filter, generation = self.generation, "load started");
        LoadTicket {
            filter,
            generation: self.generation,
        }
    }

    /// Start another load of the selected category.
    pub fn begin_reload(&mut self) -> LoadTicket {
        self.begin_load(self.filter)
    }

    /// Apply the outcome of a fetch. Returns `false` when the ticket has been
    /// superseded by a later load and the result was dropped.
    ///
    /// On failure the previous items stay visible.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Article>, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                category = ?ticket.filter,
                generation = ticket.generation,
                current = self.generation,
                "dropping superseded load"
            );
            return false;
        }

        match result {
            Ok(articles) => {
                self.items = articles.into_iter().map(ViewItem::from).collect();
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(category = ?ticket.filter, error = %e, "load failed");
                self.load_state = LoadState::Error(e.to_string());
            }
        }
        true
    }

    /// Select `filter` and fetch it from `source` on the calling thread.
    pub fn load<S: FeedSource + ?Sized>(&mut self, source: &S, filter: FilterType) {
        let ticket = self.begin_load(filter);
        let result = source.fetch(filter);
        self.complete(ticket, result);
    }

    /// Fetch the selected category again on the calling thread.
    pub fn reload<S: FeedSource + ?Sized>(&mut self, source: &S) {
        self.load(source, self.filter);
    }
}

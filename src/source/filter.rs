//! News categories and the Google News endpoints they map to.
//!
//! The locale parameters are fixed to Japanese; the upstream feed expects
//! exactly this query string, so it is spelled out rather than URL-encoded
//! (`ceid=JP:ja` must keep its colon).

use clap::ValueEnum;

/// Production host; tests point the client somewhere else.
pub(crate) const GOOGLE_NEWS_BASE: &str = "https://news.google.com";

/// Path of the default "top stories" feed.
const TOP_STORIES_PATH: &str = "/rss";

/// Per-topic feed path; [`FilterType::code`] is appended.
const TOPIC_PATH_PREFIX: &str = "/news/rss/headlines/section/topic/";
const LOCALE_QUERY: &str = "?hl=ja&gl=JP&ceid=JP:ja";

/// A news category selector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FilterType {
    #[default]
    Top,
    World,
    Nation,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl FilterType {
    /// Every category, in tab order.
    pub const ALL: [FilterType; 9] = [
        FilterType::Top,
        FilterType::World,
        FilterType::Nation,
        FilterType::Business,
        FilterType::Technology,
        FilterType::Entertainment,
        FilterType::Sports,
        FilterType::Science,
        FilterType::Health,
    ];

    /// Machine code used in the topic URL. Empty for [`FilterType::Top`],
    /// which has its own endpoint.
    pub fn code(self) -> &'static str {
        match self {
            FilterType::Top => "",
            FilterType::World => "WORLD",
            FilterType::Nation => "NATION",
            FilterType::Business => "BUSINESS",
            FilterType::Technology => "TECHNOLOGY",
            FilterType::Entertainment => "ENTERTAINMENT",
            FilterType::Sports => "SPORTS",
            FilterType::Science => "SCIENCE",
            FilterType::Health => "HEALTH",
        }
    }

    /// Human-readable label shown in the category tabs.
    pub fn label(self) -> &'static str {
        match self {
            FilterType::Top => "トップ",
            FilterType::World => "国際",
            FilterType::Nation => "国内",
            FilterType::Business => "ビジネス",
            FilterType::Technology => "テクノロジー",
            FilterType::Entertainment => "エンタメ",
            FilterType::Sports => "スポーツ",
            FilterType::Science => "科学",
            FilterType::Health => "健康",
        }
    }

    /// Full request URL for this category.
    pub fn feed_url(self) -> String {
        self.feed_url_at(GOOGLE_NEWS_BASE)
    }

    /// Request URL for this category under `base` (scheme and host, no
    /// trailing slash).
    pub(crate) fn feed_url_at(self, base: &str) -> String {
        match self {
            FilterType::Top => format!("{base}{TOP_STORIES_PATH}{LOCALE_QUERY}"),
            other => format!("{base}{TOPIC_PATH_PREFIX}{}{LOCALE_QUERY}", other.code()),
        }
    }

    /// Position within [`FilterType::ALL`]; variants are declared in that order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next category, wrapping around after the last one.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous category, wrapping around before the first one.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

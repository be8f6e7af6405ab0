//! The raw entry produced by the feed parser.

/// A single `<item>` from an RSS document, captured verbatim.
///
/// Every field starts empty and is filled by concatenating the character
/// data found inside the matching child element. The publication date is
/// kept as the raw string; formatting happens when mapping to a
/// [`ViewItem`](crate::state::ViewItem).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    /// Raw `<pubDate>` text, e.g. `Mon, 02 Jan 2023 03:04:05 GMT`.
    pub pub_date: String,
    pub description: String,
    /// Publisher name from `<source>`.
    pub source: String,
}

//! Event-driven RSS parsing.
//!
//! [`parse_feed`] pulls tokens from a [`quick_xml::Reader`] and feeds them to
//! [`FeedParser`], a small state machine holding the articles collected so
//! far and the field currently receiving character data. The state machine
//! knows nothing about bytes or transports, so it can be driven directly in
//! tests.

use std::fmt::Display;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use super::Article;

/// Tag that opens a new article.
const ITEM_TAG: &[u8] = b"item";

/// Why a document could not be turned into articles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: String },

    #[error("unexpected end of document: <{0}> is never closed")]
    Unclosed(String),
}

/// Article fields that collect character data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    PubDate,
    Description,
    Source,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::PubDate),
            b"description" => Some(Field::Description),
            b"source" => Some(Field::Source),
            _ => None,
        }
    }

    fn slot(self, article: &mut Article) -> &mut String {
        match self {
            Field::Title => &mut article.title,
            Field::Link => &mut article.link,
            Field::PubDate => &mut article.pub_date,
            Field::Description => &mut article.description,
            Field::Source => &mut article.source,
        }
    }
}

/// Accumulates articles from a stream of start / text / end callbacks.
#[derive(Debug, Default)]
pub struct FeedParser {
    articles: Vec<Article>,
    field: Option<Field>,
    open: Vec<String>,
}

impl FeedParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// An element opened.
    pub fn start(&mut self, name: &[u8]) {
        if name == ITEM_TAG {
            self.articles.push(Article::default());
        }
        self.field = Field::from_tag(name);
        self.open.push(String::from_utf8_lossy(name).into_owned());
    }

    /// A chunk of character data arrived. Several chunks for the same
    /// element are concatenated.
    pub fn text(&mut self, chunk: &str) {
        let (Some(field), Some(article)) = (self.field, self.articles.last_mut()) else {
            return;
        };
        field.slot(article).push_str(chunk);
    }

    /// An element closed. Only the field cursor is reset; later text still
    /// belongs to the current article.
    pub fn end(&mut self) {
        self.field = None;
        self.open.pop();
    }

    /// Hand back the collected articles, failing if any element is still open.
    pub fn finish(self) -> Result<Vec<Article>, ParseError> {
        match self.open.last() {
            Some(name) => Err(ParseError::Unclosed(name.clone())),
            None => Ok(self.articles),
        }
    }
}

/// Parse an RSS document into articles.
///
/// Empty input yields an empty list. Any syntax error discards whatever was
/// collected before it.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<Article>, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    let mut parser = FeedParser::new();
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| malformed(&reader, e))?;

        match event {
            Event::Start(e) => parser.start(e.name().as_ref()),
            Event::Empty(e) => {
                parser.start(e.name().as_ref());
                parser.end();
            }
            Event::End(_) => parser.end(),
            Event::Text(e) => {
                let text = e.unescape().map_err(|e| malformed(&reader, e))?;
                parser.text(&text);
            }
            Event::CData(e) => parser.text(&String::from_utf8_lossy(&e)),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let articles = parser.finish()?;
    tracing::debug!(count = articles.len(), "parsed feed");
    Ok(articles)
}

fn malformed(reader: &Reader<&[u8]>, err: impl Display) -> ParseError {
    ParseError::Malformed {
        position: reader.buffer_position() as u64,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SINGLE_ITEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Google ニュース</title>
    <item>
      <title>First Post</title>
      <link>https://example.com/1</link>
      <guid isPermaLink="false">CBMi-1</guid>
      <pubDate>Mon, 02 Jan 2023 03:04:05 GMT</pubDate>
      <description>Summary &amp; more</description>
      <source url="https://example.com">Example Times</source>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn empty_input_yields_no_articles() {
        assert_eq!(parse_feed(b""), Ok(vec![]));
    }

    #[test]
    fn single_item_captures_all_fields() {
        let articles = parse_feed(SINGLE_ITEM.as_bytes()).unwrap();

        assert_eq!(
            articles,
            vec![Article {
                title: "First Post".into(),
                link: "https://example.com/1".into(),
                pub_date: "Mon, 02 Jan 2023 03:04:05 GMT".into(),
                description: "Summary & more".into(),
                source: "Example Times".into(),
            }]
        );
    }

    #[test]
    fn channel_title_before_first_item_is_ignored() {
        let articles = parse_feed(SINGLE_ITEM.as_bytes()).unwrap();
        assert!(!articles[0].title.contains("Google"));
    }

    #[test]
    fn chunked_text_is_concatenated() {
        let mut parser = FeedParser::new();
        parser.start(b"item");
        parser.start(b"title");
        parser.text("Hel");
        parser.text("lo");
        parser.end();
        parser.end();

        let articles = parser.finish().unwrap();
        assert_eq!(articles[0].title, "Hello");
    }

    #[test]
    fn text_and_cdata_chunks_are_concatenated() {
        let xml = "<rss><item><title>Hel<![CDATA[lo]]></title></item></rss>";
        let articles = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(articles[0].title, "Hello");
    }

    #[test]
    fn unrecognized_element_text_is_ignored() {
        let xml = "<rss><item>\
            <title>Kept</title>\
            <guid>ignored-guid</guid>\
            <link>https://example.com/a</link>\
            </item></rss>";
        let articles = parse_feed(xml.as_bytes()).unwrap();

        assert_eq!(articles[0].title, "Kept");
        assert_eq!(articles[0].link, "https://example.com/a");
        assert!(!articles[0].description.contains("ignored"));
    }

    #[test]
    fn prefixed_names_are_not_fields() {
        let xml = "<rss><item><title>Plain</title><media:title>Other</media:title></item></rss>";
        let articles = parse_feed(xml.as_bytes()).unwrap();
        assert_eq!(articles[0].title, "Plain");
    }

    #[test]
    fn multiple_items_stay_separate() {
        let xml = "<rss><channel>\
            <item><title>A</title><source>S1</source></item>\
            <item><title>B</title><source>S2</source></item>\
            </channel></rss>";
        let articles = parse_feed(xml.as_bytes()).unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].title, "B");
        assert_eq!(articles[1].source, "S2");
    }

    #[test]
    fn self_closing_item_yields_empty_article() {
        let articles = parse_feed(b"<rss><item/></rss>").unwrap();
        assert_eq!(articles, vec![Article::default()]);
    }

    #[test]
    fn unclosed_elements_fail_without_partial_list() {
        let xml = "<rss><channel><item><title>Unclosed";
        assert!(parse_feed(xml.as_bytes()).is_err());
    }

    #[test]
    fn finish_reports_innermost_open_element() {
        let mut parser = FeedParser::new();
        parser.start(b"rss");
        parser.start(b"item");
        parser.start(b"title");
        parser.text("partial");

        assert_eq!(parser.finish(), Err(ParseError::Unclosed("title".into())));
    }

    #[test]
    fn unterminated_tag_is_malformed() {
        let xml = "<rss><item><title>Fine</title><link";
        assert!(matches!(
            parse_feed(xml.as_bytes()),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn mismatched_end_tag_is_malformed() {
        let xml = "<rss><item><title>Oops</link></item></rss>";
        assert!(matches!(
            parse_feed(xml.as_bytes()),
            Err(ParseError::Malformed { .. })
        ));
    }
}

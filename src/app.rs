use ratatui::widgets::ListState;
use url::Url;

use crate::source::FilterType;
use crate::state::{LoadState, LoadTicket, NewsState, ViewItem};
use crate::worker::LoadMsg;

pub struct App {
    /// Category, load status and the items currently shown.
    pub news: NewsState,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// One-off message that overrides the load status in the status bar.
    pub notice: Option<String>,
    /// Loads started since the main loop last looked.
    pending: Vec<LoadTicket>,
}

impl App {
    /// Create the app and queue the initial load of `filter`.
    pub fn new(filter: FilterType) -> Self {
        let mut app = Self {
            news: NewsState::new(filter),
            list_state: ListState::default(),
            quit: false,
            notice: None,
            pending: Vec::new(),
        };
        app.select_filter(filter);
        app
    }

    /// Loads the main loop should hand to the worker.
    pub fn take_pending(&mut self) -> Vec<LoadTicket> {
        std::mem::take(&mut self.pending)
    }

    // -- loading -------------------------------------------------------------

    pub fn select_filter(&mut self, filter: FilterType) {
        self.notice = None;
        let ticket = self.news.begin_load(filter);
        self.pending.push(ticket);
    }

    pub fn next_filter(&mut self) {
        self.select_filter(self.news.filter().next());
    }

    pub fn previous_filter(&mut self) {
        self.select_filter(self.news.filter().previous());
    }

    /// Pull-to-refresh: fetch the selected category again.
    pub fn reload(&mut self) {
        self.notice = None;
        let ticket = self.news.begin_reload();
        self.pending.push(ticket);
    }

    /// Apply a finished fetch. Keeps the highlighted item selected when it is
    /// still present in the new list.
    pub fn apply(&mut self, msg: LoadMsg) {
        let previous = self.selected_item().cloned();
        if !self.news.complete(msg.ticket, msg.result) {
            return;
        }
        if self.news.load_state() != &LoadState::Loaded {
            return;
        }

        let items = self.news.items();
        let selected = match previous {
            Some(prev) => items.iter().position(|i| *i == prev).or(Some(0)),
            None => Some(0),
        };
        self.list_state
            .select(selected.filter(|_| !items.is_empty()));
    }

    // -- navigation ----------------------------------------------------------

    pub fn selected_item(&self) -> Option<&ViewItem> {
        self.list_state
            .selected()
            .and_then(|i| self.news.items().get(i))
    }

    pub fn select_next(&mut self) {
        let len = self.news.items().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.news.items().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.news.items().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.news.items().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    // -- browser -------------------------------------------------------------

    /// Open the selected item's link in the system browser.
    pub fn open_selected(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };
        let notice = match browsable_url(&item.link) {
            Ok(url) => match open::that(url.as_str()) {
                Ok(()) => format!("Opening {}", url.host_str().unwrap_or("link")),
                Err(e) => {
                    tracing::warn!(%url, error = %e, "failed to open browser");
                    format!("Failed to open browser: {e}")
                }
            },
            Err(e) => e,
        };
        self.notice = Some(notice);
    }
}

/// Only http(s) links are passed to the system opener.
fn browsable_url(link: &str) -> Result<Url, String> {
    let url = Url::parse(link.trim()).map_err(|e| format!("Invalid link: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("Refusing to open {other}: link")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::{article, parse_failure};

    fn loaded_app(titles: &[&str]) -> App {
        let mut app = App::new(FilterType::Top);
        let ticket = app.take_pending().pop().unwrap();
        app.apply(LoadMsg {
            ticket,
            result: Ok(titles.iter().map(|t| article(t)).collect()),
        });
        app
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_queues_initial_load() {
        let mut app = App::new(FilterType::Sports);
        assert_eq!(app.news.load_state(), &LoadState::Loading);

        let pending = app.take_pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].filter, FilterType::Sports);
        assert!(app.take_pending().is_empty());
    }

    #[test]
    fn successful_load_selects_first_item() {
        let app = loaded_app(&["a", "b"]);
        assert_eq!(app.list_state.selected(), Some(0));
        assert_eq!(app.selected_item().unwrap().title, "a");
    }

    #[test]
    fn empty_load_clears_selection() {
        let app = loaded_app(&[]);
        assert!(app.list_state.selected().is_none());
    }

    // -- loading -------------------------------------------------------------

    #[test]
    fn reload_keeps_selection_on_same_item() {
        let mut app = loaded_app(&["a", "b", "c"]);
        app.select_last();

        app.reload();
        let ticket = app.take_pending().pop().unwrap();
        app.apply(LoadMsg {
            ticket,
            result: Ok(vec![article("new"), article("a"), article("b"), article("c")]),
        });

        assert_eq!(app.selected_item().unwrap().title, "c");
    }

    #[test]
    fn failed_reload_keeps_items_and_selection() {
        let mut app = loaded_app(&["a", "b"]);
        app.select_next();

        app.reload();
        let ticket = app.take_pending().pop().unwrap();
        app.apply(LoadMsg {
            ticket,
            result: Err(parse_failure()),
        });

        assert_eq!(app.news.items().len(), 2);
        assert_eq!(app.list_state.selected(), Some(1));
        assert!(matches!(app.news.load_state(), LoadState::Error(_)));
    }

    #[test]
    fn filter_cycling_queues_loads() {
        let mut app = loaded_app(&[]);
        app.next_filter();
        app.next_filter();
        app.previous_filter();

        let filters: Vec<_> = app.take_pending().iter().map(|t| t.filter).collect();
        assert_eq!(
            filters,
            vec![FilterType::World, FilterType::Nation, FilterType::World]
        );
        assert_eq!(app.news.filter(), FilterType::World);
    }

    #[test]
    fn stale_result_after_category_switch_is_ignored() {
        let mut app = App::new(FilterType::Top);
        let stale = app.take_pending().pop().unwrap();
        app.select_filter(FilterType::Science);

        app.apply(LoadMsg {
            ticket: stale,
            result: Ok(vec![article("top-story")]),
        });

        assert!(app.news.items().is_empty());
        assert_eq!(app.news.load_state(), &LoadState::Loading);
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_is_noop() {
        let mut app = loaded_app(&[]);
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn select_next_clamps_at_last_item() {
        let mut app = loaded_app(&["a", "b", "c"]);
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn select_previous_clamps_at_zero() {
        let mut app = loaded_app(&["a", "b", "c"]);
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn select_first_and_last_jump() {
        let mut app = loaded_app(&["a", "b", "c"]);
        app.select_last();
        assert_eq!(app.list_state.selected(), Some(2));
        app.select_first();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    // -- browser -------------------------------------------------------------

    #[test]
    fn browsable_url_accepts_http_and_https() {
        assert!(browsable_url("https://news.google.com/rss/articles/abc").is_ok());
        assert!(browsable_url("http://example.com").is_ok());
    }

    #[test]
    fn browsable_url_rejects_other_schemes() {
        assert!(browsable_url("file:///etc/passwd").is_err());
        assert!(browsable_url("javascript:alert(1)").is_err());
        assert!(browsable_url("").is_err());
    }

    #[test]
    fn open_without_selection_is_noop() {
        let mut app = loaded_app(&[]);
        app.open_selected();
        assert!(app.notice.is_none());
    }
}

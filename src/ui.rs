//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]). The layout is three rows: category
//! tabs, the scrollable article list, and a one-line status bar.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::source::FilterType;
use crate::state::LoadState;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [tabs_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tabs(app, frame, tabs_area);
    draw_article_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

/// Render the category selector.
fn draw_tabs(app: &App, frame: &mut Frame, area: Rect) {
    let titles = FilterType::ALL.iter().map(|f| f.label());
    let tabs = Tabs::new(titles)
        .block(Block::default().title(" Google News ").borders(Borders::ALL))
        .select(app.news.filter().index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

/// Render the scrollable article list.
fn draw_article_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .news
        .items()
        .iter()
        .map(|item| {
            let date_str = item.pub_date.as_deref().unwrap_or("");

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<16}", date_str),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(item.title.as_str(), Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!("[{}]", item.source),
                    Style::default().fg(Color::Cyan),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(format!(" {} ", app.news.title()))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let (text, color) = match (&app.notice, app.news.load_state()) {
        (Some(notice), _) => (notice.clone(), Color::Yellow),
        (None, LoadState::Loading) => ("Loading…".to_string(), Color::Yellow),
        (None, LoadState::Loaded) => (
            format!("{} articles", app.news.items().len()),
            Color::Green,
        ),
        (None, LoadState::Error(msg)) => (format!("Error: {msg}"), Color::Red),
    };

    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(text, Style::default().fg(color)),
        Span::raw("  q: quit  ↑/↓: scroll  ←/→: category  r: reload  Enter: open"),
    ]));
    frame.render_widget(status, area);
}

//! Layout rendering (top bar, sidebar, status line)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::ActiveSection;
use super::Snapshot;

const SEARCH_PLACEHOLDER: &str = "Search podcasts and episodes...";

pub fn render_top_bar(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(9),      // Back / forward
            Constraint::Min(20),        // Search input
            Constraint::Percentage(35), // Location
        ])
        .split(area);

    let arrow_style = |enabled: bool| {
        if enabled {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let history = Paragraph::new(Line::from(vec![
        Span::styled("◀", arrow_style(snapshot.can_go_back)),
        Span::raw("  "),
        Span::styled("▶", arrow_style(snapshot.can_go_forward)),
    ]))
    .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(history, chunks[0]);

    let focused = snapshot.ui.active_section == ActiveSection::Search;
    let accent = if focused {
        Style::default().fg(Color::Rgb(0x7c, 0x3a, 0xed))
    } else {
        Style::default()
    };

    let input = &snapshot.search.input_value;
    let text = if input.is_empty() {
        Line::from(Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else if focused {
        Line::from(vec![Span::raw(input.as_str()), Span::styled("▏", accent)])
    } else {
        Line::from(input.as_str())
    };

    // Spinner while a commit is pending
    let indicator = if snapshot.search.is_searching { " ⟳ " } else { " ⌕ " };

    let search = Paragraph::new(text).centered().block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .title(Line::from(indicator).right_aligned())
            .padding(Padding::horizontal(1))
            .border_style(accent),
    );
    frame.render_widget(search, chunks[1]);

    let location = Paragraph::new(snapshot.href.as_str())
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Location "));
    frame.render_widget(location, chunks[2]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Navigation
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let heading = |label: &'static str| {
        ListItem::new(label).style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
    };
    let link = |label: &'static str| ListItem::new(format!("  {}", label)).style(Style::default().fg(Color::White));

    let items = vec![
        link("Home"),
        link("Discover"),
        ListItem::new(""),
        heading("Your Stuff"),
        link("My Queue"),
        link("My Podcasts"),
        link("Recents"),
    ];

    let nav = List::new(items).block(
        Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .title(" podsearch ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(nav, chunks[0]);

    let footer = Paragraph::new(format!("v{}", env!("CARGO_PKG_VERSION")))
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(footer, chunks[1]);
}

pub fn render_status_line(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let line = match &snapshot.ui.status_message {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            " Tab: sections  Enter: search/open  m: layout menu  v: cycle layout  Alt+←/→: history  h: help  Ctrl+Q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

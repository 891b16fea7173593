//! Main content area rendering (results page)

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::config::ImageHosts;
use crate::model::ActiveSection;
use super::episodes::EpisodeSection;
use super::podcasts::{self, PodcastSection};
use super::Snapshot;

pub fn render_main_content(frame: &mut Frame, area: Rect, snapshot: &Snapshot, image_hosts: &ImageHosts) {
    let content = &snapshot.content;

    if content.is_loading {
        render_notice(frame, area, vec![Line::from(Span::styled(
            "⟳ Loading...",
            Style::default().fg(Color::Cyan),
        ))]);
        return;
    }

    if let Some(error) = &content.error {
        render_notice(frame, area, vec![Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))]);
        return;
    }

    let query = snapshot.search.committed_query.as_str();
    let results = &content.results;
    if results.is_empty() {
        let mut lines = vec![Line::from(Span::styled(
            "No results found",
            Style::default().add_modifier(Modifier::BOLD),
        ))];
        if !query.is_empty() {
            lines.push(Line::from(Span::styled(
                "Try searching for different keywords",
                Style::default().fg(Color::DarkGray),
            )));
        }
        render_notice(frame, area, lines);
        return;
    }

    let ui = &snapshot.ui;
    let podcast_section = (!results.podcasts.is_empty()).then(|| PodcastSection {
        podcasts: &results.podcasts,
        mode: snapshot.search.podcast_layout_mode,
        selected: ui.podcast_selected,
        focused: ui.active_section == ActiveSection::Podcasts,
        query,
        image_hosts,
    });
    let episode_section = (!results.episodes.is_empty()).then(|| EpisodeSection {
        episodes: &results.episodes,
        mode: snapshot.search.episode_layout_mode,
        selected: ui.episode_selected,
        focused: ui.active_section == ActiveSection::Episodes,
        query,
    });

    match (podcast_section, episode_section) {
        (Some(podcasts), Some(episodes)) => {
            let podcast_height =
                podcasts::preferred_height(podcasts.mode, podcasts.podcasts.len(), area.width);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(podcast_height), Constraint::Min(0)])
                .split(area);
            podcasts.render(frame, chunks[0]);
            episodes.render(frame, chunks[1]);
        }
        (Some(podcasts), None) => podcasts.render(frame, area),
        (None, Some(episodes)) => episodes.render(frame, area),
        (None, None) => {}
    }
}

fn render_notice(frame: &mut Frame, area: Rect, mut lines: Vec<Line>) {
    // Roughly center vertically
    let padding = area.height.saturating_sub(lines.len() as u16 + 2) / 2;
    let mut padded = vec![Line::from(""); padding as usize];
    padded.append(&mut lines);

    let notice = Paragraph::new(padded)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(notice, area);
}

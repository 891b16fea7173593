//! Episodes section in its four layouts

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem},
    Frame,
};

use crate::model::format::{format_duration_from_millis, format_release_date};
use crate::model::{cards_per_row, Episode, EpisodeLayoutMode, CARD_WIDTH};
use super::utils::{
    carousel_arrows, carousel_window, grid_window, render_card, render_scrollable_list,
    title_style, truncate_string, wrap_text,
};

/// Height of a scroll/grid tile: title, podcast, date, minutes
pub const EPISODE_TILE_HEIGHT: u16 = 6;

const DESCRIPTION_LINES: usize = 2;

pub fn section_title(query: &str) -> String {
    if query.is_empty() {
        "Popular episodes".to_string()
    } else {
        format!("Top episodes for {}", query)
    }
}

pub struct EpisodeSection<'a> {
    pub episodes: &'a [Episode],
    pub mode: EpisodeLayoutMode,
    pub selected: usize,
    pub focused: bool,
    pub query: &'a str,
}

impl EpisodeSection<'_> {
    fn block(&self) -> Block<'static> {
        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", section_title(self.query)))
            .title(Line::from(format!(" [m] {} ", self.mode.label())).right_aligned())
            .border_style(border_style)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self.mode {
            EpisodeLayoutMode::Compact => self.render_compact(frame, area),
            EpisodeLayoutMode::Scroll => self.render_scroll(frame, area),
            EpisodeLayoutMode::Grid => self.render_grid(frame, area),
            EpisodeLayoutMode::List => self.render_list(frame, area),
        }
    }

    fn selection_style(&self, index: usize) -> Style {
        if index == self.selected && self.focused {
            Style::default().bg(Color::Rgb(0x2a, 0x2a, 0x2a))
        } else {
            Style::default()
        }
    }

    fn render_compact(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .episodes
            .iter()
            .enumerate()
            .map(|(i, episode)| {
                let selected = i == self.selected;
                let lines = vec![
                    Line::from(Span::styled(
                        truncate_string(&episode.title, width),
                        title_style(&episode.id, selected),
                    )),
                    Line::from(Span::styled(
                        truncate_string(&episode.podcast_name, width),
                        Style::default().fg(Color::Gray),
                    )),
                    Line::from(Span::styled(
                        meta_line(episode),
                        Style::default().fg(Color::DarkGray),
                    )),
                    divider(width),
                ];
                ListItem::new(lines).style(self.selection_style(i))
            })
            .collect();

        let selected = (!self.episodes.is_empty()).then_some(self.selected);
        render_scrollable_list(frame, area, items, selected, self.block());
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .episodes
            .iter()
            .enumerate()
            .map(|(i, episode)| {
                let selected = i == self.selected;
                let mut lines = vec![
                    Line::from(Span::styled(
                        truncate_string(&episode.title, width),
                        title_style(&episode.id, selected),
                    )),
                    Line::from(Span::styled(
                        truncate_string(&episode.podcast_name, width),
                        Style::default().fg(Color::Gray),
                    )),
                ];
                lines.extend(
                    wrap_text(&episode.description, width, DESCRIPTION_LINES)
                        .into_iter()
                        .map(|text| Line::from(Span::styled(text, Style::default().fg(Color::White)))),
                );
                lines.push(Line::from(Span::styled(
                    meta_line(episode),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(divider(width));
                ListItem::new(lines).style(self.selection_style(i))
            })
            .collect();

        let selected = (!self.episodes.is_empty()).then_some(self.selected);
        render_scrollable_list(frame, area, items, selected, self.block());
    }

    fn render_scroll(&self, frame: &mut Frame, area: Rect) {
        let block = self.block();
        let inner = block.inner(area);
        let per_row = cards_per_row(inner.width);
        let visible = carousel_window(self.selected, self.episodes.len(), per_row);
        let arrows = carousel_arrows(visible.start > 0, visible.end < self.episodes.len());
        frame.render_widget(block.title_bottom(arrows.right_aligned()), area);

        for (slot, index) in visible.enumerate() {
            let tile = Rect {
                x: inner.x + slot as u16 * CARD_WIDTH,
                y: inner.y,
                width: CARD_WIDTH.min(inner.width),
                height: EPISODE_TILE_HEIGHT.min(inner.height),
            };
            if tile.right() > inner.right() {
                continue;
            }
            self.render_tile(frame, tile, index);
        }
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let per_row = cards_per_row(inner.width);
        let visible_rows = (inner.height / EPISODE_TILE_HEIGHT).max(1) as usize;
        let rows = grid_window(self.selected, self.episodes.len(), per_row, visible_rows);
        let first = rows.start * per_row;
        let last = (rows.end * per_row).min(self.episodes.len());

        for index in first..last {
            let slot = index - first;
            let tile = Rect {
                x: inner.x + (slot % per_row) as u16 * CARD_WIDTH,
                y: inner.y + (slot / per_row) as u16 * EPISODE_TILE_HEIGHT,
                width: CARD_WIDTH.min(inner.width),
                height: EPISODE_TILE_HEIGHT,
            };
            if tile.bottom() > inner.bottom() || tile.right() > inner.right() {
                continue;
            }
            self.render_tile(frame, tile, index);
        }
    }

    fn render_tile(&self, frame: &mut Frame, area: Rect, index: usize) {
        let episode = &self.episodes[index];
        let selected = index == self.selected;
        let width = area.width.saturating_sub(4) as usize;
        let lines = vec![
            Line::from(Span::styled(
                truncate_string(&episode.title, width),
                title_style(&episode.id, selected),
            )),
            Line::from(Span::styled(
                truncate_string(&episode.podcast_name, width),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format_release_date(episode.release_date.as_ref()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format_duration_from_millis(episode.track_time_millis),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
        ];
        render_card(frame, area, lines, selected, self.focused);
    }
}

/// `"{date} • {minutes}"`, dropping whichever side is unknown
fn meta_line(episode: &Episode) -> String {
    let date = format_release_date(episode.release_date.as_ref());
    let minutes = format_duration_from_millis(episode.track_time_millis);
    match (date.is_empty(), minutes.is_empty()) {
        (false, false) => format!("{} • {}", date, minutes),
        (false, true) => date,
        (true, _) => minutes,
    }
}

fn divider(width: usize) -> Line<'static> {
    Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(Color::Rgb(0x33, 0x33, 0x33)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::format::parse_release_date;

    fn episode(track_time_millis: Option<u64>, date: Option<&str>) -> Episode {
        Episode {
            id: "1".into(),
            title: "Pilot".into(),
            podcast_name: "Show".into(),
            image_url: "/placeholder.svg".into(),
            duration: "--:--".into(),
            description: String::new(),
            track_time_millis,
            release_date: date.and_then(parse_release_date),
        }
    }

    #[test]
    fn meta_line_joins_date_and_minutes() {
        assert_eq!(
            meta_line(&episode(Some(2_520_000), Some("2025-02-23"))),
            "Feb 23, 2025 • 42 min"
        );
        assert_eq!(meta_line(&episode(None, Some("2025-02-23"))), "Feb 23, 2025");
        assert_eq!(meta_line(&episode(Some(125_000), None)), "2 min");
        assert_eq!(meta_line(&episode(None, None)), "");
    }

    #[test]
    fn compact_cards_show_date_and_minutes() {
        use ratatui::{backend::TestBackend, Terminal};

        let episodes = vec![episode(Some(2_520_000), Some("2025-02-23"))];
        let section = EpisodeSection {
            episodes: &episodes,
            mode: EpisodeLayoutMode::Compact,
            selected: 0,
            focused: false,
            query: "",
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|frame| section.render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let rendered: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buffer[(x, y)].symbol().to_string())
            .collect();
        assert!(rendered.contains("Feb 23, 2025 • 42 min"));
        assert!(!rendered.contains("--:--"));
    }

    #[test]
    fn headings_follow_query() {
        assert_eq!(section_title(""), "Popular episodes");
        assert_eq!(section_title("jazz"), "Top episodes for jazz");
    }
}

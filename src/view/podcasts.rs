//! Podcasts section: carousel or grid of podcast cards

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};

use crate::config::ImageHosts;
use crate::model::{cards_per_row, Podcast, PodcastLayoutMode, CARD_WIDTH};
use super::utils::{
    carousel_arrows, carousel_window, grid_window, render_card, title_style, truncate_string,
};

pub const PODCAST_CARD_HEIGHT: u16 = 5;

pub fn section_title(query: &str) -> String {
    if query.is_empty() {
        "Popular podcasts".to_string()
    } else {
        format!("Top podcasts for {}", query)
    }
}

/// Rows the section wants for `count` podcasts at `width`
pub fn preferred_height(mode: PodcastLayoutMode, count: usize, width: u16) -> u16 {
    let rows = match mode {
        PodcastLayoutMode::Scroll => 1,
        PodcastLayoutMode::Grid => count.div_ceil(cards_per_row(width.saturating_sub(2))).clamp(1, 2),
    };
    rows as u16 * PODCAST_CARD_HEIGHT + 2
}

pub struct PodcastSection<'a> {
    pub podcasts: &'a [Podcast],
    pub mode: PodcastLayoutMode,
    pub selected: usize,
    pub focused: bool,
    pub query: &'a str,
    pub image_hosts: &'a ImageHosts,
}

impl PodcastSection<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };

        let inner_width = area.width.saturating_sub(2);
        let per_row = cards_per_row(inner_width);
        let visible = match self.mode {
            PodcastLayoutMode::Scroll => carousel_window(self.selected, self.podcasts.len(), per_row),
            PodcastLayoutMode::Grid => {
                let visible_rows = (area.height.saturating_sub(2) / PODCAST_CARD_HEIGHT).max(1) as usize;
                let rows = grid_window(self.selected, self.podcasts.len(), per_row, visible_rows);
                (rows.start * per_row)..(rows.end * per_row).min(self.podcasts.len())
            }
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", section_title(self.query)))
            .title(Line::from(format!(" [m] {} ", self.mode.label())).right_aligned())
            .border_style(border_style);
        if self.mode == PodcastLayoutMode::Scroll {
            let arrows = carousel_arrows(visible.start > 0, visible.end < self.podcasts.len());
            block = block.title_bottom(arrows.right_aligned());
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        for (slot, index) in visible.clone().enumerate() {
            let (column, row) = (slot % per_row, slot / per_row);
            let card_area = Rect {
                x: inner.x + column as u16 * CARD_WIDTH,
                y: inner.y + row as u16 * PODCAST_CARD_HEIGHT,
                width: CARD_WIDTH.min(inner.width),
                height: PODCAST_CARD_HEIGHT,
            };
            if card_area.bottom() > inner.bottom() || card_area.right() > inner.right() {
                continue;
            }
            self.render_podcast_card(frame, card_area, &self.podcasts[index], index == self.selected);
        }
    }

    fn render_podcast_card(&self, frame: &mut Frame, area: Rect, podcast: &Podcast, selected: bool) {
        let text_width = area.width.saturating_sub(4) as usize;
        let artwork = match self.image_hosts.permitted_host(&podcast.image_url) {
            Some(host) => format!("◧ {}", host),
            None => "◧ no artwork".to_string(),
        };

        let lines = vec![
            Line::from(Span::styled(
                truncate_string(&podcast.title, text_width),
                title_style(&podcast.id, selected),
            )),
            Line::from(Span::styled(
                truncate_string(&podcast.author, text_width),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                truncate_string(&artwork, text_width),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        render_card(frame, area, lines, selected, self.focused);
    }
}

//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (cards, truncation, wrapping, carousel windows)
//! - `layout`: Main layout structure (top bar, sidebar, status line)
//! - `content`: Results page (loading, error, empty, sections)
//! - `podcasts` / `episodes`: The two results sections and their layouts
//! - `overlays`: Modal overlays (open menu, help)

mod utils;
mod layout;
mod content;
mod podcasts;
mod episodes;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::config::ImageHosts;
use crate::model::{AppModel, ContentState, SearchState, UiState};

/// Below this width the sidebar is hidden
const SIDEBAR_MIN_WIDTH: u16 = 80;
const SIDEBAR_WIDTH: u16 = 22;

/// Everything one frame needs, copied out of the model before drawing
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub search: SearchState,
    pub ui: UiState,
    pub content: ContentState,
    pub href: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl Snapshot {
    pub async fn capture(model: &AppModel) -> Self {
        let (can_go_back, can_go_forward) = model.history_flags().await;
        Self {
            search: model.get_search_state().await,
            ui: model.get_ui_state().await,
            content: model.get_content_state().await,
            href: model.location_href().await,
            can_go_back,
            can_go_forward,
        }
    }
}

pub struct AppView;

impl AppView {
    /// Draws a frame and returns the width of the results area
    pub fn render(frame: &mut Frame, snapshot: &Snapshot, image_hosts: &ImageHosts) -> u16 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // History + search + location
                Constraint::Min(0),    // Sidebar + results
                Constraint::Length(1), // Status line
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], snapshot);

        let content_area = if chunks[1].width >= SIDEBAR_MIN_WIDTH {
            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(chunks[1]);
            layout::render_sidebar(frame, main_chunks[0]);
            main_chunks[1]
        } else {
            chunks[1]
        };

        content::render_main_content(frame, content_area, snapshot, image_hosts);
        layout::render_status_line(frame, chunks[2], snapshot);

        if let Some(menu) = snapshot.ui.overlay.menu() {
            overlays::render_menu(frame, menu);
        }

        if snapshot.ui.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Section borders take one cell on each side
        content_area.width.saturating_sub(2)
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::model::{Episode, EpisodeLayoutMode, Location, Podcast, SearchResults};

    fn results() -> SearchResults {
        let podcasts = (0..3)
            .map(|i| Podcast {
                id: format!("p{i}"),
                title: format!("Jazz Hour {i}"),
                author: "Radio".into(),
                image_url: "https://is1-ssl.mzstatic.com/a.jpg".into(),
            })
            .collect();
        let episodes = (0..4)
            .map(|i| Episode {
                id: format!("e{i}"),
                title: format!("Episode {i}"),
                podcast_name: "Jazz Hour".into(),
                image_url: "/placeholder.svg".into(),
                duration: "2:05".into(),
                description: "Standards and late night sessions".into(),
                track_time_millis: Some(125_000),
                release_date: None,
            })
            .collect();
        SearchResults { podcasts, episodes }
    }

    async fn snapshot(query: &str, results: SearchResults) -> Snapshot {
        let model = AppModel::new(Location::parse("http://localhost:3000/").unwrap());
        model.set_committed_query(query.to_string()).await;
        model.set_search_results(results).await;
        Snapshot::capture(&model).await
    }

    fn draw(snapshot: &Snapshot) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| {
                AppView::render(frame, snapshot, &ImageHosts::default());
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn contains(buffer: &Buffer, needle: &str) -> bool {
        let area = buffer.area;
        (0..area.height).any(|y| {
            let row: String = (0..area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect();
            row.contains(needle)
        })
    }

    #[tokio::test]
    async fn headings_reflect_committed_query() {
        let buffer = draw(&snapshot("jazz", results()).await);
        assert!(contains(&buffer, "Top podcasts for jazz"));
        assert!(contains(&buffer, "Top episodes for jazz"));

        let buffer = draw(&snapshot("", results()).await);
        assert!(contains(&buffer, "Popular podcasts"));
        assert!(contains(&buffer, "Popular episodes"));
    }

    #[tokio::test]
    async fn empty_results_show_hint_only_for_a_query() {
        let buffer = draw(&snapshot("zzz", SearchResults::default()).await);
        assert!(contains(&buffer, "No results found"));
        assert!(contains(&buffer, "Try searching for different keywords"));

        let buffer = draw(&snapshot("", SearchResults::default()).await);
        assert!(contains(&buffer, "No results found"));
        assert!(!contains(&buffer, "Try searching"));
    }

    #[tokio::test]
    async fn section_without_items_is_skipped() {
        let mut only_episodes = results();
        only_episodes.podcasts.clear();
        let buffer = draw(&snapshot("jazz", only_episodes).await);
        assert!(!contains(&buffer, "Top podcasts"));
        assert!(contains(&buffer, "Top episodes for jazz"));
    }

    #[tokio::test]
    async fn episode_layouts_render_differently_for_same_data() {
        let base = snapshot("jazz", results()).await;
        let buffers: Vec<Buffer> = EpisodeLayoutMode::ALL
            .into_iter()
            .map(|mode| {
                let mut snapshot = base.clone();
                snapshot.search.episode_layout_mode = mode;
                draw(&snapshot)
            })
            .collect();

        for (i, a) in buffers.iter().enumerate() {
            for b in &buffers[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[tokio::test]
    async fn error_replaces_results() {
        let mut snapshot = snapshot("jazz", results()).await;
        snapshot.content.error = Some("Failed to fetch".into());
        let buffer = draw(&snapshot);
        assert!(contains(&buffer, "Failed to fetch"));
        assert!(!contains(&buffer, "Top episodes"));
    }
}

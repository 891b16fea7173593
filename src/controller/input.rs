//! Key and paste event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{cards_per_row, ActiveSection, EpisodeLayoutMode, OverlayOutcome, PodcastLayoutMode};
use super::AppController;

/// How arrow keys move through a section for its current layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    /// Single row: left/right
    Row,
    /// Single column: up/down
    Column,
    /// Wrapped rows of `n` cards
    Grid(usize),
}

impl AppController {
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h' | 'H' | '?')) {
                self.model.toggle_help_popup().await;
            }
            return Ok(());
        }

        // An open menu sees the key first; anything else closes it like a
        // click outside would, and then still reaches the page
        if self.model.is_menu_open().await {
            match key.code {
                KeyCode::Up => {
                    self.model.menu_select_prev().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    self.model.menu_select_next().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    let outcome = self.model.menu_activate().await;
                    self.apply_overlay_outcome(outcome).await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    self.model.menu_dismiss().await;
                    return Ok(());
                }
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    // Same trigger closes its own menu
                    self.toggle_layout_menu().await;
                    return Ok(());
                }
                _ => {
                    if self.model.menu_dismiss().await == OverlayOutcome::Dismissed {
                        tracing::trace!("Menu dismissed by outside key");
                    }
                }
            }
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => {
                    self.model.set_should_quit(true).await;
                    return Ok(());
                }
                KeyCode::Char('u') if self.model.active_section().await == ActiveSection::Search => {
                    self.search_input.clear().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            match key.code {
                KeyCode::Left => {
                    self.navigate_history(false).await;
                    return Ok(());
                }
                KeyCode::Right => {
                    self.navigate_history(true).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.model.cycle_section_backward().await;
                } else {
                    self.model.cycle_section_forward().await;
                }
                return Ok(());
            }
            KeyCode::BackTab => {
                self.model.cycle_section_backward().await;
                return Ok(());
            }
            _ => {}
        }

        match self.model.active_section().await {
            ActiveSection::Search => self.handle_search_key(key).await,
            ActiveSection::Podcasts | ActiveSection::Episodes => self.handle_results_key(key).await,
        }
        Ok(())
    }

    /// Bracketed paste always goes to the search field
    pub async fn handle_paste(&mut self, text: &str) {
        self.model.set_active_section(ActiveSection::Search).await;
        self.search_input.handle_paste(text).await;
    }

    async fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.search_input.submit().await,
            KeyCode::Esc => self.search_input.clear().await,
            KeyCode::Backspace => self.search_input.backspace().await,
            KeyCode::Down => self.model.set_active_section(ActiveSection::Podcasts).await,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_input.insert_char(c).await;
            }
            _ => {}
        }
    }

    async fn handle_results_key(&mut self, key: KeyEvent) {
        let section = self.model.active_section().await;
        let axis = self.navigation_axis(section).await;

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.model.set_should_quit(true).await,
            KeyCode::Char('/' | 'g' | 'G') => {
                self.model.set_active_section(ActiveSection::Search).await;
            }
            KeyCode::Char('h' | 'H' | '?') => self.model.toggle_help_popup().await,
            KeyCode::Char('m') | KeyCode::Char('M') => self.toggle_layout_menu().await,
            KeyCode::Char('v') | KeyCode::Char('V') => self.cycle_layout().await,
            KeyCode::Esc => self.model.set_active_section(ActiveSection::Search).await,
            KeyCode::Enter => match section {
                ActiveSection::Podcasts => self.open_selected_podcast().await,
                ActiveSection::Episodes => self.toggle_episode_actions().await,
                ActiveSection::Search => {}
            },
            KeyCode::Left => {
                if axis != Axis::Column {
                    self.model.move_selection(-1).await;
                }
            }
            KeyCode::Right => {
                if axis != Axis::Column {
                    self.model.move_selection(1).await;
                }
            }
            KeyCode::Up => match axis {
                Axis::Column => self.model.move_selection(-1).await,
                Axis::Grid(columns) => self.model.move_selection(-(columns as isize)).await,
                Axis::Row => self.model.cycle_section_backward().await,
            },
            KeyCode::Down => match axis {
                Axis::Column => self.model.move_selection(1).await,
                Axis::Grid(columns) => self.model.move_selection(columns as isize).await,
                Axis::Row => self.model.cycle_section_forward().await,
            },
            // Carousel paging
            KeyCode::Char('[') | KeyCode::Char(']') if axis == Axis::Row => {
                let page = cards_per_row(self.model.get_ui_state().await.content_width) as isize;
                let delta = if key.code == KeyCode::Char('[') { -page } else { page };
                self.model.move_selection(delta).await;
            }
            _ => {}
        }
    }

    async fn navigation_axis(&self, section: ActiveSection) -> Axis {
        let state = self.model.get_search_state().await;
        let columns = cards_per_row(self.model.get_ui_state().await.content_width);
        match section {
            ActiveSection::Podcasts => match state.podcast_layout_mode {
                PodcastLayoutMode::Scroll => Axis::Row,
                PodcastLayoutMode::Grid => Axis::Grid(columns),
            },
            ActiveSection::Episodes => match state.episode_layout_mode {
                EpisodeLayoutMode::Compact | EpisodeLayoutMode::List => Axis::Column,
                EpisodeLayoutMode::Scroll => Axis::Row,
                EpisodeLayoutMode::Grid => Axis::Grid(columns),
            },
            ActiveSection::Search => Axis::Column,
        }
    }

    async fn navigate_history(&mut self, forward: bool) {
        let moved = if forward {
            self.model.go_forward().await
        } else {
            self.model.go_back().await
        };
        if moved {
            tracing::debug!(href = %self.model.location_href().await, forward, "History navigation");
            self.search_input.sync_from_location().await;
        }
    }
}

//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{watch, Mutex};

use super::content::{ContentState, SearchResults};
use super::location::Location;
use super::types::{
    ActiveSection, EpisodeLayoutMode, MenuEntry, MenuKind, OverlayOutcome, PodcastLayoutMode,
    SearchState, UiState,
};

/// Seconds a status message stays on screen
const STATUS_TTL_SECS: u64 = 4;

/// View-state store shared by the input, the results page and the view.
///
/// Cloning is cheap and every clone sees the same state. The committed query
/// is also published on a watch channel; it is the only trigger for fetches.
#[derive(Clone)]
pub struct AppModel {
    search_state: Arc<Mutex<SearchState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub ui_state: Arc<Mutex<UiState>>,
    location: Arc<Mutex<Location>>,
    committed_tx: Arc<watch::Sender<String>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(location: Location) -> Self {
        let (committed_tx, _) = watch::channel(String::new());
        Self {
            search_state: Arc::new(Mutex::new(SearchState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            location: Arc::new(Mutex::new(location)),
            committed_tx: Arc::new(committed_tx),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Search state
    // ========================================================================

    pub async fn get_search_state(&self) -> SearchState {
        self.search_state.lock().await.clone()
    }

    pub async fn input_value(&self) -> String {
        self.search_state.lock().await.input_value.clone()
    }

    pub async fn set_input_value(&self, value: String) {
        self.search_state.lock().await.input_value = value;
    }

    pub async fn set_is_searching(&self, is_searching: bool) {
        self.search_state.lock().await.is_searching = is_searching;
    }

    #[cfg(test)]
    pub async fn committed_query(&self) -> String {
        self.search_state.lock().await.committed_query.clone()
    }

    /// Store the committed query and notify watchers when it changed
    pub async fn set_committed_query(&self, query: String) -> bool {
        let mut state = self.search_state.lock().await;
        if state.committed_query == query {
            return false;
        }
        state.committed_query = query.clone();
        drop(state);

        tracing::debug!(query = %query, "Committed query changed");
        self.committed_tx.send_replace(query);
        true
    }

    /// Receiver that wakes on every committed query change
    pub fn subscribe_committed(&self) -> watch::Receiver<String> {
        self.committed_tx.subscribe()
    }

    pub async fn set_episode_layout_mode(&self, mode: EpisodeLayoutMode) {
        self.search_state.lock().await.episode_layout_mode = mode;
        self.ui_state.lock().await.episode_selected = 0;
    }

    pub async fn set_podcast_layout_mode(&self, mode: PodcastLayoutMode) {
        self.search_state.lock().await.podcast_layout_mode = mode;
        self.ui_state.lock().await.podcast_selected = 0;
    }

    pub async fn cycle_episode_layout(&self) -> EpisodeLayoutMode {
        let next = self.search_state.lock().await.episode_layout_mode.next();
        self.set_episode_layout_mode(next).await;
        next
    }

    pub async fn cycle_podcast_layout(&self) -> PodcastLayoutMode {
        let next = self.search_state.lock().await.podcast_layout_mode.next();
        self.set_podcast_layout_mode(next).await;
        next
    }

    // ========================================================================
    // Location
    // ========================================================================

    pub async fn location_query(&self) -> String {
        self.location.lock().await.query()
    }

    pub async fn location_href(&self) -> String {
        self.location.lock().await.href().to_string()
    }

    pub async fn push_location_query(&self, query: &str) {
        let mut location = self.location.lock().await;
        if location.push_query(query) {
            tracing::debug!(href = %location.href(), "Location updated");
        }
    }

    pub async fn go_back(&self) -> bool {
        self.location.lock().await.go_back()
    }

    pub async fn go_forward(&self) -> bool {
        self.location.lock().await.go_forward()
    }

    pub async fn history_flags(&self) -> (bool, bool) {
        let location = self.location.lock().await;
        (location.can_go_back(), location.can_go_forward())
    }

    // ========================================================================
    // Content state
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn begin_loading(&self) {
        let mut content = self.content_state.lock().await;
        content.is_loading = true;
        content.error = None;
    }

    pub async fn set_search_results(&self, results: SearchResults) {
        self.content_state.lock().await.results = results;
        let mut ui = self.ui_state.lock().await;
        ui.podcast_selected = 0;
        ui.episode_selected = 0;
    }

    /// Apply a finished fetch if `query` is still the committed one.
    ///
    /// The committed query stays locked until the outcome is written, so a
    /// commit can't land between the check and the write. Returns false when
    /// the outcome was discarded.
    pub async fn apply_fetch_outcome(
        &self,
        query: &str,
        outcome: Result<SearchResults, String>,
    ) -> bool {
        let search = self.search_state.lock().await;
        let mut content = self.content_state.lock().await;
        if search.committed_query != query {
            // An empty query never fetches, so nobody else clears the flag
            if search.committed_query.is_empty() {
                content.is_loading = false;
            }
            return false;
        }

        match outcome {
            Ok(results) => {
                content.results = results;
                let mut ui = self.ui_state.lock().await;
                ui.podcast_selected = 0;
                ui.episode_selected = 0;
            }
            Err(message) => content.error = Some(message),
        }
        content.is_loading = false;
        true
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn active_section(&self) -> ActiveSection {
        self.ui_state.lock().await.active_section
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.overlay.dismiss();
        state.active_section = section;
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.overlay.dismiss();
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.overlay.dismiss();
        state.active_section = state.active_section.prev();
    }

    pub async fn set_content_width(&self, width: u16) {
        self.ui_state.lock().await.content_width = width;
    }

    /// Move the selection of the focused section by `delta` cards, clamped
    pub async fn move_selection(&self, delta: isize) {
        let content = self.content_state.lock().await;
        let podcast_count = content.results.podcasts.len();
        let episode_count = content.results.episodes.len();
        drop(content);

        let mut state = self.ui_state.lock().await;
        // Scrolling the page closes any open menu
        state.overlay.dismiss();
        match state.active_section {
            ActiveSection::Podcasts => {
                state.podcast_selected = step(state.podcast_selected, delta, podcast_count);
            }
            ActiveSection::Episodes => {
                state.episode_selected = step(state.episode_selected, delta, episode_count);
            }
            ActiveSection::Search => {}
        }
    }

    pub async fn open_menu(&self, kind: MenuKind, entries: Vec<MenuEntry>) {
        self.ui_state.lock().await.overlay.toggle(kind, entries);
    }

    pub async fn is_menu_open(&self) -> bool {
        self.ui_state.lock().await.overlay.is_open()
    }

    pub async fn menu_select_next(&self) -> OverlayOutcome {
        self.ui_state.lock().await.overlay.select_next()
    }

    pub async fn menu_select_prev(&self) -> OverlayOutcome {
        self.ui_state.lock().await.overlay.select_prev()
    }

    pub async fn menu_activate(&self) -> OverlayOutcome {
        self.ui_state.lock().await.overlay.activate()
    }

    pub async fn menu_dismiss(&self) -> OverlayOutcome {
        self.ui_state.lock().await.overlay.dismiss_outside()
    }

    pub async fn set_status(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.status_message = Some(message);
        state.status_timestamp = Some(Instant::now());
    }

    pub async fn auto_clear_old_status(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.status_timestamp {
            if timestamp.elapsed().as_secs() > STATUS_TTL_SECS {
                state.status_message = None;
                state.status_timestamp = None;
            }
        }
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    pub async fn toggle_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.overlay.dismiss();
        state.show_help_popup = !state.show_help_popup;
    }
}

fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::content::Episode;

    fn model() -> AppModel {
        AppModel::new(Location::parse("http://localhost:3000/").unwrap())
    }

    fn episode(id: &str) -> Episode {
        Episode {
            id: id.into(),
            title: format!("Episode {id}"),
            podcast_name: "Show".into(),
            image_url: String::new(),
            duration: "--:--".into(),
            description: String::new(),
            track_time_millis: None,
            release_date: None,
        }
    }

    #[tokio::test]
    async fn committed_query_notifies_only_on_change() {
        let model = model();
        let mut rx = model.subscribe_committed();

        assert!(model.set_committed_query("jazz".into()).await);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "jazz");

        assert!(!model.set_committed_query("jazz".into()).await);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn layout_switch_keeps_episode_data() {
        let model = model();
        model
            .set_search_results(SearchResults {
                podcasts: vec![],
                episodes: vec![episode("1"), episode("2")],
            })
            .await;
        let before = model.get_content_state().await.results;

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(model.cycle_episode_layout().await);
        }
        assert_eq!(
            seen,
            vec![
                EpisodeLayoutMode::Scroll,
                EpisodeLayoutMode::Grid,
                EpisodeLayoutMode::List,
                EpisodeLayoutMode::Compact,
            ]
        );
        assert_eq!(model.get_content_state().await.results, before);
    }

    #[tokio::test]
    async fn selection_is_clamped_to_results() {
        let model = model();
        model
            .set_search_results(SearchResults {
                podcasts: vec![],
                episodes: vec![episode("1"), episode("2"), episode("3")],
            })
            .await;
        model.set_active_section(ActiveSection::Episodes).await;

        model.move_selection(10).await;
        assert_eq!(model.get_ui_state().await.episode_selected, 2);
        model.move_selection(-1).await;
        assert_eq!(model.get_ui_state().await.episode_selected, 1);
        model.move_selection(-5).await;
        assert_eq!(model.get_ui_state().await.episode_selected, 0);

        model.set_active_section(ActiveSection::Podcasts).await;
        model.move_selection(1).await;
        assert_eq!(model.get_ui_state().await.podcast_selected, 0);
    }

    #[tokio::test]
    async fn loading_flags_and_errors() {
        let model = model();
        model.set_committed_query("jazz".into()).await;
        model.begin_loading().await;
        assert!(model.apply_fetch_outcome("jazz", Err("old".into())).await);
        model.begin_loading().await;

        let content = model.get_content_state().await;
        assert!(content.is_loading);
        assert!(content.error.is_none());

        assert!(model.apply_fetch_outcome("jazz", Ok(SearchResults::default())).await);
        assert!(!model.get_content_state().await.is_loading);
    }

    #[tokio::test]
    async fn superseded_outcome_keeps_newer_fetch_loading() {
        let model = model();
        model.set_committed_query("old".into()).await;
        model.begin_loading().await;
        model.set_committed_query("new".into()).await;
        model.begin_loading().await;

        let stale = SearchResults {
            podcasts: vec![],
            episodes: vec![episode("1")],
        };
        assert!(!model.apply_fetch_outcome("old", Ok(stale)).await);
        assert!(!model.apply_fetch_outcome("old", Err("Failed to fetch".into())).await);
        let content = model.get_content_state().await;
        assert!(content.is_loading);
        assert!(content.results.episodes.is_empty());
        assert!(content.error.is_none());

        assert!(model.apply_fetch_outcome("new", Err("Failed to fetch".into())).await);
        let content = model.get_content_state().await;
        assert!(!content.is_loading);
        assert_eq!(content.error.as_deref(), Some("Failed to fetch"));
    }

    #[tokio::test]
    async fn superseded_by_empty_query_clears_loading() {
        let model = model();
        model.set_committed_query("old".into()).await;
        model.begin_loading().await;
        model.set_committed_query(String::new()).await;

        assert!(!model.apply_fetch_outcome("old", Ok(SearchResults::default())).await);
        assert!(!model.get_content_state().await.is_loading);
    }

    #[tokio::test]
    async fn focus_change_dismisses_menu() {
        let model = model();
        model
            .open_menu(
                MenuKind::PodcastLayout,
                vec![MenuEntry::SwitchPodcastLayout(PodcastLayoutMode::Grid)],
            )
            .await;
        assert!(model.is_menu_open().await);

        model.cycle_section_forward().await;
        assert!(!model.is_menu_open().await);
    }
}

//! Section layout menus and placeholder card actions

use crate::model::{
    ActiveSection, EpisodeAction, EpisodeLayoutMode, MenuEntry, MenuKind, OverlayOutcome,
    PodcastLayoutMode,
};
use super::AppController;

impl AppController {
    /// Toggle the "Switch to ..." menu of the focused results section
    pub async fn toggle_layout_menu(&self) {
        let state = self.model.get_search_state().await;
        match self.model.active_section().await {
            ActiveSection::Podcasts => {
                let entries = PodcastLayoutMode::ALL
                    .into_iter()
                    .filter(|mode| *mode != state.podcast_layout_mode)
                    .map(MenuEntry::SwitchPodcastLayout)
                    .collect();
                self.model.open_menu(MenuKind::PodcastLayout, entries).await;
            }
            ActiveSection::Episodes => {
                let entries = EpisodeLayoutMode::ALL
                    .into_iter()
                    .filter(|mode| *mode != state.episode_layout_mode)
                    .map(MenuEntry::SwitchEpisodeLayout)
                    .collect();
                self.model.open_menu(MenuKind::EpisodeLayout, entries).await;
            }
            ActiveSection::Search => {}
        }
    }

    /// Toggle the action menu of the selected episode card
    pub async fn toggle_episode_actions(&self) {
        let selected = self.model.get_ui_state().await.episode_selected;
        let content = self.model.get_content_state().await;
        let Some(episode) = content.results.episodes.get(selected) else {
            return;
        };

        let kind = MenuKind::EpisodeActions {
            episode_id: episode.id.clone(),
            title: episode.title.clone(),
        };
        let entries = EpisodeAction::ALL.into_iter().map(MenuEntry::Episode).collect();
        self.model.open_menu(kind, entries).await;
    }

    pub async fn open_selected_podcast(&self) {
        let selected = self.model.get_ui_state().await.podcast_selected;
        let content = self.model.get_content_state().await;
        if let Some(podcast) = content.results.podcasts.get(selected) {
            tracing::info!(podcast_id = %podcast.id, href = %format!("/podcast/{}", podcast.id), "Open podcast");
            self.model
                .set_status(format!("Open podcast: {}", podcast.title))
                .await;
        }
    }

    pub async fn cycle_layout(&self) {
        match self.model.active_section().await {
            ActiveSection::Podcasts => {
                let mode = self.model.cycle_podcast_layout().await;
                tracing::debug!(mode = mode.label(), "Podcast layout switched");
            }
            ActiveSection::Episodes => {
                let mode = self.model.cycle_episode_layout().await;
                tracing::debug!(mode = mode.label(), "Episode layout switched");
            }
            ActiveSection::Search => {}
        }
    }

    pub(crate) async fn apply_overlay_outcome(&self, outcome: OverlayOutcome) {
        let OverlayOutcome::Activated(kind, entry) = outcome else {
            return;
        };

        match entry {
            MenuEntry::SwitchPodcastLayout(mode) => {
                tracing::debug!(mode = mode.label(), "Podcast layout switched");
                self.model.set_podcast_layout_mode(mode).await;
            }
            MenuEntry::SwitchEpisodeLayout(mode) => {
                tracing::debug!(mode = mode.label(), "Episode layout switched");
                self.model.set_episode_layout_mode(mode).await;
            }
            MenuEntry::Episode(action) => {
                let (episode_id, title) = match kind {
                    MenuKind::EpisodeActions { episode_id, title } => (episode_id, title),
                    _ => return,
                };
                // Actions are not wired to anything yet
                tracing::info!(action = action.label(), episode_id = %episode_id, "Episode menu action");
                self.model
                    .set_status(format!("{}: {}", action.label(), title))
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::controller::AppController;
    use crate::model::{
        ActiveSection, AppModel, Episode, EpisodeLayoutMode, Location, MenuEntry, MenuKind,
        PodcastLayoutMode, SearchResults,
    };

    async fn controller() -> AppController {
        let model = AppModel::new(Location::parse("http://localhost:3000/").unwrap());
        model
            .set_search_results(SearchResults {
                podcasts: vec![],
                episodes: vec![Episode {
                    id: "ep-1".into(),
                    title: "Pilot".into(),
                    podcast_name: "Show".into(),
                    image_url: "/placeholder.svg".into(),
                    duration: "--:--".into(),
                    description: String::new(),
                    track_time_millis: None,
                    release_date: None,
                }],
            })
            .await;
        AppController::new(model, Duration::from_millis(250)).await
    }

    #[tokio::test(start_paused = true)]
    async fn layout_menu_lists_other_modes() {
        let controller = controller().await;
        controller.model.set_active_section(ActiveSection::Episodes).await;
        controller.toggle_layout_menu().await;

        let ui = controller.model.get_ui_state().await;
        let menu = ui.overlay.menu().unwrap();
        assert_eq!(menu.kind, MenuKind::EpisodeLayout);
        assert_eq!(
            menu.entries,
            vec![
                MenuEntry::SwitchEpisodeLayout(EpisodeLayoutMode::Scroll),
                MenuEntry::SwitchEpisodeLayout(EpisodeLayoutMode::Grid),
                MenuEntry::SwitchEpisodeLayout(EpisodeLayoutMode::List),
            ]
        );

        controller.model.set_active_section(ActiveSection::Podcasts).await;
        controller.toggle_layout_menu().await;
        let ui = controller.model.get_ui_state().await;
        assert_eq!(
            ui.overlay.menu().unwrap().entries,
            vec![MenuEntry::SwitchPodcastLayout(PodcastLayoutMode::Grid)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn activating_layout_entry_switches_mode() {
        let controller = controller().await;
        controller.model.set_active_section(ActiveSection::Episodes).await;
        controller.toggle_layout_menu().await;
        controller.model.menu_select_next().await;

        let outcome = controller.model.menu_activate().await;
        controller.apply_overlay_outcome(outcome).await;

        let state = controller.model.get_search_state().await;
        assert_eq!(state.episode_layout_mode, EpisodeLayoutMode::Grid);
        assert!(!controller.model.is_menu_open().await);
    }

    #[tokio::test(start_paused = true)]
    async fn episode_action_is_a_placeholder() {
        let controller = controller().await;
        controller.model.set_active_section(ActiveSection::Episodes).await;
        controller.toggle_episode_actions().await;

        let outcome = controller.model.menu_activate().await;
        controller.apply_overlay_outcome(outcome).await;

        let ui = controller.model.get_ui_state().await;
        assert_eq!(ui.status_message.as_deref(), Some("Add to My Queue: Pilot"));
        assert_eq!(controller.model.get_content_state().await.results.episodes.len(), 1);
    }
}

//! Core type definitions for the application

use std::time::Instant;

/// Width in cells of one card in carousel and grid layouts
pub const CARD_WIDTH: u16 = 28;

/// How many cards fit side by side in `width` cells (at least one)
pub fn cards_per_row(width: u16) -> usize {
    (width / CARD_WIDTH).max(1) as usize
}

/// Which part of the screen currently has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Search,
    Podcasts,
    Episodes,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Podcasts,
            ActiveSection::Podcasts => ActiveSection::Episodes,
            ActiveSection::Episodes => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Episodes,
            ActiveSection::Podcasts => ActiveSection::Search,
            ActiveSection::Episodes => ActiveSection::Podcasts,
        }
    }
}

/// How the episodes section arranges its cards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EpisodeLayoutMode {
    #[default]
    Compact,
    Scroll,
    Grid,
    List,
}

impl EpisodeLayoutMode {
    pub const ALL: [EpisodeLayoutMode; 4] = [
        EpisodeLayoutMode::Compact,
        EpisodeLayoutMode::Scroll,
        EpisodeLayoutMode::Grid,
        EpisodeLayoutMode::List,
    ];

    pub fn next(self) -> Self {
        match self {
            Self::Compact => Self::Scroll,
            Self::Scroll => Self::Grid,
            Self::Grid => Self::List,
            Self::List => Self::Compact,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Scroll => "Scroll",
            Self::Grid => "Grid",
            Self::List => "List",
        }
    }
}

/// How the podcasts section arranges its cards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PodcastLayoutMode {
    #[default]
    Scroll,
    Grid,
}

impl PodcastLayoutMode {
    pub const ALL: [PodcastLayoutMode; 2] = [PodcastLayoutMode::Scroll, PodcastLayoutMode::Grid];

    pub fn next(self) -> Self {
        match self {
            Self::Scroll => Self::Grid,
            Self::Grid => Self::Scroll,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Scroll => "Scroll",
            Self::Grid => "Grid",
        }
    }
}

/// State owned by the search input and read by the results page
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub input_value: String,
    pub committed_query: String,
    pub is_searching: bool,
    pub episode_layout_mode: EpisodeLayoutMode,
    pub podcast_layout_mode: PodcastLayoutMode,
}

/// Placeholder actions offered by every episode card menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeAction {
    AddToQueue,
    GoToEpisode,
    GoToPodcast,
    DownloadFile,
}

impl EpisodeAction {
    pub const ALL: [EpisodeAction; 4] = [
        EpisodeAction::AddToQueue,
        EpisodeAction::GoToEpisode,
        EpisodeAction::GoToPodcast,
        EpisodeAction::DownloadFile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::AddToQueue => "Add to My Queue",
            Self::GoToEpisode => "Go to Episode",
            Self::GoToPodcast => "Go to Podcast",
            Self::DownloadFile => "Download File",
        }
    }

    /// Menus draw a separator after these entries
    pub fn ends_group(self) -> bool {
        matches!(self, Self::AddToQueue | Self::GoToPodcast)
    }
}

/// What an open menu is attached to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuKind {
    PodcastLayout,
    EpisodeLayout,
    EpisodeActions { episode_id: String, title: String },
}

/// A single entry of an open menu
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    SwitchPodcastLayout(PodcastLayoutMode),
    SwitchEpisodeLayout(EpisodeLayoutMode),
    Episode(EpisodeAction),
}

impl MenuEntry {
    pub fn label(&self) -> String {
        match self {
            MenuEntry::SwitchPodcastLayout(mode) => format!("Switch to {}", mode.label()),
            MenuEntry::SwitchEpisodeLayout(mode) => format!("Switch to {}", mode.label()),
            MenuEntry::Episode(action) => action.label().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenMenu {
    pub kind: MenuKind,
    pub entries: Vec<MenuEntry>,
    pub selected: usize,
}

/// How a key was treated by the overlay
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// No menu open; the key belongs to the page
    Passthrough,
    /// The menu consumed the key (selection moved)
    Consumed,
    /// The menu closed without an action
    Dismissed,
    /// The menu closed by activating an entry
    Activated(MenuKind, MenuEntry),
}

/// One dismissible overlay shared by every menu on the page.
///
/// At most one menu is open at a time; opening another replaces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DismissibleOverlay {
    open: Option<OpenMenu>,
}

impl DismissibleOverlay {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn menu(&self) -> Option<&OpenMenu> {
        self.open.as_ref()
    }

    pub fn open(&mut self, kind: MenuKind, entries: Vec<MenuEntry>) {
        if entries.is_empty() {
            self.open = None;
            return;
        }
        self.open = Some(OpenMenu {
            kind,
            entries,
            selected: 0,
        });
    }

    /// Opens the menu, or closes it when the same menu is already open
    pub fn toggle(&mut self, kind: MenuKind, entries: Vec<MenuEntry>) {
        if self.open.as_ref().is_some_and(|menu| menu.kind == kind) {
            self.open = None;
        } else {
            self.open(kind, entries);
        }
    }

    pub fn dismiss(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn select_next(&mut self) -> OverlayOutcome {
        match self.open.as_mut() {
            Some(menu) => {
                if menu.selected + 1 < menu.entries.len() {
                    menu.selected += 1;
                }
                OverlayOutcome::Consumed
            }
            None => OverlayOutcome::Passthrough,
        }
    }

    pub fn select_prev(&mut self) -> OverlayOutcome {
        match self.open.as_mut() {
            Some(menu) => {
                menu.selected = menu.selected.saturating_sub(1);
                OverlayOutcome::Consumed
            }
            None => OverlayOutcome::Passthrough,
        }
    }

    pub fn activate(&mut self) -> OverlayOutcome {
        match self.open.take() {
            Some(menu) => match menu.entries.get(menu.selected).cloned() {
                Some(entry) => OverlayOutcome::Activated(menu.kind, entry),
                None => OverlayOutcome::Dismissed,
            },
            None => OverlayOutcome::Passthrough,
        }
    }

    /// Anything outside the menu closes it, like a click elsewhere on the page
    pub fn dismiss_outside(&mut self) -> OverlayOutcome {
        if self.dismiss() {
            OverlayOutcome::Dismissed
        } else {
            OverlayOutcome::Passthrough
        }
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub podcast_selected: usize,
    pub episode_selected: usize,
    pub overlay: DismissibleOverlay,
    pub status_message: Option<String>,
    pub status_timestamp: Option<Instant>,
    pub show_help_popup: bool,
    /// Width of the results area at the last draw, used for grid navigation
    pub content_width: u16,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Search,
            podcast_selected: 0,
            episode_selected: 0,
            overlay: DismissibleOverlay::default(),
            status_message: None,
            status_timestamp: None,
            show_help_popup: false,
            content_width: 80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_layout_cycles_through_four_modes() {
        let mut mode = EpisodeLayoutMode::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, EpisodeLayoutMode::ALL.to_vec());
        assert_eq!(mode, EpisodeLayoutMode::Compact);
    }

    #[test]
    fn cards_per_row_never_zero() {
        assert_eq!(cards_per_row(0), 1);
        assert_eq!(cards_per_row(CARD_WIDTH - 1), 1);
        assert_eq!(cards_per_row(CARD_WIDTH * 3 + 5), 3);
    }

    #[test]
    fn podcast_layout_toggles() {
        assert_eq!(PodcastLayoutMode::default(), PodcastLayoutMode::Scroll);
        assert_eq!(PodcastLayoutMode::Scroll.next(), PodcastLayoutMode::Grid);
        assert_eq!(PodcastLayoutMode::Grid.next(), PodcastLayoutMode::Scroll);
    }

    #[test]
    fn overlay_toggle_and_replace() {
        let mut overlay = DismissibleOverlay::default();
        let entries = vec![MenuEntry::SwitchPodcastLayout(PodcastLayoutMode::Grid)];

        overlay.toggle(MenuKind::PodcastLayout, entries.clone());
        assert!(overlay.is_open());
        overlay.toggle(MenuKind::PodcastLayout, entries.clone());
        assert!(!overlay.is_open());

        overlay.open(MenuKind::PodcastLayout, entries);
        overlay.open(
            MenuKind::EpisodeLayout,
            vec![MenuEntry::SwitchEpisodeLayout(EpisodeLayoutMode::List)],
        );
        assert_eq!(overlay.menu().unwrap().kind, MenuKind::EpisodeLayout);
    }

    #[test]
    fn overlay_activation_closes_menu() {
        let mut overlay = DismissibleOverlay::default();
        overlay.open(
            MenuKind::EpisodeActions {
                episode_id: "7".into(),
                title: "Ep".into(),
            },
            EpisodeAction::ALL.iter().copied().map(MenuEntry::Episode).collect(),
        );

        assert_eq!(overlay.select_next(), OverlayOutcome::Consumed);
        assert_eq!(overlay.select_next(), OverlayOutcome::Consumed);
        match overlay.activate() {
            OverlayOutcome::Activated(_, entry) => {
                assert_eq!(entry, MenuEntry::Episode(EpisodeAction::GoToPodcast))
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert!(!overlay.is_open());
        assert_eq!(overlay.activate(), OverlayOutcome::Passthrough);
    }

    #[test]
    fn overlay_selection_is_clamped() {
        let mut overlay = DismissibleOverlay::default();
        overlay.open(
            MenuKind::PodcastLayout,
            vec![MenuEntry::SwitchPodcastLayout(PodcastLayoutMode::Grid)],
        );
        overlay.select_prev();
        overlay.select_next();
        assert_eq!(overlay.menu().unwrap().selected, 0);
        assert_eq!(overlay.dismiss_outside(), OverlayOutcome::Dismissed);
        assert_eq!(overlay.dismiss_outside(), OverlayOutcome::Passthrough);
    }
}

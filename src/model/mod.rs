//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (layout modes, menus, UI state)
//! - `format`: Duration and date display helpers
//! - `content`: Podcast/episode projections and response normalization
//! - `location`: The navigable address and its `q` parameter
//! - `search_client`: Search API client
//! - `app_model`: The shared view-state store

mod types;
pub mod format;
mod content;
pub mod location;
mod search_client;
mod app_model;

pub use types::{
    cards_per_row, ActiveSection, EpisodeAction, EpisodeLayoutMode, MenuEntry, MenuKind, OpenMenu,
    OverlayOutcome, PodcastLayoutMode, SearchState, UiState, CARD_WIDTH,
};

pub use content::{ContentState, Episode, Podcast, SearchResults};

pub use location::Location;

pub use search_client::{HttpSearchClient, SearchBackend, SearchError, SharedBackend};

pub use app_model::AppModel;

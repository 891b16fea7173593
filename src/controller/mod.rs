//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model and the search backend.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and paste event handling
//! - `debounce`: Cancellable delayed commit timer
//! - `search_input`: The search field and its commit rules
//! - `results`: Fetching results on committed query changes
//! - `menus`: Layout menus and placeholder card actions

mod input;
mod debounce;
mod search_input;
mod results;
mod menus;

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::model::AppModel;

pub use results::ResultsFetcher;
use debounce::Debouncer;
use search_input::SearchInput;

/// Events posted back to the UI loop by scheduled work
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    DebounceElapsed(u64),
}

pub struct AppController {
    pub(crate) model: AppModel,
    pub(crate) search_input: SearchInput,
    events: UnboundedReceiver<AppEvent>,
}

impl AppController {
    /// Build the controller and mount the search input, which seeds the
    /// store from the current location
    pub async fn new(model: AppModel, debounce: Duration) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let debouncer = Debouncer::new(debounce, tx);
        tracing::debug!(debounce_ms = debouncer.delay().as_millis() as u64, "Mounting search input");
        let search_input = SearchInput::mount(model.clone(), debouncer).await;

        Self {
            model,
            search_input,
            events,
        }
    }

    /// Deliver timer events that fired since the last frame
    pub async fn process_pending_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                AppEvent::DebounceElapsed(token) => {
                    self.search_input.on_debounce_elapsed(token).await;
                }
            }
        }
    }
}

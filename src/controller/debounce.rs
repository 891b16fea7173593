//! Cancellable delayed commit for the search input

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::AppEvent;

/// Schedules a single pending timer that posts [`AppEvent::DebounceElapsed`]
/// back to the UI loop.
///
/// Each schedule supersedes the previous one. A token is only honoured if
/// it belongs to the most recent schedule that has not been cancelled, so an
/// event already queued by an aborted timer is ignored.
pub struct Debouncer {
    delay: Duration,
    events: UnboundedSender<AppEvent>,
    pending: Option<(u64, JoinHandle<()>)>,
    generation: u64,
}

impl Debouncer {
    pub fn new(delay: Duration, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            delay,
            events,
            pending: None,
            generation: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start or restart the timer
    pub fn schedule(&mut self) -> u64 {
        self.cancel();
        self.generation += 1;
        let token = self.generation;
        let delay = self.delay;
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The UI loop may already be gone during shutdown
            let _ = events.send(AppEvent::DebounceElapsed(token));
        });
        self.pending = Some((token, handle));
        token
    }

    /// Drop the pending timer, returning whether one was pending
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some((token, handle)) => {
                handle.abort();
                tracing::trace!(token, "Debounce cancelled");
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending timer if `token` is the live one
    pub fn take_if_current(&mut self, token: u64) -> bool {
        match &self.pending {
            Some((live, _)) if *live == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

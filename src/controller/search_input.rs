//! The search field: keystrokes, debounced commits, submit, paste

use crate::model::location::query_from_link;
use crate::model::AppModel;

use super::debounce::Debouncer;

/// Controlled text field bound to the store.
///
/// Owns the debounce timer; dropping the input cancels it.
pub struct SearchInput {
    model: AppModel,
    debouncer: Debouncer,
}

impl SearchInput {
    /// Seed the raw text and the committed query from the location's `q`
    pub async fn mount(model: AppModel, debouncer: Debouncer) -> Self {
        let input = Self { model, debouncer };
        input.seed_from_location().await;
        input
    }

    /// Re-seed after back/forward navigation
    pub async fn sync_from_location(&mut self) {
        self.debouncer.cancel();
        self.model.set_is_searching(false).await;
        self.seed_from_location().await;
    }

    async fn seed_from_location(&self) {
        let query = self.model.location_query().await;
        tracing::debug!(query = %query, "Search input seeded from location");
        self.model.set_input_value(query.clone()).await;
        self.model.set_committed_query(query).await;
    }

    pub async fn handle_change(&mut self, value: String) {
        let has_text = !value.trim().is_empty();
        self.model.set_input_value(value).await;

        if has_text {
            self.model.set_is_searching(true).await;
            self.debouncer.schedule();
        } else {
            self.debouncer.cancel();
            self.model.set_is_searching(false).await;
        }
    }

    pub async fn insert_char(&mut self, c: char) {
        let mut value = self.model.input_value().await;
        value.push(c);
        self.handle_change(value).await;
    }

    pub async fn backspace(&mut self) {
        let mut value = self.model.input_value().await;
        if value.pop().is_some() {
            self.handle_change(value).await;
        }
    }

    pub async fn clear(&mut self) {
        self.handle_change(String::new()).await;
    }

    /// Timer callback. Returns whether a query was committed.
    pub async fn on_debounce_elapsed(&mut self, token: u64) -> bool {
        if !self.debouncer.take_if_current(token) {
            tracing::trace!(token, "Ignoring stale debounce event");
            return false;
        }

        let value = self.model.input_value().await;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.commit(trimmed.to_string()).await;
        true
    }

    /// Enter: commit now, bypassing the timer
    pub async fn submit(&mut self) {
        self.debouncer.cancel();
        let value = self.model.input_value().await;
        self.commit(value.trim().to_string()).await;
    }

    /// Returns `true` when the paste was a search link and was committed.
    /// Other text is appended to the field as ordinary input.
    pub async fn handle_paste(&mut self, text: &str) -> bool {
        if let Some(query) = query_from_link(text) {
            tracing::debug!(query = %query, "Pasted search link");
            self.model.set_input_value(query.clone()).await;
            self.debouncer.cancel();
            self.commit(query).await;
            return true;
        }

        let mut value = self.model.input_value().await;
        value.extend(text.chars().map(|c| if c.is_control() { ' ' } else { c }));
        self.handle_change(value).await;
        false
    }

    #[cfg(test)]
    pub fn has_pending_commit(&self) -> bool {
        self.debouncer.is_pending()
    }

    async fn commit(&self, query: String) {
        self.model.push_location_query(&query).await;
        self.model.set_is_searching(false).await;
        self.model.set_committed_query(query).await;
    }
}

//! Fetches results whenever the committed query changes

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::model::{AppModel, SharedBackend};

/// Watches the committed query and issues one search per change.
///
/// Fetches run concurrently; a response is only applied while its query is
/// still the committed one, so a slow stale request can't overwrite newer
/// results.
pub struct ResultsFetcher {
    model: AppModel,
    backend: SharedBackend,
}

impl ResultsFetcher {
    pub fn new(model: AppModel, backend: SharedBackend) -> Self {
        Self { model, backend }
    }

    /// Start watching. The query committed at spawn time is fetched too.
    pub fn spawn(self) -> JoinHandle<()> {
        let committed = self.model.subscribe_committed();
        tokio::spawn(self.run(committed))
    }

    async fn run(self, mut committed: watch::Receiver<String>) {
        let initial = committed.borrow_and_update().clone();
        self.on_query_changed(initial);

        while committed.changed().await.is_ok() {
            let query = committed.borrow_and_update().clone();
            self.on_query_changed(query);
        }
        tracing::debug!("Committed query channel closed, results fetcher stopping");
    }

    fn on_query_changed(&self, query: String) {
        if query.is_empty() {
            tracing::debug!("Empty committed query, keeping current results");
            return;
        }
        let model = self.model.clone();
        let backend = self.backend.clone();
        tokio::spawn(async move {
            fetch_results(model, backend, query).await;
        });
    }
}

pub async fn fetch_results(model: AppModel, backend: SharedBackend, query: String) {
    tracing::debug!(query = %query, "Fetching search results");
    model.begin_loading().await;

    let outcome = match backend.search(&query).await {
        Ok(results) => {
            tracing::info!(
                query = %query,
                podcasts = results.podcasts.len(),
                episodes = results.episodes.len(),
                "Search completed successfully"
            );
            Ok(results)
        }
        Err(e) => {
            tracing::error!(query = %query, error = %e, "Search failed");
            Err(e.to_string())
        }
    };

    if !model.apply_fetch_outcome(&query, outcome).await {
        tracing::debug!(query = %query, "Discarding results for a superseded query");
    }
}

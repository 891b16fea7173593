//! HTTP client for the podcast search API

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use super::content::{RawSearchResponse, SearchResults};
use crate::log_search_result;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The API answered with a non-success status
    #[error("Failed to fetch")]
    Status(StatusCode),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid search URL: {0}")]
    InvalidUrl(String),
}

/// Anything that can answer a search query
pub trait SearchBackend: Send + Sync {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<SearchResults, SearchError>>;
}

pub type SharedBackend = Arc<dyn SearchBackend>;

/// `GET {base}/track/search/{query}` against the directory API
#[derive(Clone, Debug)]
pub struct HttpSearchClient {
    client: Client,
    base_url: Url,
}

impl HttpSearchClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SearchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| SearchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;

        tracing::info!(base_url = %base_url, "Search client created");
        Ok(Self { client, base_url })
    }

    /// Endpoint for `query`; the query is encoded as a single path segment
    pub fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SearchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["track", "search", query]);
        Ok(url)
    }

    async fn fetch(&self, query: &str) -> Result<SearchResults, SearchError> {
        let url = self.search_url(query)?;
        tracing::debug!(query, url = %url, "Search request sent");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.bytes().await?;
        let raw: RawSearchResponse = serde_json::from_slice(&body)?;
        Ok(SearchResults::from_raw(raw))
    }
}

impl SearchBackend for HttpSearchClient {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<SearchResults, SearchError>> {
        Box::pin(async move {
            let result = self.fetch(query).await;
            log_search_result!(query, result);
            result
        })
    }
}

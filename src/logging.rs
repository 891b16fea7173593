//! File logging for the TUI
//!
//! The terminal belongs to ratatui, so every tracing event goes to a daily
//! rolling file in the configured log directory.

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

const DEFAULT_FILTER: &str = "podsearch_rs=debug,reqwest=info,warn";

/// Filter directives in order of precedence: `RUST_LOG`, the config file,
/// then the built-in default
pub fn filter_directives(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|directives| !directives.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the file subscriber. Buffered lines are flushed when the returned
/// guard is dropped, so `main` holds it until shutdown.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.dir)
        .with_context(|| format!("failed to create log directory {}", config.dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("podsearch")
        .filename_suffix("log")
        .build(&config.dir)
        .context("failed to open log file")?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let directives = filter_directives(std::env::var("RUST_LOG").ok(), config.filter.as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Warning: ignoring log filter {:?}: {}", directives, e);
        EnvFilter::new(DEFAULT_FILTER)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("a tracing subscriber is already installed")?;

    tracing::info!(dir = %config.dir.display(), filter = %directives, "Logging initialized");
    Ok(guard)
}

/// Log the outcome of one search request with its query and result counts
#[macro_export]
macro_rules! log_search_result {
    ($query:expr, $result:expr) => {
        match &$result {
            Ok(results) => tracing::info!(
                query = %$query,
                podcasts = results.podcasts.len(),
                episodes = results.episodes.len(),
                "Search answered"
            ),
            Err($crate::model::SearchError::Status(status)) => tracing::warn!(
                query = %$query,
                status = status.as_u16(),
                "Search endpoint rejected the request"
            ),
            Err(e) => tracing::error!(query = %$query, error = %e, "Search request failed"),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_filter_wins_over_config() {
        assert_eq!(
            filter_directives(Some("warn".into()), Some("podsearch_rs=trace")),
            "warn"
        );
    }

    #[test]
    fn config_filter_used_without_env() {
        assert_eq!(filter_directives(None, Some("podsearch_rs=trace")), "podsearch_rs=trace");
        assert_eq!(filter_directives(Some("  ".into()), Some("info")), "info");
    }

    #[test]
    fn default_filter_when_nothing_set() {
        assert_eq!(filter_directives(None, None), DEFAULT_FILTER);
    }
}

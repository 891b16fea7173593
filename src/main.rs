mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::{AppConfig, Cli, ImageHosts};
use controller::{AppController, ResultsFetcher};
use model::{AppModel, HttpSearchClient, Location};
use view::{AppView, Snapshot};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;

    // Held until shutdown so buffered log lines reach the file
    let _log_guard = match logging::init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {:#}", e);
            None
        }
    };

    tracing::info!(
        api = %config.api.base_url,
        debounce_ms = config.search.debounce_ms,
        image_hosts = config.images.allowed_hosts.len(),
        "=== podsearch starting ==="
    );
    let location = initial_location(&cli, &config)?;
    tracing::info!(href = %location.href(), "Opening location");

    let client = HttpSearchClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )
    .with_context(|| format!("invalid search API url {}", config.api.base_url))?;

    let model = AppModel::new(location);
    let controller = AppController::new(model.clone(), config.search.debounce()).await;
    let fetcher = ResultsFetcher::new(model.clone(), Arc::new(client)).spawn();

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, &config.images).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    fetcher.abort();

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("podsearch shutting down");
    Ok(())
}

/// Deep link from the command line or the configured base, with `--query`
/// written into it
fn initial_location(cli: &Cli, config: &AppConfig) -> Result<Location> {
    let raw = cli.url.as_deref().unwrap_or(&config.app.base_url);
    let mut location = Location::parse(raw).with_context(|| format!("invalid location url {}", raw))?;
    if let Some(query) = &cli.query {
        location.replace_query(query.trim());
    }
    Ok(location)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: AppModel,
    mut controller: AppController,
    image_hosts: &ImageHosts,
) -> Result<()> {
    loop {
        // Auto-clear old status messages
        model.auto_clear_old_status().await;

        let snapshot = Snapshot::capture(&model).await;

        let mut content_width = snapshot.ui.content_width;
        terminal.draw(|f| {
            content_width = AppView::render(f, &snapshot, image_hosts);
        })?;
        model.set_content_width(content_width).await;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => controller.handle_key_event(key).await?,
                Event::Paste(text) => controller.handle_paste(&text).await,
                _ => {}
            }
        }

        controller.process_pending_events().await;

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}

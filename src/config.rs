//! Command line arguments and the optional TOML config file

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "podsearch.toml";

#[derive(Debug, Parser)]
#[command(name = "podsearch", version, about = "Search podcasts and episodes from the terminal")]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./podsearch.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Deep link to open, e.g. "http://localhost:3000/?q=jazz"
    #[arg(long)]
    pub url: Option<String>,

    /// Initial search query (takes precedence over the deep link's `q`)
    #[arg(long, short)]
    pub query: Option<String>,

    /// Base URL of the search API
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3333".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocationConfig {
    /// The navigable address the `q` parameter is written into
    pub base_url: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_string(),
        }
    }
}

/// Where the file log goes and how verbose it is. `RUST_LOG` wins over `filter`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".logs"),
            filter: None,
        }
    }
}

/// Remote artwork hosts permitted for display
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageHosts {
    pub allowed_hosts: Vec<String>,
}

impl Default for ImageHosts {
    fn default() -> Self {
        Self {
            allowed_hosts: vec!["is1-ssl.mzstatic.com".to_string()],
        }
    }
}

impl ImageHosts {
    /// Returns the host of `image_url` when it is on the allow-list.
    /// Relative paths (the bundled placeholder) and unknown hosts yield `None`.
    pub fn permitted_host(&self, image_url: &str) -> Option<String> {
        let parsed = url::Url::parse(image_url).ok()?;
        let host = parsed.host_str()?;
        self.allowed_hosts
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(host))
            .then(|| host.to_string())
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub app: LocationConfig,
    pub images: ImageHosts,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config file")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Resolve the config for this run: an explicit `--config` must exist,
    /// the default file is optional. CLI flags override file values.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(api_url) = &cli.api_url {
            config.api.base_url = api_url.clone();
        }

        Ok(config)
    }
}

//! Configuration for the aggregator.
//!
//! Read once at startup from an explicit `--config` path or from
//! `~/.config/confluence/config.toml`. If the default file doesn't exist, a
//! commented one is created. Configuration is static: sources, period,
//! policy, and bounds are fixed at construction time.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::domain::Source;
use crate::engine::{FallbackPolicy, DEFAULT_MAX_ITEMS};

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between refresh passes.
    pub refresh_interval_secs: u64,
    /// What to do when sources fail: merge survivors or take the first hit.
    pub policy: FallbackPolicy,
    /// Upper bound on items kept per refresh.
    pub max_items: usize,
    /// Per-source fetch timeout in seconds.
    pub fetch_timeout_secs: u64,
    /// Ordered list of feeds to aggregate. Order matters for the
    /// first-success policy and for tie-breaking in the merge.
    pub sources: Vec<Source>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            policy: FallbackPolicy::default(),
            max_items: DEFAULT_MAX_ITEMS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            sources: vec![Source::new("https://www.reddit.com/r/stocks.rss", "r/stocks")],
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None` (creating a commented default file on first run).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::default_config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::from_str(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: config_path,
                source,
            },
            other => other,
        })
    }

    /// Parse configuration from a TOML string. Missing fields take default
    /// values; the result is validated.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid("no sources configured".into()));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_secs must be positive".into(),
            ));
        }
        if self.max_items == 0 {
            return Err(ConfigError::Invalid("max_items must be positive".into()));
        }
        for source in &self.sources {
            Url::parse(&source.url).map_err(|e| {
                ConfigError::Invalid(format!("source URL '{}': {}", source.url, e))
            })?;
        }
        Ok(())
    }

    /// Default config file path: `~/.config/confluence/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("confluence").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Default config file content with comments.
    fn default_config_content() -> String {
        r##"# Confluence configuration
#
# policy selects how source failures are handled:
# - "collect-all": fetch every source, skip failures, merge the rest
# - "first-success": use the first source that yields any items

# Seconds between refresh passes
refresh_interval_secs = 60

policy = "collect-all"

# Upper bound on items kept per refresh
max_items = 30

# Per-source fetch timeout in seconds
fetch_timeout_secs = 10

# Sources are tried in the order listed.
[[sources]]
url = "https://www.reddit.com/r/stocks.rss"
label = "r/stocks"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

//! Configuration file parser.
//!
//! The file is optional: a missing file yields `Config::default()`, and every
//! key may be omitted. Command-line flags are applied on top by the binary.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::news_client::NewsClientConfig;
use crate::Category;

/// Cards rendered per fetch cycle.
pub const DEFAULT_MAX_CARDS: usize = 12;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid default category: {0}")]
    InvalidCategory(#[from] crate::UnknownCategory),

    #[error("Invalid sort order `{0}` (expected publishedAt, relevancy or popularity)")]
    InvalidSort(String),

    #[error("max_cards must be at least 1")]
    NoCards,
}

/// Ordering requested from the search endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    PublishedAt,
    Relevancy,
    Popularity,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::PublishedAt => "publishedAt",
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
        }
    }
}

impl FromStr for SortBy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publishedAt" => Ok(SortBy::PublishedAt),
            "relevancy" => Ok(SortBy::Relevancy),
            "popularity" => Ok(SortBy::Popularity),
            other => Err(ConfigError::InvalidSort(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ApiSection {
    fn default() -> Self {
        let client = NewsClientConfig::default();
        Self {
            base_url: client.api_url,
            timeout_secs: client.timeout,
            user_agent: client.user_agent,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawConfig {
    api: ApiSection,
    default_category: String,
    max_cards: usize,
    sort_by: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            api: ApiSection::default(),
            default_category: Category::Technology.as_str().to_string(),
            max_cards: DEFAULT_MAX_CARDS,
            sort_by: SortBy::default().as_str().to_string(),
        }
    }
}

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiSection,
    /// Category loaded once at startup
    pub default_category: Category,
    /// Upper bound on rendered cards
    pub max_cards: usize,
    /// Sort order for search requests
    pub sort_by: SortBy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiSection::default(),
            default_category: Category::Technology,
            max_cards: DEFAULT_MAX_CARDS,
            sort_by: SortBy::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = Self::parse(&contents)?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents)?;
        if raw.max_cards == 0 {
            return Err(ConfigError::NoCards);
        }
        Ok(Self {
            api: raw.api,
            default_category: raw.default_category.parse()?,
            max_cards: raw.max_cards,
            sort_by: raw.sort_by.parse()?,
        })
    }

    /// Client settings, normalized so relative joins land under the base path.
    pub fn client_config(&self) -> NewsClientConfig {
        let mut api_url = self.api.base_url.clone();
        if !api_url.ends_with('/') {
            api_url.push('/');
        }
        NewsClientConfig {
            api_url,
            timeout: self.api.timeout_secs,
            user_agent: self.api.user_agent.clone(),
        }
    }
}

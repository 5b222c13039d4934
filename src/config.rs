// Configuration loading for repo-cards.
// Layers defaults, an optional YAML file, and REPO_CARDS_* environment variables via figment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::cache::{CACHE_DURATION, DEFAULT_CACHE_KEY};
use crate::error::{CardsError, Result};
use crate::github::DEFAULT_PER_PAGE;
use crate::github::client::GITHUB_API_BASE;
use crate::state::{DEFAULT_CONTAINER_ID, DisplaySettings};
use crate::ui::{Locale, MAX_CARDS};

/// Project-local config file picked up when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "repo-cards.yaml";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "REPO_CARDS_";

/// Account whose projects are shown when nothing else is configured.
pub const DEFAULT_USERNAME: &str = "SmallasWater";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub account whose public repositories are listed.
    pub username: String,

    /// GitHub REST API root.
    pub api_base: String,

    /// Repositories requested per listing (1-100).
    pub per_page: u32,

    /// Cards rendered at most.
    pub max_cards: usize,

    /// Snapshot freshness window in seconds.
    pub cache_ttl_secs: u64,

    /// Snapshot slot name.
    pub cache_key: String,

    /// Directory for the snapshot; the user cache directory when unset.
    pub cache_dir: Option<PathBuf>,

    /// Id of the mount point element.
    pub container_id: String,

    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            api_base: GITHUB_API_BASE.to_string(),
            per_page: DEFAULT_PER_PAGE,
            max_cards: MAX_CARDS,
            cache_ttl_secs: CACHE_DURATION.as_secs(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            cache_dir: None,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            locale: Locale::default(),
        }
    }
}

impl Config {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings {
            container_id: self.container_id.clone(),
            max_cards: self.max_cards,
            locale: self.locale,
        }
    }
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `path`, or `repo-cards.yaml` in the working directory if present
    /// 3. `REPO_CARDS_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CardsError::InvalidConfig(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
                Yaml::file(path)
            }
            None => Yaml::file(DEFAULT_CONFIG_FILE),
        };

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, ignoring the environment.
    #[cfg(test)]
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<()> {
        let invalid = |msg: &str| Err(CardsError::InvalidConfig(msg.to_string()));

        if config.username.trim().is_empty() {
            return invalid("username cannot be empty");
        }
        if config.container_id.trim().is_empty() {
            return invalid("container_id cannot be empty");
        }
        if config.cache_key.trim().is_empty() {
            return invalid("cache_key cannot be empty");
        }
        if !(1..=100).contains(&config.per_page) {
            return Err(CardsError::InvalidConfig(format!(
                "per_page must be between 1 and 100, got {}",
                config.per_page
            )));
        }
        if config.max_cards == 0 {
            return invalid("max_cards must be at least 1");
        }

        Ok(())
    }
}

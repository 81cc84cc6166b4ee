//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; only `[league] id` is
//! required.
//!
//! # Example
//!
//! ```no_run
//! use draftwise::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("draftwise.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::draft::settings::ApiConfig;
use crate::application::cache::CacheSettings;
use crate::application::fetcher::RetryPolicy;
use crate::application::optimizer::SwapRules;
use crate::domain::formation::Formation;
use crate::error::{ConfigError, Result};

/// The league to analyse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeagueConfig {
    #[serde(default)]
    pub id: u32,
    /// Event to load instead of the league's current one.
    #[serde(default)]
    pub event: Option<u32>,
    /// The user's own entry, used when a command is not given one.
    #[serde(default)]
    pub my_entry: Option<u32>,
}

/// Retry budget for upstream requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

/// Persistent response cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Cache file; defaults to the OS cache directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_capacity_bytes")]
    pub capacity_bytes: usize,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_preserved_key")]
    pub preserved_key: String,
}

const fn default_capacity_bytes() -> usize {
    5 * 1024 * 1024
}

const fn default_ttl_secs() -> u64 {
    3600
}

fn default_namespace() -> String {
    "fpl_".into()
}

fn default_preserved_key() -> String {
    "fpl_user".into()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            capacity_bytes: default_capacity_bytes(),
            ttl_secs: default_ttl_secs(),
            namespace: default_namespace(),
            preserved_key: default_preserved_key(),
        }
    }
}

impl CacheConfig {
    /// The configured path, or `<cache dir>/draftwise/cache.json`.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("draftwise")
                .join("cache.json")
        })
    }

    #[must_use]
    pub fn settings(&self) -> CacheSettings {
        CacheSettings {
            ttl: Duration::from_secs(self.ttl_secs),
            namespace: self.namespace.clone(),
            preserved_key: self.preserved_key.clone(),
        }
    }
}

/// The prediction pipeline's player export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayersConfig {
    #[serde(default = "default_players_path")]
    pub path: PathBuf,
}

fn default_players_path() -> PathBuf {
    PathBuf::from("players.json")
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            path: default_players_path(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub league: LeagueConfig,

    /// Upstream endpoints, relay and timeouts.
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Slot thresholds and lineup minimums.
    #[serde(default)]
    pub formation: Formation,

    /// Limits for swap suggestions.
    #[serde(default)]
    pub recommendations: SwapRules,

    #[serde(default)]
    pub players: PlayersConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.league.id == 0 {
            return Err(ConfigError::MissingField { field: "league.id" }.into());
        }
        if self.league.event == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "league.event",
                reason: "events are numbered from 1".to_string(),
            }
            .into());
        }
        if self.retry.max_retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_retries",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.cache.capacity_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.capacity_bytes",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cache.ttl_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.cache.namespace.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "cache.namespace",
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        self.api.validate()?;
        self.formation.validate()?;
        self.recommendations.validate()?;
        Ok(())
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry.max_retries,
            base_delay: Duration::from_millis(self.retry.base_delay_ms),
            flaky_hosts: self.api.flaky_hosts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse_toml("[league]\nid = 42\n").unwrap();

        assert_eq!(config.league.id, 42);
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.cache.capacity_bytes, 5 * 1024 * 1024);
        assert_eq!(config.formation, Formation::default());
        assert_eq!(config.recommendations, SwapRules::default());

        let policy = config.retry_policy();
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
        assert_eq!(policy.flaky_hosts, vec!["draft.premierleague.com".to_string()]);
    }

    #[test]
    fn missing_league_id_is_reported() {
        let result = Config::parse_toml("[retry]\nmax_retries = 2\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "league.id" }))
        ));
    }

    #[test]
    fn zero_retries_rejected() {
        let result = Config::parse_toml("[league]\nid = 1\n[retry]\nmax_retries = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "retry.max_retries",
                ..
            }))
        ));
    }

    #[test]
    fn cache_path_defaults_under_cache_dir() {
        let cache = CacheConfig::default();
        assert!(cache.resolved_path().ends_with("draftwise/cache.json"));

        let explicit = CacheConfig {
            path: Some(PathBuf::from("/tmp/x.json")),
            ..CacheConfig::default()
        };
        assert_eq!(explicit.resolved_path(), PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn formation_section_overrides_thresholds() {
        let toml = "[league]\nid = 1\n[formation]\nstarters = 7\nbench = 3\nmin_defenders = 2\n";
        let config = Config::parse_toml(toml).unwrap();
        assert_eq!(config.formation.starters, 7);
        assert_eq!(config.formation.min_forwards, 1);
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = Config::parse_toml("[league\nid = 1");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}

//! Draft and main-game API configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Upstream endpoints and HTTP behaviour (the `[api]` section).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_draft_base_url")]
    pub draft_base_url: String,
    #[serde(default = "default_fantasy_base_url")]
    pub fantasy_base_url: String,
    /// Relay prefix; the percent-encoded upstream URL is appended to it.
    /// Empty means requests go direct.
    #[serde(default)]
    pub cors_proxy: String,
    /// Hosts whose 404s are transient.
    #[serde(default = "default_flaky_hosts")]
    pub flaky_hosts: Vec<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_draft_base_url() -> String {
    "https://draft.premierleague.com/api".into()
}

fn default_fantasy_base_url() -> String {
    "https://fantasy.premierleague.com/api".into()
}

fn default_flaky_hosts() -> Vec<String> {
    vec!["draft.premierleague.com".into()]
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            draft_base_url: default_draft_base_url(),
            fantasy_base_url: default_fantasy_base_url(),
            cors_proxy: String::new(),
            flaky_hosts: default_flaky_hosts(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl ApiConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("api.draft_base_url", &self.draft_base_url),
            ("api.fantasy_base_url", &self.fantasy_base_url),
        ] {
            url::Url::parse(value).map_err(|err| ConfigError::InvalidValue {
                field,
                reason: err.to_string(),
            })?;
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_ms",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

//! Cache-backed HTTP fetching with retry and backoff.
//!
//! Status handling per attempt:
//!
//! | Outcome                          | Action                                        |
//! |----------------------------------|-----------------------------------------------|
//! | 2xx with valid JSON              | write-through to cache, return                |
//! | 429                              | wait `base_delay · 2^(attempt-1)`, retry      |
//! | 404 from a host not marked flaky | fail immediately                              |
//! | other non-2xx (incl. flaky 404)  | wait `base_delay`, retry; last attempt fails  |
//! | transport / JSON error           | wait `base_delay`, retry; last attempt fails  |
//!
//! A run of 429s that outlasts every attempt ends in
//! [`FetchError::RateLimited`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::cache::TtlCache;
use crate::error::FetchError;
use crate::port::clock::{Sleeper, TokioSleeper};
use crate::port::transport::HttpTransport;

/// Retry budget and host-specific policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_retries: u32,
    pub base_delay: Duration,
    /// Hosts whose 404s are transient and therefore retried.
    pub flaky_hosts: Vec<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            flaky_hosts: vec!["draft.premierleague.com".to_string()],
        }
    }
}

impl RetryPolicy {
    /// Backoff after a 429 on the given 1-based attempt.
    #[must_use]
    pub fn rate_limit_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Whether a 404 from this resource should be retried.
    #[must_use]
    pub fn retries_not_found(&self, resource: &Resource) -> bool {
        resource
            .host()
            .is_some_and(|host| self.flaky_hosts.iter().any(|h| h.eq_ignore_ascii_case(&host)))
    }

    const fn attempts(&self) -> u32 {
        if self.max_retries == 0 {
            1
        } else {
            self.max_retries
        }
    }
}

/// A remote JSON resource.
///
/// Keeps the upstream URL (used for host policy and messages) apart from the
/// URL actually requested, which may go through a relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    request_url: String,
    upstream: String,
}

impl Resource {
    /// A resource requested directly.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            request_url: url.clone(),
            upstream: url,
        }
    }

    /// A resource requested through a relay that takes the percent-encoded
    /// upstream URL appended to `prefix`. An empty prefix means no relay.
    pub fn proxied(prefix: &str, upstream: impl Into<String>) -> Self {
        let upstream = upstream.into();
        if prefix.is_empty() {
            return Self::new(upstream);
        }
        let encoded: String = url::form_urlencoded::byte_serialize(upstream.as_bytes()).collect();
        Self {
            request_url: format!("{prefix}{encoded}"),
            upstream,
        }
    }

    #[must_use]
    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    #[must_use]
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// Host of the upstream URL.
    #[must_use]
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.upstream)
            .ok()?
            .host_str()
            .map(str::to_ascii_lowercase)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.upstream)
    }
}

/// Fetches JSON resources through the cache with retries.
pub struct ResilientFetcher {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<TtlCache>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl ResilientFetcher {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, cache: Arc<TtlCache>, policy: RetryPolicy) -> Self {
        Self::with_sleeper(transport, cache, Arc::new(TokioSleeper), policy)
    }

    #[must_use]
    pub fn with_sleeper(
        transport: Arc<dyn HttpTransport>,
        cache: Arc<TtlCache>,
        sleeper: Arc<dyn Sleeper>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            cache,
            sleeper,
            policy,
        }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    #[must_use]
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Return the cached value for `cache_key`, or fetch and cache it.
    pub async fn fetch_with_cache<T>(&self, resource: &Resource, cache_key: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(cached) = self.cache.get::<T>(cache_key) {
            return Ok(cached);
        }

        info!(resource = %resource, key = cache_key, "Fetching fresh data");
        let value = self.fetch(resource).await?;
        self.cache.put(cache_key, &value);
        Ok(value)
    }

    /// Fetch without consulting the cache.
    pub async fn fetch<T: DeserializeOwned>(&self, resource: &Resource) -> Result<T, FetchError> {
        let max_attempts = self.policy.attempts();

        for attempt in 1..=max_attempts {
            let response = match self.transport.get(resource.request_url()).await {
                Ok(response) => response,
                Err(source) => {
                    if attempt >= max_attempts {
                        return Err(FetchError::Transport {
                            resource: resource.to_string(),
                            attempts: attempt,
                            source,
                        });
                    }
                    warn!(resource = %resource, attempt, max_attempts, error = %source, "Request failed, retrying");
                    self.sleeper.sleep(self.policy.base_delay).await;
                    continue;
                }
            };

            if response.status == 429 {
                let wait = self.policy.rate_limit_delay(attempt);
                warn!(
                    resource = %resource,
                    attempt,
                    max_attempts,
                    wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                    "Rate limited, backing off"
                );
                self.sleeper.sleep(wait).await;
                continue;
            }

            if !response.is_success() {
                if response.status == 404 && !self.policy.retries_not_found(resource) {
                    return Err(FetchError::NotFound {
                        resource: resource.to_string(),
                    });
                }
                if attempt >= max_attempts {
                    return Err(FetchError::Status {
                        resource: resource.to_string(),
                        status: response.status,
                        attempts: attempt,
                    });
                }
                warn!(resource = %resource, attempt, max_attempts, status = response.status, "HTTP error, retrying");
                self.sleeper.sleep(self.policy.base_delay).await;
                continue;
            }

            match serde_json::from_slice::<T>(&response.body) {
                Ok(value) => {
                    debug!(resource = %resource, attempt, "Fetched");
                    return Ok(value);
                }
                Err(source) => {
                    if attempt >= max_attempts {
                        return Err(FetchError::Decode {
                            resource: resource.to_string(),
                            attempts: attempt,
                            source,
                        });
                    }
                    warn!(resource = %resource, attempt, max_attempts, error = %source, "Invalid JSON, retrying");
                    self.sleeper.sleep(self.policy.base_delay).await;
                }
            }
        }

        Err(FetchError::RateLimited {
            resource: resource.to_string(),
            attempts: max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_delay_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.rate_limit_delay(1), Duration::from_millis(1000));
        assert_eq!(policy.rate_limit_delay(2), Duration::from_millis(2000));
        assert_eq!(policy.rate_limit_delay(3), Duration::from_millis(4000));
    }

    #[test]
    fn rate_limit_delay_saturates() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.rate_limit_delay(200), Duration::from_millis(1000).saturating_mul(u32::MAX));
    }

    #[test]
    fn flaky_host_detection_uses_upstream_url() {
        let policy = RetryPolicy::default();
        let draft = Resource::proxied(
            "https://corsproxy.io/?",
            "https://draft.premierleague.com/api/league/1/details",
        );
        let fantasy = Resource::proxied(
            "https://corsproxy.io/?",
            "https://fantasy.premierleague.com/api/bootstrap-static/",
        );
        assert!(policy.retries_not_found(&draft));
        assert!(!policy.retries_not_found(&fantasy));
    }

    #[test]
    fn proxied_resource_encodes_upstream() {
        let resource = Resource::proxied("https://relay/?", "https://a.example/x?y=1");
        assert_eq!(
            resource.request_url(),
            "https://relay/?https%3A%2F%2Fa.example%2Fx%3Fy%3D1"
        );
        assert_eq!(resource.upstream(), "https://a.example/x?y=1");
        assert_eq!(resource.to_string(), "https://a.example/x?y=1");
    }

    #[test]
    fn empty_proxy_prefix_requests_directly() {
        let resource = Resource::proxied("", "https://a.example/x");
        assert_eq!(resource.request_url(), "https://a.example/x");
    }

    #[test]
    fn zero_retries_still_attempts_once() {
        let policy = RetryPolicy {
            max_retries: 0,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts(), 1);
    }
}

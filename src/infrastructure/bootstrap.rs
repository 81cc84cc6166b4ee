//! Composition root: builds the cache, fetcher, client and league service
//! from a [`Config`].

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::dataset::load_players;
use crate::adapter::outbound::draft::client::DraftClient;
use crate::adapter::outbound::http::ReqwestTransport;
use crate::adapter::outbound::storage::file::FileStore;
use crate::application::cache::TtlCache;
use crate::application::fetcher::ResilientFetcher;
use crate::application::league::LeagueService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::transport::HttpTransport;

/// Open the file-backed cache.
pub fn build_cache(config: &Config) -> Result<Arc<TtlCache>> {
    let path = config.cache.resolved_path();
    let store = FileStore::open(&path, config.cache.capacity_bytes)?;
    info!(path = %path.display(), capacity = config.cache.capacity_bytes, "Cache opened");
    Ok(Arc::new(TtlCache::new(store, config.cache.settings())))
}

/// A draft client over `transport` and `cache`.
#[must_use]
pub fn build_client(config: &Config, transport: Arc<dyn HttpTransport>, cache: Arc<TtlCache>) -> DraftClient {
    let fetcher = ResilientFetcher::new(transport, cache, config.retry_policy());
    DraftClient::new(fetcher, config.api.clone())
}

/// Fully wired league service using the network and the on-disk cache.
pub fn build_league_service(config: &Config) -> Result<LeagueService> {
    let players = load_players(&config.players.path)?;
    let cache = build_cache(config)?;
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::from_config(&config.api));
    let client = build_client(config, transport, cache);
    Ok(LeagueService::new(Arc::new(client), players, config.formation.clone())
        .with_event(config.league.event))
}

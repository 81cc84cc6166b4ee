//! Draft league API client.
//!
//! Every request goes through the [`ResilientFetcher`] and is cached under a
//! stable key (see [`keys`]).

use async_trait::async_trait;
use tracing::debug;

use super::dto::{DraftBootstrap, EntryPicksResponse, FantasyBootstrap, LeagueDetailsResponse, StandingsResponse};
use super::settings::ApiConfig;
use crate::application::fetcher::{ResilientFetcher, Resource};
use crate::domain::id::EntryId;
use crate::domain::league::{ElementName, GameEvent, LeagueDetails, Standing};
use crate::error::Result;
use crate::port::league::{LeagueSource, Pick, PicksSource};

/// Cache keys, relative to the cache namespace.
pub mod keys {
    use crate::domain::id::EntryId;

    #[must_use]
    pub fn details(league: u32) -> String {
        format!("draft_details_{league}")
    }

    #[must_use]
    pub fn standings(league: u32) -> String {
        format!("draft_standings_{league}")
    }

    #[must_use]
    pub fn picks(entry: EntryId, event: u32) -> String {
        format!("draft_picks_{entry}_gw{event}")
    }

    pub const DRAFT_BOOTSTRAP: &str = "draft_bootstrap";
    pub const FANTASY_BOOTSTRAP: &str = "fantasy_bootstrap";
}

pub struct DraftClient {
    fetcher: ResilientFetcher,
    config: ApiConfig,
}

impl DraftClient {
    #[must_use]
    pub const fn new(fetcher: ResilientFetcher, config: ApiConfig) -> Self {
        Self { fetcher, config }
    }

    #[must_use]
    pub const fn fetcher(&self) -> &ResilientFetcher {
        &self.fetcher
    }

    fn draft(&self, path: &str) -> Resource {
        let base = self.config.draft_base_url.trim_end_matches('/');
        Resource::proxied(&self.config.cors_proxy, format!("{base}/{path}"))
    }

    fn fantasy(&self, path: &str) -> Resource {
        let base = self.config.fantasy_base_url.trim_end_matches('/');
        Resource::proxied(&self.config.cors_proxy, format!("{base}/{path}"))
    }
}

#[async_trait]
impl PicksSource for DraftClient {
    async fn entry_picks(&self, entry: EntryId, event: u32) -> Result<Vec<Pick>> {
        let resource = self.draft(&format!("entry/{entry}/event/{event}"));
        let response: EntryPicksResponse = self
            .fetcher
            .fetch_with_cache(&resource, &keys::picks(entry, event))
            .await?;
        Ok(response.picks)
    }
}

#[async_trait]
impl LeagueSource for DraftClient {
    async fn details(&self, league: u32) -> Result<LeagueDetails> {
        let resource = self.draft(&format!("league/{league}/details"));
        let response: LeagueDetailsResponse = self
            .fetcher
            .fetch_with_cache(&resource, &keys::details(league))
            .await?;
        Ok(response.into())
    }

    async fn standings(&self, league: u32) -> Result<Vec<Standing>> {
        let resource = self.draft(&format!("league/{league}/standings"));
        let response: StandingsResponse = self
            .fetcher
            .fetch_with_cache(&resource, &keys::standings(league))
            .await?;
        Ok(response.standings)
    }

    async fn events(&self) -> Result<Vec<GameEvent>> {
        let bootstrap: FantasyBootstrap = self
            .fetcher
            .fetch_with_cache(&self.fantasy("bootstrap-static/"), keys::FANTASY_BOOTSTRAP)
            .await?;
        Ok(bootstrap.events)
    }

    async fn draft_elements(&self) -> Result<Vec<ElementName>> {
        let bootstrap: DraftBootstrap = self
            .fetcher
            .fetch_with_cache(&self.draft("bootstrap-static"), keys::DRAFT_BOOTSTRAP)
            .await?;
        Ok(bootstrap.elements)
    }

    async fn fantasy_elements(&self) -> Result<Vec<ElementName>> {
        let bootstrap: FantasyBootstrap = self
            .fetcher
            .fetch_with_cache(&self.fantasy("bootstrap-static/"), keys::FANTASY_BOOTSTRAP)
            .await?;
        Ok(bootstrap.elements)
    }

    fn invalidate_league(&self, league: u32) {
        let cache = self.fetcher.cache();
        cache.invalidate(&keys::details(league));
        cache.invalidate(&keys::standings(league));
    }

    fn invalidate_picks(&self, event: u32) {
        let suffix = format!("_gw{event}");
        let removed = self
            .fetcher
            .cache()
            .invalidate_where(|key| key.starts_with("draft_picks_") && key.ends_with(&suffix));
        debug!(event, removed, "Cleared cached picks");
    }
}

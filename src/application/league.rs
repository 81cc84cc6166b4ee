//! League orchestration over an explicit context.
//!
//! [`LeagueService`] owns the player index and the roster repository and
//! reaches the network only through a [`LeagueSource`]. Each refresh rebuilds
//! rosters from scratch for the resolved event.

use std::sync::Arc;

use tracing::{info, warn};

use super::mapping::{IdMapping, MappingReport};
use super::optimizer::{best_lineup, best_replacements, recommend_swaps, LineupSelection, ScoredPlayer, SwapRules, SwapSuggestion};
use super::roster::{LoadSummary, RosterRepository};
use crate::domain::formation::Formation;
use crate::domain::id::{EntryId, PlayerId};
use crate::domain::league::{current_event, LeagueEntry, Standing};
use crate::domain::player::{Player, PlayerIndex};
use crate::error::{Error, Result};
use crate::port::league::{IdentifierMapper, IdentityMapper, LeagueSource};

/// What a refresh loaded.
#[derive(Debug, Clone)]
pub struct LeagueSnapshot {
    pub league: u32,
    pub name: String,
    pub event: u32,
    pub entries: Vec<LeagueEntry>,
    /// `None` when standings could not be fetched.
    pub standings: Option<Vec<Standing>>,
    /// `None` when the identity mapping was used.
    pub mapping: Option<MappingReport>,
    pub summary: LoadSummary,
}

pub struct LeagueService {
    source: Arc<dyn LeagueSource>,
    players: PlayerIndex,
    rosters: RosterRepository,
    formation: Formation,
    event_override: Option<u32>,
    entries: Vec<LeagueEntry>,
}

impl LeagueService {
    #[must_use]
    pub fn new(source: Arc<dyn LeagueSource>, players: PlayerIndex, formation: Formation) -> Self {
        Self {
            source,
            players,
            rosters: RosterRepository::new(),
            formation,
            event_override: None,
            entries: Vec::new(),
        }
    }

    /// Load this event instead of the one the league reports.
    #[must_use]
    pub const fn with_event(mut self, event: Option<u32>) -> Self {
        self.event_override = event;
        self
    }

    /// Reload the league, its standings and every roster.
    ///
    /// Only a failure to fetch the league details is an error.
    pub async fn refresh(&mut self, league: u32) -> Result<LeagueSnapshot> {
        self.source.invalidate_league(league);

        let (details, standings) =
            tokio::join!(self.source.details(league), self.source.standings(league));
        let details = details?;
        let standings = match standings {
            Ok(rows) => Some(rows),
            Err(err) => {
                warn!(league, error = %err, "Standings unavailable");
                None
            }
        };

        let event = self.resolve_event(details.current_event).await;
        self.source.invalidate_picks(event);

        let mapping = self.build_mapping().await;
        let mapper: &dyn IdentifierMapper = match &mapping {
            Some(mapping) => mapping,
            None => &IdentityMapper,
        };

        let summary = self
            .rosters
            .load(&details.entries, event, self.source.as_ref(), mapper, &self.formation)
            .await;

        info!(league, name = %details.name, event, entries = details.entries.len(), "League refreshed");

        self.entries.clone_from(&details.entries);
        Ok(LeagueSnapshot {
            league,
            name: details.name,
            event,
            entries: details.entries,
            standings,
            mapping: mapping.map(|m| m.report()),
            summary,
        })
    }

    async fn resolve_event(&self, reported: Option<u32>) -> u32 {
        if let Some(event) = self.event_override.or(reported) {
            return event;
        }
        match self.source.events().await {
            Ok(events) => current_event(&events),
            Err(err) => {
                warn!(error = %err, "Event list unavailable, defaulting to event 1");
                1
            }
        }
    }

    async fn build_mapping(&self) -> Option<IdMapping> {
        let (draft, fantasy) = tokio::join!(self.source.draft_elements(), self.source.fantasy_elements());
        match (draft, fantasy) {
            (Ok(draft), Ok(fantasy)) => Some(IdMapping::build(&draft, &fantasy)),
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "Player id mapping unavailable, using draft ids as-is");
                None
            }
        }
    }

    #[must_use]
    pub const fn players(&self) -> &PlayerIndex {
        &self.players
    }

    #[must_use]
    pub const fn rosters(&self) -> &RosterRepository {
        &self.rosters
    }

    /// Entries of the last refresh.
    #[must_use]
    pub fn entries(&self) -> &[LeagueEntry] {
        &self.entries
    }

    /// Find an entry by global or league-local id.
    #[must_use]
    pub fn find_entry(&self, id: u32) -> Option<&LeagueEntry> {
        self.entries
            .iter()
            .find(|e| e.entry_id.get() == id)
            .or_else(|| self.entries.iter().find(|e| e.id.get() == id))
    }

    /// Roster players with known data, in slot order.
    pub fn squad(&self, entry: EntryId) -> Result<Vec<&Player>> {
        let roster = self
            .rosters
            .roster(entry)
            .ok_or(Error::UnknownEntry(entry.get()))?;
        Ok(self.players.resolve(roster))
    }

    /// The lineup the entry actually picked.
    pub fn current_lineup(&self, entry: EntryId) -> Result<LineupSelection<'_>> {
        let lineup = self
            .rosters
            .lineup(entry)
            .ok_or(Error::UnknownEntry(entry.get()))?;
        Ok(LineupSelection {
            starting: self.players.resolve(&lineup.starting),
            bench: self.players.resolve(&lineup.bench),
        })
    }

    /// The greedy best lineup from the entry's roster.
    pub fn recommended_lineup(&self, entry: EntryId) -> Result<LineupSelection<'_>> {
        Ok(best_lineup(&self.squad(entry)?, &self.formation))
    }

    /// Top free agents who could replace `player`.
    pub fn replacements(&self, player: PlayerId, count: usize) -> Result<Vec<ScoredPlayer<'_>>> {
        let target = self
            .players
            .get(player)
            .ok_or(Error::UnknownPlayer(player.get()))?;
        Ok(best_replacements(target, self.players.iter(), self.rosters.ownership(), count))
    }

    /// Free-agent swaps for the entry's weakest players.
    pub fn recommend(&self, entry: EntryId, rules: &SwapRules) -> Result<Vec<SwapSuggestion<'_>>> {
        let squad = self.squad(entry)?;
        let pool: Vec<&Player> = self.players.iter().collect();
        Ok(recommend_swaps(&squad, &pool, self.rosters.ownership(), rules))
    }
}

//! Response shapes of the draft and main-game APIs.
//!
//! Only the fields the crate reads are modelled; the rest are dropped, which
//! also keeps cached copies small.

use serde::{Deserialize, Serialize};

use crate::domain::id::{EntryId, LeagueEntryId};
use crate::domain::league::{ElementName, GameEvent, LeagueDetails, LeagueEntry, Standing};
use crate::port::league::Pick;

/// `GET league/{id}/details`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueDetailsResponse {
    #[serde(default)]
    pub league: LeagueDto,
    #[serde(default)]
    pub league_entries: Vec<LeagueEntryDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub current_event: Option<u32>,
}

/// Entries without ids (e.g. unfilled places) are skipped on conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueEntryDto {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub entry_id: Option<u32>,
    #[serde(default)]
    pub entry_name: String,
    #[serde(default)]
    pub player_first_name: String,
    #[serde(default)]
    pub player_last_name: String,
}

impl LeagueEntryDto {
    fn into_entry(self) -> Option<LeagueEntry> {
        let manager = format!("{} {}", self.player_first_name, self.player_last_name)
            .trim()
            .to_string();
        Some(LeagueEntry {
            id: LeagueEntryId::new(self.id?),
            entry_id: EntryId::new(self.entry_id?),
            name: self.entry_name,
            manager,
        })
    }
}

impl From<LeagueDetailsResponse> for LeagueDetails {
    fn from(response: LeagueDetailsResponse) -> Self {
        Self {
            name: response.league.name,
            entries: response
                .league_entries
                .into_iter()
                .filter_map(LeagueEntryDto::into_entry)
                .collect(),
            current_event: response.league.current_event.filter(|&e| e > 0),
        }
    }
}

/// `GET league/{id}/standings`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<Standing>,
}

/// `GET entry/{entry}/event/{event}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryPicksResponse {
    #[serde(default)]
    pub picks: Vec<Pick>,
}

/// Draft `bootstrap-static`. Its `events` field has a different shape from
/// the main game's and is not read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftBootstrap {
    #[serde(default)]
    pub elements: Vec<ElementName>,
}

/// Main-game `bootstrap-static/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FantasyBootstrap {
    #[serde(default)]
    pub elements: Vec<ElementName>,
    #[serde(default)]
    pub events: Vec<GameEvent>,
}

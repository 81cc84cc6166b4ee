//! League data ports: per-entry picks and id translation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::id::{DraftElementId, EntryId, PlayerId};
use crate::domain::league::{ElementName, GameEvent, LeagueDetails, Standing};
use crate::error::Result;

/// One player selection by an entry for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    /// Draft-local player id.
    pub element: DraftElementId,
    /// 1-based team-sheet slot.
    pub position: u32,
}

/// Fetches an entry's picks for an event.
#[async_trait]
pub trait PicksSource: Send + Sync {
    async fn entry_picks(&self, entry: EntryId, event: u32) -> Result<Vec<Pick>>;
}

/// Read access to one draft league and the game's reference data.
#[async_trait]
pub trait LeagueSource: PicksSource {
    async fn details(&self, league: u32) -> Result<LeagueDetails>;

    async fn standings(&self, league: u32) -> Result<Vec<Standing>>;

    /// Gameweeks from the main game's bootstrap.
    async fn events(&self) -> Result<Vec<GameEvent>>;

    /// Player elements as numbered by the draft game.
    async fn draft_elements(&self) -> Result<Vec<ElementName>>;

    /// Player elements as numbered by the main game.
    async fn fantasy_elements(&self) -> Result<Vec<ElementName>>;

    /// Drop cached details and standings for `league`.
    fn invalidate_league(&self, league: u32);

    /// Drop cached picks of every entry for `event`.
    fn invalidate_picks(&self, event: u32);
}

/// Translates draft-local element ids to canonical player ids.
pub trait IdentifierMapper: Send + Sync {
    /// `None` when the element has no known counterpart.
    fn canonical(&self, element: DraftElementId) -> Option<PlayerId>;
}

/// Assumes both id spaces coincide.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl IdentifierMapper for IdentityMapper {
    fn canonical(&self, element: DraftElementId) -> Option<PlayerId> {
        Some(PlayerId::new(element.get()))
    }
}

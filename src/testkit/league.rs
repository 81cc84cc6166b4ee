//! Mock league collaborators.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::id::{DraftElementId, EntryId, PlayerId};
use crate::error::{Error, FetchError, Result};
use crate::port::league::{IdentifierMapper, Pick, PicksSource};

/// Picks keyed by entry. Entries without a script fail with a 404.
#[derive(Clone, Default)]
pub struct ScriptedPicks {
    picks: HashMap<EntryId, Vec<Pick>>,
    failing: Vec<EntryId>,
    call_count: Arc<AtomicU32>,
}

impl ScriptedPicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `elements` for `entry`, assigning slots 1, 2, 3, ... in order.
    pub fn with_entry(mut self, entry: u32, elements: &[u32]) -> Self {
        let picks = elements
            .iter()
            .zip(1u32..)
            .map(|(&element, position)| Pick {
                element: DraftElementId::new(element),
                position,
            })
            .collect();
        self.picks.insert(EntryId::new(entry), picks);
        self
    }

    pub fn with_picks(mut self, entry: u32, picks: Vec<Pick>) -> Self {
        self.picks.insert(EntryId::new(entry), picks);
        self
    }

    /// Make `entry` fail with a server error.
    pub fn with_failure(mut self, entry: u32) -> Self {
        self.failing.push(EntryId::new(entry));
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PicksSource for ScriptedPicks {
    async fn entry_picks(&self, entry: EntryId, event: u32) -> Result<Vec<Pick>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let resource = format!("entry/{entry}/event/{event}");
        if self.failing.contains(&entry) {
            return Err(Error::Fetch(FetchError::Status {
                resource,
                status: 500,
                attempts: 3,
            }));
        }
        self.picks
            .get(&entry)
            .cloned()
            .ok_or(Error::Fetch(FetchError::NotFound { resource }))
    }
}

/// Explicit element → player table; unlisted elements are unmapped.
#[derive(Debug, Clone, Default)]
pub struct MapMapper {
    table: HashMap<DraftElementId, PlayerId>,
}

impl MapMapper {
    pub fn new(pairs: &[(u32, u32)]) -> Self {
        Self {
            table: pairs
                .iter()
                .map(|&(element, player)| (DraftElementId::new(element), PlayerId::new(player)))
                .collect(),
        }
    }
}

impl IdentifierMapper for MapMapper {
    fn canonical(&self, element: DraftElementId) -> Option<PlayerId> {
        self.table.get(&element).copied()
    }
}

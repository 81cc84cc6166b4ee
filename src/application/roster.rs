//! Per-entry rosters and lineups for one event, plus league-wide ownership.

use std::collections::{HashMap, HashSet};

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::formation::{Formation, SlotRole};
use crate::domain::id::{EntryId, PlayerId};
use crate::domain::league::LeagueEntry;
use crate::domain::lineup::Lineup;
use crate::port::league::{IdentifierMapper, Pick, PicksSource};

/// Player ids owned by any entry in the league.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnershipIndex {
    owners: HashMap<PlayerId, EntryId>,
}

impl OwnershipIndex {
    /// Union of every roster. A player on several rosters keeps its first owner
    /// in iteration order.
    pub fn from_rosters<'a>(rosters: impl IntoIterator<Item = (&'a EntryId, &'a Vec<PlayerId>)>) -> Self {
        let mut owners = HashMap::new();
        for (entry, roster) in rosters {
            for id in roster {
                owners.entry(*id).or_insert(*entry);
            }
        }
        Self { owners }
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.owners.contains_key(&id)
    }

    #[must_use]
    pub fn owner(&self, id: PlayerId) -> Option<EntryId> {
        self.owners.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.owners.keys().copied()
    }
}

/// Result of [`RosterRepository::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub event: u32,
    pub loaded: usize,
    /// Entries whose picks could not be fetched; stored as empty.
    pub failed: Vec<EntryId>,
    /// Picks whose element had no canonical id and kept the raw id.
    pub unmapped: usize,
}

/// Rosters and lineups keyed by entry, rebuilt wholesale on every load.
#[derive(Debug, Clone, Default)]
pub struct RosterRepository {
    rosters: HashMap<EntryId, Vec<PlayerId>>,
    lineups: HashMap<EntryId, Lineup>,
    ownership: OwnershipIndex,
    event: Option<u32>,
}

impl RosterRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every entry's picks for `event` concurrently and replace all
    /// stored rosters.
    ///
    /// A failed entry is logged and stored with an empty roster and lineup.
    pub async fn load<S: PicksSource + ?Sized>(
        &mut self,
        entries: &[LeagueEntry],
        event: u32,
        source: &S,
        mapper: &dyn IdentifierMapper,
        formation: &Formation,
    ) -> LoadSummary {
        let results = join_all(
            entries
                .iter()
                .map(|entry| async move { (entry, source.entry_picks(entry.entry_id, event).await) }),
        )
        .await;

        let mut rosters = HashMap::with_capacity(entries.len());
        let mut lineups = HashMap::with_capacity(entries.len());
        let mut summary = LoadSummary {
            event,
            ..LoadSummary::default()
        };

        for (entry, result) in results {
            match result {
                Ok(picks) => {
                    let (roster, lineup, unmapped) = partition(picks, mapper, formation);
                    debug!(
                        entry = %entry.entry_id,
                        name = %entry.name,
                        starting = lineup.starting.len(),
                        bench = lineup.bench.len(),
                        "Roster loaded"
                    );
                    summary.loaded += 1;
                    summary.unmapped += unmapped;
                    rosters.insert(entry.entry_id, roster);
                    lineups.insert(entry.entry_id, lineup);
                }
                Err(err) => {
                    warn!(entry = %entry.entry_id, name = %entry.name, event, error = %err, "Failed to load picks");
                    summary.failed.push(entry.entry_id);
                    rosters.insert(entry.entry_id, Vec::new());
                    lineups.insert(entry.entry_id, Lineup::default());
                }
            }
        }

        self.ownership = OwnershipIndex::from_rosters(&rosters);
        self.rosters = rosters;
        self.lineups = lineups;
        self.event = Some(event);

        info!(
            event,
            loaded = summary.loaded,
            failed = summary.failed.len(),
            owned = self.ownership.len(),
            "League rosters loaded"
        );
        summary
    }

    #[must_use]
    pub fn roster(&self, entry: EntryId) -> Option<&[PlayerId]> {
        self.rosters.get(&entry).map(Vec::as_slice)
    }

    #[must_use]
    pub fn lineup(&self, entry: EntryId) -> Option<&Lineup> {
        self.lineups.get(&entry)
    }

    #[must_use]
    pub fn is_owned(&self, id: PlayerId) -> bool {
        self.ownership.contains(id)
    }

    #[must_use]
    pub const fn ownership(&self) -> &OwnershipIndex {
        &self.ownership
    }

    /// Event of the last load.
    #[must_use]
    pub const fn event(&self) -> Option<u32> {
        self.event
    }

    pub fn entries(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.rosters.keys().copied()
    }
}

/// Map picks to canonical ids in slot order and split them by slot role.
fn partition(
    mut picks: Vec<Pick>,
    mapper: &dyn IdentifierMapper,
    formation: &Formation,
) -> (Vec<PlayerId>, Lineup, usize) {
    picks.sort_by_key(|p| p.position);

    let mut roster = Vec::with_capacity(picks.len());
    let mut lineup = Lineup::default();
    let mut seen = HashSet::with_capacity(picks.len());
    let mut unmapped = 0;

    for pick in picks {
        let id = mapper.canonical(pick.element).unwrap_or_else(|| {
            debug!(element = %pick.element, "Unmapped element, using raw id");
            unmapped += 1;
            PlayerId::new(pick.element.get())
        });
        if !seen.insert(id) {
            continue;
        }
        roster.push(id);
        match formation.slot_role(pick.position) {
            Some(SlotRole::Starting) => lineup.starting.push(id),
            Some(SlotRole::Bench) => lineup.bench.push(id),
            None => {}
        }
    }

    (roster, lineup, unmapped)
}

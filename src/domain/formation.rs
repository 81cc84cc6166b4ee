//! Squad format: slot thresholds and starting-lineup constraints.

use serde::Deserialize;

use crate::error::ConfigError;

/// Where a pick sits in an entry's team sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Starting,
    Bench,
}

/// Squad format and lineup rules.
///
/// Defaults describe the standard 11-a-side format with a four-player bench:
/// slots 1-11 start, 12-15 sit on the bench, and a valid lineup has exactly
/// one goalkeeper, at least three defenders and at least one forward.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Formation {
    pub starters: usize,
    pub bench: usize,
    pub goalkeepers: usize,
    pub min_defenders: usize,
    pub min_forwards: usize,
}

impl Default for Formation {
    fn default() -> Self {
        Self {
            starters: 11,
            bench: 4,
            goalkeepers: 1,
            min_defenders: 3,
            min_forwards: 1,
        }
    }
}

impl Formation {
    /// Classify a 1-based slot number. Slots past the bench are `None`.
    #[must_use]
    pub fn slot_role(&self, slot: u32) -> Option<SlotRole> {
        let slot = usize::try_from(slot).ok()?;
        if slot == 0 {
            None
        } else if slot <= self.starters {
            Some(SlotRole::Starting)
        } else if slot <= self.starters + self.bench {
            Some(SlotRole::Bench)
        } else {
            None
        }
    }

    /// Starting places left for outfield players.
    #[must_use]
    pub const fn outfield_slots(&self) -> usize {
        self.starters.saturating_sub(self.goalkeepers)
    }

    #[must_use]
    pub const fn squad_size(&self) -> usize {
        self.starters + self.bench
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.starters == 0 {
            return Err(ConfigError::InvalidValue {
                field: "formation.starters",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.goalkeepers + self.min_defenders + self.min_forwards > self.starters {
            return Err(ConfigError::InvalidValue {
                field: "formation",
                reason: "positional minimums exceed the number of starters".to_string(),
            });
        }
        Ok(())
    }
}

//! Domain identifier types with proper encapsulation.
//!
//! The draft game and the main fantasy game number their players
//! independently, so draft element ids and canonical player ids get distinct
//! types and only meet inside an identifier mapper.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self::new(id)
            }
        }
    };
}

numeric_id!(
    /// Canonical player identifier, as used by the player dataset.
    PlayerId
);

numeric_id!(
    /// Player identifier local to the draft game.
    DraftElementId
);

numeric_id!(
    /// Identifier of a team within one league (the league entry).
    LeagueEntryId
);

numeric_id!(
    /// Global team identifier used to address an entry's picks.
    EntryId
);

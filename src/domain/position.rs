//! Playing positions.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A player's position on the pitch.
///
/// Serialized as the upstream `element_type` number (1–4); also accepts the
/// short names (`GKP`, `DEF`, `MID`, `FWD`) when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Self; 4] = [
        Self::Goalkeeper,
        Self::Defender,
        Self::Midfielder,
        Self::Forward,
    ];

    /// Map an upstream `element_type` to a position.
    #[must_use]
    pub const fn from_element_type(element_type: u8) -> Option<Self> {
        match element_type {
            1 => Some(Self::Goalkeeper),
            2 => Some(Self::Defender),
            3 => Some(Self::Midfielder),
            4 => Some(Self::Forward),
            _ => None,
        }
    }

    #[must_use]
    pub const fn element_type(self) -> u8 {
        match self {
            Self::Goalkeeper => 1,
            Self::Defender => 2,
            Self::Midfielder => 3,
            Self::Forward => 4,
        }
    }

    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Goalkeeper => "GKP",
            Self::Defender => "DEF",
            Self::Midfielder => "MID",
            Self::Forward => "FWD",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GKP" | "GK" | "GOALKEEPER" => Some(Self::Goalkeeper),
            "DEF" | "DEFENDER" => Some(Self::Defender),
            "MID" | "MIDFIELDER" => Some(Self::Midfielder),
            "FWD" | "FORWARD" => Some(Self::Forward),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.element_type())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u8),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::from_element_type(n)
                .ok_or_else(|| de::Error::custom(format!("unknown element_type {n}"))),
            Raw::Name(name) => Self::from_name(&name)
                .ok_or_else(|| de::Error::custom(format!("unknown position {name:?}"))),
        }
    }
}

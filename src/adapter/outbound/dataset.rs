//! Loader for the prediction pipeline's player export.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::player::{Player, PlayerIndex};
use crate::error::Result;

/// The export is either a bare array or wrapped under `players`/`elements`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Bare(Vec<Player>),
    Wrapped {
        #[serde(alias = "elements")]
        players: Vec<Player>,
    },
}

impl Export {
    fn into_players(self) -> Vec<Player> {
        match self {
            Self::Bare(players) | Self::Wrapped { players } => players,
        }
    }
}

/// Parse an export and score every player.
pub fn parse_players(json: &str) -> Result<PlayerIndex> {
    let players = serde_json::from_str::<Export>(json)?.into_players();
    Ok(PlayerIndex::new(players))
}

/// Read and parse an export file.
pub fn load_players(path: &Path) -> Result<PlayerIndex> {
    let json = std::fs::read_to_string(path)?;
    let index = parse_players(&json)?;
    info!(path = %path.display(), players = index.len(), "Player dataset loaded");
    Ok(index)
}

//! Builders for players and squads.

use crate::domain::id::PlayerId;
use crate::domain::player::Player;
use crate::domain::position::Position;

/// A player with only an id, position and predicted points set.
pub fn player(id: u32, position: Position, predicted: f64) -> Player {
    let mut p = Player::new(PlayerId::new(id), format!("{}{id}", position.short_name()), position);
    p.predicted_points = Some(predicted);
    p.stats.minutes = Some(900);
    p
}

/// Players from `(position, predicted)` pairs, ids assigned 1, 2, 3, ...
pub fn squad(layout: &[(Position, f64)]) -> Vec<Player> {
    layout.iter()
        .zip(1u32..)
        .map(|(&(position, predicted), id)| player(id, position, predicted))
        .collect()
}

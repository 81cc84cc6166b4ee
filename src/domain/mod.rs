//! Pure domain types: players, positions, lineups and scoring.

pub mod formation;
pub mod id;
pub mod league;
pub mod lineup;
pub mod player;
pub mod position;

pub mod score;

//! Player records and the per-refresh player index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::PlayerId;
use super::position::Position;
use super::score::smart_score;

/// Raw performance counters for a player.
///
/// Every field is optional; upstream data omits values freely and sends
/// numbers as strings. Defaulting to zero happens in the accessors on
/// [`Player`] and in [`smart_score`], never at call sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(default, deserialize_with = "lenient::option_i64")]
    pub minutes: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option_i64")]
    pub goals_scored: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option_i64")]
    pub assists: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option_i64")]
    pub bonus: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub ict_index: Option<f64>,
    /// Percentage of managers owning the player in the main game.
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub selected_by_percent: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_i64")]
    pub transfers_in_event: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option_i64")]
    pub transfers_out_event: Option<i64>,
    /// Points scored in the most recent event.
    #[serde(default, deserialize_with = "lenient::option_i64")]
    pub event_points: Option<i64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub points_per_game_90: Option<f64>,
}

/// A player as exported by the prediction pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(default)]
    pub web_name: String,
    #[serde(rename = "element_type", alias = "position")]
    pub position: Position,
    /// Predicted points for the next event.
    #[serde(
        default,
        alias = "predicted_points_1_gw",
        deserialize_with = "lenient::option_f64"
    )]
    pub predicted_points: Option<f64>,
    /// Precomputed composite draft desirability (0-100).
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub draft_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub form: Option<f64>,
    #[serde(flatten)]
    pub stats: PlayerStats,
    /// Derived; recomputed by [`Player::rescore`].
    #[serde(default, skip_deserializing)]
    pub smart_score: f64,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, web_name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            web_name: web_name.into(),
            position,
            predicted_points: None,
            draft_score: None,
            form: None,
            stats: PlayerStats::default(),
            smart_score: 0.0,
        }
    }

    #[must_use]
    pub fn predicted(&self) -> f64 {
        self.predicted_points.unwrap_or(0.0)
    }

    #[must_use]
    pub fn minutes(&self) -> i64 {
        self.stats.minutes.unwrap_or(0)
    }

    #[must_use]
    pub fn ownership_percent(&self) -> f64 {
        self.stats.selected_by_percent.unwrap_or(0.0)
    }

    /// Net transfers in minus out for the current event.
    #[must_use]
    pub fn transfer_balance(&self) -> i64 {
        self.stats.transfers_in_event.unwrap_or(0) - self.stats.transfers_out_event.unwrap_or(0)
    }

    /// Recompute the derived smart score from the current inputs.
    pub fn rescore(&mut self) {
        self.smart_score = smart_score(self);
    }
}

/// All known players for one refresh cycle in export order, with lookup by
/// canonical id.
#[derive(Debug, Clone, Default)]
pub struct PlayerIndex {
    players: Vec<Player>,
    by_id: HashMap<PlayerId, usize>,
}

impl PlayerIndex {
    /// Build an index, scoring every player. A later duplicate replaces the
    /// earlier record but keeps its slot.
    #[must_use]
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        let mut index = Self::default();
        for mut player in players {
            player.rescore();
            match index.by_id.get(&player.id) {
                Some(&slot) => index.players[slot] = player,
                None => {
                    index.by_id.insert(player.id, index.players.len());
                    index.players.push(player);
                }
            }
        }
        index
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.by_id.get(&id).map(|&slot| &self.players[slot])
    }

    /// Players in the order they were supplied.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Resolve ids to players in order, skipping ids without data.
    #[must_use]
    pub fn resolve(&self, ids: &[PlayerId]) -> Vec<&Player> {
        ids.iter().filter_map(|&id| self.get(id)).collect()
    }

    pub fn rescore(&mut self) {
        for player in &mut self.players {
            player.rescore();
        }
    }
}

/// Accept numbers, numeric strings, or null for optional numeric fields.
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    fn parse(raw: Option<Raw>) -> Option<f64> {
        match raw? {
            Raw::Number(n) => Some(n),
            Raw::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn option_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(parse(Option::<Raw>::deserialize(d)?).filter(|n| n.is_finite()))
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn option_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(option_f64(d)?.map(|n| n.round() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_upstream_shapes() {
        let json = r#"{
            "id": 10,
            "web_name": "Saka",
            "element_type": 3,
            "predicted_points_1_gw": "6.5",
            "draft_score": 81.2,
            "form": "7.1",
            "minutes": 900,
            "selected_by_percent": "45.3",
            "transfers_in_event": 12000,
            "transfers_out_event": null
        }"#;

        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.id, PlayerId::new(10));
        assert_eq!(player.position, Position::Midfielder);
        assert_eq!(player.predicted_points, Some(6.5));
        assert_eq!(player.form, Some(7.1));
        assert_eq!(player.minutes(), 900);
        assert_eq!(player.ownership_percent(), 45.3);
        assert_eq!(player.transfer_balance(), 12000);
        assert_eq!(player.stats.transfers_out_event, None);
    }

    #[test]
    fn missing_and_garbage_values_default_to_zero() {
        let json = r#"{"id": 1, "element_type": "GKP", "form": "n/a"}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.form, None);
        assert_eq!(player.predicted(), 0.0);
        assert_eq!(player.minutes(), 0);
        assert_eq!(player.transfer_balance(), 0);
    }

    #[test]
    fn index_scores_players_on_build() {
        let mut player = Player::new(PlayerId::new(3), "Isak", Position::Forward);
        player.predicted_points = Some(5.0);
        let index = PlayerIndex::new(vec![player]);

        let stored = index.get(PlayerId::new(3)).unwrap();
        assert!(stored.smart_score > 0.0);
        assert_eq!(stored.smart_score, smart_score(stored));
    }

    #[test]
    fn resolve_skips_unknown_ids() {
        let index = PlayerIndex::new(vec![Player::new(
            PlayerId::new(1),
            "A",
            Position::Defender,
        )]);
        let resolved = index.resolve(&[PlayerId::new(1), PlayerId::new(99)]);
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn index_keeps_export_order_and_replaces_duplicates_in_place() {
        let mut updated = Player::new(PlayerId::new(7), "Updated", Position::Midfielder);
        updated.form = Some(3.0);
        let index = PlayerIndex::new(vec![
            Player::new(PlayerId::new(7), "Old", Position::Midfielder),
            Player::new(PlayerId::new(2), "B", Position::Defender),
            Player::new(PlayerId::new(9), "C", Position::Forward),
            updated,
        ]);

        let order: Vec<u32> = index.iter().map(|p| p.id.get()).collect();
        assert_eq!(order, vec![7, 2, 9]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get(PlayerId::new(7)).unwrap().web_name, "Updated");
    }
}

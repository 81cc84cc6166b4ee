//! Starting/bench splits and aggregate lineup statistics.

use serde::{Deserialize, Serialize};

use super::id::PlayerId;
use super::player::Player;

/// An entry's team sheet for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub starting: Vec<PlayerId>,
    pub bench: Vec<PlayerId>,
}

impl Lineup {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.starting.is_empty() && self.bench.is_empty()
    }
}

/// Aggregates used to compare two lineups.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineupStats {
    /// Sum of predicted points.
    pub predicted: f64,
    /// Sum of points scored in the last event.
    pub last_event: i64,
    /// Mean form.
    pub form: f64,
    /// Mean points per 90 minutes.
    pub points_per_90: f64,
}

impl LineupStats {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn of<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let mut stats = Self::default();
        let mut count = 0usize;
        for p in players {
            stats.predicted += p.predicted();
            stats.last_event += p.stats.event_points.unwrap_or(0);
            stats.form += p.form.unwrap_or(0.0);
            stats.points_per_90 += p.stats.points_per_game_90.unwrap_or(0.0);
            count += 1;
        }
        let divisor = count.max(1) as f64;
        stats.form /= divisor;
        stats.points_per_90 /= divisor;
        stats
    }

    /// Field-wise `self - other`.
    #[must_use]
    pub fn diff(&self, other: &Self) -> Self {
        Self {
            predicted: self.predicted - other.predicted,
            last_event: self.last_event - other.last_event,
            form: self.form - other.form,
            points_per_90: self.points_per_90 - other.points_per_90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::position::Position;

    fn player(id: u32, predicted: f64, form: f64, last: i64) -> Player {
        let mut p = Player::new(PlayerId::new(id), format!("p{id}"), Position::Midfielder);
        p.predicted_points = Some(predicted);
        p.form = Some(form);
        p.stats.event_points = Some(last);
        p
    }

    #[test]
    fn stats_sum_and_average() {
        let players = [player(1, 4.0, 2.0, 6), player(2, 2.0, 4.0, 1)];
        let stats = LineupStats::of(&players);
        assert_eq!(stats.predicted, 6.0);
        assert_eq!(stats.last_event, 7);
        assert_eq!(stats.form, 3.0);
    }

    #[test]
    fn stats_of_nothing_are_zero() {
        let stats = LineupStats::of(std::iter::empty());
        assert_eq!(stats, LineupStats::default());
    }

    #[test]
    fn diff_subtracts() {
        let a = LineupStats {
            predicted: 50.0,
            last_event: 40,
            form: 5.0,
            points_per_90: 4.0,
        };
        let b = LineupStats {
            predicted: 45.0,
            last_event: 42,
            form: 4.0,
            points_per_90: 4.5,
        };
        let d = a.diff(&b);
        assert_eq!(d.predicted, 5.0);
        assert_eq!(d.last_event, -2);
        assert_eq!(d.form, 1.0);
        assert_eq!(d.points_per_90, -0.5);
    }
}

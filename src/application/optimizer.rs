//! Lineup selection, replacement search and swap recommendations.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Deserialize;

use super::roster::OwnershipIndex;
use crate::domain::formation::Formation;
use crate::domain::id::PlayerId;
use crate::domain::lineup::{Lineup, LineupStats};
use crate::domain::player::Player;
use crate::domain::position::Position;
use crate::domain::score::smart_score;
use crate::error::ConfigError;

/// A starting eleven and bench chosen from a squad.
#[derive(Debug, Clone, Default)]
pub struct LineupSelection<'a> {
    pub starting: Vec<&'a Player>,
    pub bench: Vec<&'a Player>,
}

impl LineupSelection<'_> {
    #[must_use]
    pub fn lineup(&self) -> Lineup {
        Lineup {
            starting: self.starting.iter().map(|p| p.id).collect(),
            bench: self.bench.iter().map(|p| p.id).collect(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> LineupStats {
        LineupStats::of(self.starting.iter().copied())
    }
}

fn by_predicted_desc(a: &&Player, b: &&Player) -> Ordering {
    b.predicted().total_cmp(&a.predicted())
}

/// Greedy lineup: the best goalkeeper(s), the guaranteed minimum of defenders
/// and forwards, then the best remaining outfield players by predicted points.
///
/// Shortfalls degrade: missing guaranteed players leave their places to the
/// pool, and a squad too small for a full lineup starts everyone it can.
/// Goalkeeper places are never filled by outfield players.
#[must_use]
pub fn best_lineup<'a>(squad: &[&'a Player], formation: &Formation) -> LineupSelection<'a> {
    let group = |position: Position| -> Vec<&'a Player> {
        let mut players: Vec<&'a Player> = squad.iter().copied().filter(|p| p.position == position).collect();
        players.sort_by(by_predicted_desc);
        players
    };

    let mut goalkeepers = group(Position::Goalkeeper);
    let mut defenders = group(Position::Defender);
    let midfielders = group(Position::Midfielder);
    let mut forwards = group(Position::Forward);

    let spare_keepers = goalkeepers.split_off(formation.goalkeepers.min(goalkeepers.len()));
    let spare_defenders = defenders.split_off(formation.min_defenders.min(defenders.len()));
    let spare_forwards = forwards.split_off(formation.min_forwards.min(forwards.len()));

    let mut pool: Vec<&'a Player> = spare_defenders
        .into_iter()
        .chain(midfielders)
        .chain(spare_forwards)
        .collect();
    pool.sort_by(by_predicted_desc);

    let guaranteed = defenders.len() + forwards.len();
    let open = formation.outfield_slots().saturating_sub(guaranteed).min(pool.len());
    let bench_pool = pool.split_off(open);

    let starting = goalkeepers
        .into_iter()
        .chain(defenders)
        .chain(forwards)
        .chain(pool)
        .collect();
    let bench = spare_keepers.into_iter().chain(bench_pool).collect();

    LineupSelection { starting, bench }
}

/// A player paired with the smart score used to rank it.
#[derive(Debug, Clone, Copy)]
pub struct ScoredPlayer<'a> {
    pub player: &'a Player,
    pub score: f64,
}

fn ranked<'a>(players: impl Iterator<Item = &'a Player>, limit: usize) -> Vec<ScoredPlayer<'a>> {
    let mut scored: Vec<ScoredPlayer<'a>> = players
        .map(|player| ScoredPlayer {
            player,
            score: smart_score(player),
        })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// The best `count` free agents at `target`'s position who have played.
#[must_use]
pub fn best_replacements<'a>(
    target: &Player,
    players: impl IntoIterator<Item = &'a Player>,
    ownership: &OwnershipIndex,
    count: usize,
) -> Vec<ScoredPlayer<'a>> {
    ranked(
        players.into_iter().filter(|p| {
            p.id != target.id
                && p.position == target.position
                && p.minutes() > 0
                && !ownership.contains(p.id)
        }),
        count,
    )
}

/// Limits for [`recommend_swaps`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SwapRules {
    /// How many of the squad's lowest-scored outfield players to replace.
    pub weakest: usize,
    /// Candidates offered per weak player.
    pub candidates: usize,
    /// Minimum absolute net transfers for a candidate to be trending.
    pub min_transfer_balance: i64,
}

impl Default for SwapRules {
    fn default() -> Self {
        Self {
            weakest: 4,
            candidates: 3,
            min_transfer_balance: 1000,
        }
    }
}

impl SwapRules {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.candidates == 0 {
            return Err(ConfigError::InvalidValue {
                field: "recommendations.candidates",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.min_transfer_balance < 0 {
            return Err(ConfigError::InvalidValue {
                field: "recommendations.min_transfer_balance",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// Suggested replacements for one weak squad player.
#[derive(Debug, Clone)]
pub struct SwapSuggestion<'a> {
    pub out: ScoredPlayer<'a>,
    pub candidates: Vec<ScoredPlayer<'a>>,
}

/// Pair the squad's weakest outfield players with trending free agents who
/// outscore them. A free agent is suggested at most once; weak players with
/// no candidate are left out.
#[must_use]
pub fn recommend_swaps<'a>(
    squad: &[&'a Player],
    players: &[&'a Player],
    ownership: &OwnershipIndex,
    rules: &SwapRules,
) -> Vec<SwapSuggestion<'a>> {
    let mut weak: Vec<ScoredPlayer<'a>> = squad
        .iter()
        .filter(|p| p.position != Position::Goalkeeper)
        .map(|&player| ScoredPlayer {
            player,
            score: smart_score(player),
        })
        .collect();
    weak.sort_by(|a, b| a.score.total_cmp(&b.score));
    weak.truncate(rules.weakest);

    let squad_ids: HashSet<PlayerId> = squad.iter().map(|p| p.id).collect();
    let mut taken: HashSet<PlayerId> = HashSet::new();
    let mut suggestions = Vec::new();

    for out in weak {
        let candidates = ranked(
            players.iter().copied().filter(|p| {
                p.position == out.player.position
                    && p.minutes() > 0
                    && !ownership.contains(p.id)
                    && !squad_ids.contains(&p.id)
                    && !taken.contains(&p.id)
                    && p.transfer_balance().abs() >= rules.min_transfer_balance
                    && smart_score(p) > out.score
            }),
            rules.candidates,
        );
        if candidates.is_empty() {
            continue;
        }
        taken.extend(candidates.iter().map(|c| c.player.id));
        suggestions.push(SwapSuggestion { out, candidates });
    }

    suggestions
}

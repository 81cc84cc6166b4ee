//! Lineup selection, scoring and free-agent search over whole squads.

use std::collections::{HashMap, HashSet};

use draftwise::application::optimizer::{
    best_lineup, best_replacements, recommend_swaps, SwapRules,
};
use draftwise::application::roster::OwnershipIndex;
use draftwise::domain::formation::Formation;
use draftwise::domain::id::{EntryId, PlayerId};
use draftwise::domain::player::{Player, PlayerIndex};
use draftwise::domain::position::Position::{
    self, Defender as Def, Forward as Fwd, Goalkeeper as Gk, Midfielder as Mid,
};
use draftwise::domain::score::smart_score;
use draftwise::testkit::domain::{player, squad};

fn ids(players: &[&Player]) -> Vec<u32> {
    players.iter().map(|p| p.id.get()).collect()
}

fn owned_by_one_entry(ids: impl IntoIterator<Item = u32>) -> OwnershipIndex {
    let roster: Vec<PlayerId> = ids.into_iter().map(PlayerId::new).collect();
    OwnershipIndex::from_rosters(&HashMap::from([(EntryId::new(7), roster)]))
}

#[test]
fn short_squad_fills_guaranteed_places_then_pools_by_points() {
    // ids 1..=9 in this order
    let players = squad(&[
        (Gk, 2.0),
        (Def, 8.0),
        (Def, 7.0),
        (Def, 6.0),
        (Def, 5.0),
        (Mid, 9.0),
        (Mid, 4.0),
        (Fwd, 10.0),
        (Fwd, 1.0),
    ]);
    let refs: Vec<&Player> = players.iter().collect();

    let selection = best_lineup(&refs, &Formation::default());

    assert_eq!(ids(&selection.starting), vec![1, 2, 3, 4, 8, 6, 5, 7, 9]);
    assert!(selection.bench.is_empty());
}

#[test]
fn exact_starting_size_leaves_an_empty_bench() {
    let players = squad(&[
        (Gk, 2.0),
        (Def, 8.0),
        (Def, 7.0),
        (Def, 6.0),
        (Def, 5.0),
        (Def, 3.0),
        (Mid, 9.0),
        (Mid, 4.0),
        (Mid, 2.5),
        (Fwd, 10.0),
        (Fwd, 1.0),
    ]);
    let refs: Vec<&Player> = players.iter().collect();

    let selection = best_lineup(&refs, &Formation::default());

    assert_eq!(selection.starting.len(), 11);
    assert!(selection.bench.is_empty());
    let expected: HashSet<u32> = (1..=11).collect();
    assert_eq!(ids(&selection.starting).into_iter().collect::<HashSet<_>>(), expected);
}

fn top(players: &[Player], position: Position, n: usize) -> Vec<u32> {
    let mut of_position: Vec<&Player> = players.iter().filter(|p| p.position == position).collect();
    of_position.sort_by(|a, b| b.predicted().total_cmp(&a.predicted()));
    of_position.iter().take(n).map(|p| p.id.get()).collect()
}

#[test]
fn full_squad_always_yields_a_valid_eleven() {
    let layout = [
        Gk, Def, Def, Def, Def, Def, Mid, Mid, Mid, Mid, Mid, Fwd, Fwd, Fwd,
    ];

    for seed in 0..14u32 {
        // 3 is coprime with 14, so the predicted values are a permutation.
        let values: Vec<(Position, f64)> = layout
            .iter()
            .zip(0u32..)
            .map(|(&pos, i)| (pos, f64::from((i * 3 + seed) % 14) + 0.25))
            .collect();
        let players = squad(&values);
        let refs: Vec<&Player> = players.iter().collect();

        let selection = best_lineup(&refs, &Formation::default());
        let starting: HashSet<u32> = ids(&selection.starting).into_iter().collect();
        let bench: HashSet<u32> = ids(&selection.bench).into_iter().collect();

        assert_eq!(selection.starting.len(), 11, "seed {seed}");
        assert_eq!(selection.bench.len(), 3, "seed {seed}");
        assert!(starting.is_disjoint(&bench));
        assert_eq!(starting.len() + bench.len(), players.len());

        let keepers = selection.starting.iter().filter(|p| p.position == Gk).count();
        assert_eq!(keepers, 1, "seed {seed}");
        for id in top(&players, Def, 3).into_iter().chain(top(&players, Fwd, 1)) {
            assert!(starting.contains(&id), "seed {seed}: top player {id} benched");
        }
    }
}

#[test]
fn smart_score_never_falls_as_predicted_points_rise() {
    let mut base = player(1, Mid, 0.0);
    base.form = Some(4.5);
    base.draft_score = Some(60.0);
    base.stats.selected_by_percent = Some(12.0);
    base.stats.transfers_in_event = Some(4000);
    base.stats.transfers_out_event = Some(9000);

    let mut previous = f64::NEG_INFINITY;
    for step in 0..=40 {
        let mut p = base.clone();
        p.predicted_points = Some(f64::from(step) * 0.5);
        let score = smart_score(&p);
        assert!(score >= previous, "score fell at predicted {}", f64::from(step) * 0.5);
        previous = score;
    }
}

#[test]
fn replacements_never_include_owned_players() {
    let pool: Vec<Player> = (1..=30)
        .map(|id| player(id, if id % 2 == 0 { Def } else { Mid }, f64::from(id % 9)))
        .collect();
    let ownership = owned_by_one_entry((1..=30).filter(|id| id % 3 == 0));
    let target = &pool[1];

    let found = best_replacements(target, pool.iter(), &ownership, 5);

    assert_eq!(found.len(), 5);
    for candidate in &found {
        assert!(!ownership.contains(candidate.player.id));
        assert_eq!(candidate.player.position, Def);
        assert_ne!(candidate.player.id, target.id);
    }
    let scores: Vec<f64> = found.iter().map(|c| c.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn tied_replacements_follow_export_order_on_every_build() {
    let target = player(1, Mid, 4.0);
    let others = (2..=12).map(|id| player(id, Mid, 4.0));

    for _ in 0..20 {
        let index = PlayerIndex::new(std::iter::once(target.clone()).chain(others.clone()));
        let found = best_replacements(&target, index.iter(), &OwnershipIndex::default(), 3);
        let ids: Vec<u32> = found.iter().map(|c| c.player.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }
}

#[test]
fn replacements_skip_players_without_minutes() {
    let target = player(1, Fwd, 3.0);
    let mut benchwarmer = player(2, Fwd, 12.0);
    benchwarmer.stats.minutes = Some(0);
    let regular = player(3, Fwd, 2.0);
    let pool = [target.clone(), benchwarmer, regular];

    let found = best_replacements(&target, pool.iter(), &OwnershipIndex::default(), 3);

    assert_eq!(found.iter().map(|c| c.player.id.get()).collect::<Vec<_>>(), vec![3]);
}

#[test]
fn swaps_pair_weak_players_with_distinct_trending_free_agents() {
    let my_squad = squad(&[(Gk, 0.5), (Def, 1.0), (Def, 1.5), (Mid, 8.0)]);
    let mut free_agents: Vec<Player> = (10..=14).map(|id| player(id, Def, 6.0 + f64::from(id))).collect();
    for p in &mut free_agents {
        p.stats.transfers_in_event = Some(5000);
    }
    let mut quiet = player(20, Def, 30.0);
    quiet.stats.transfers_in_event = Some(10);
    free_agents.push(quiet);

    let squad_refs: Vec<&Player> = my_squad.iter().collect();
    let pool: Vec<&Player> = my_squad.iter().chain(free_agents.iter()).collect();
    let ownership = owned_by_one_entry(1..=4);
    let rules = SwapRules {
        weakest: 2,
        candidates: 2,
        min_transfer_balance: 1000,
    };

    let swaps = recommend_swaps(&squad_refs, &pool, &ownership, &rules);

    assert_eq!(swaps.len(), 2);
    assert!(swaps.iter().all(|s| s.out.player.position == Def));
    let offered: Vec<u32> = swaps
        .iter()
        .flat_map(|s| s.candidates.iter().map(|c| c.player.id.get()))
        .collect();
    let unique: HashSet<u32> = offered.iter().copied().collect();
    assert_eq!(offered.len(), unique.len(), "a free agent is offered once");
    assert!(!unique.contains(&20), "below the transfer threshold");
    assert_eq!(swaps[0].candidates[0].player.id.get(), 14);
}

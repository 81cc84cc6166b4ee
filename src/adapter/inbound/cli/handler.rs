//! Command handlers.

use serde_json::json;
use tabled::Tabled;

use super::command::{CacheCommand, Cli, Commands, EntryArgs, ReplacementArgs};
use super::output::{self, OutputConfig};
use crate::application::league::{LeagueService, LeagueSnapshot};
use crate::application::optimizer::{LineupSelection, ScoredPlayer};
use crate::domain::id::{EntryId, PlayerId};
use crate::domain::lineup::LineupStats;
use crate::domain::player::Player;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::bootstrap::{build_cache, build_league_service};
use crate::infrastructure::config::settings::Config;

/// Load the configuration, then run the selected command.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
    });

    let config = Config::load(&cli.config)?;
    config.init_logging();

    match cli.command {
        Commands::Cache(CacheCommand::Clear) => clear_cache(&config),
        Commands::Standings => {
            let (_, snapshot) = refreshed(&config).await?;
            standings(&snapshot);
            Ok(())
        }
        Commands::Lineup(args) => {
            let (service, snapshot) = refreshed(&config).await?;
            lineup(&service, &snapshot, entry_of(&service, &args, &config)?)
        }
        Commands::Recommend(args) => {
            let (service, _) = refreshed(&config).await?;
            recommend(&service, entry_of(&service, &args, &config)?, &config)
        }
        Commands::Replacements(args) => {
            let (service, _) = refreshed(&config).await?;
            replacements(&service, &args)
        }
    }
}

async fn refreshed(config: &Config) -> Result<(LeagueService, LeagueSnapshot)> {
    let mut service = build_league_service(config)?;
    let snapshot = service.refresh(config.league.id).await?;
    if !snapshot.summary.failed.is_empty() {
        output::warning(&format!(
            "{} of {} rosters could not be loaded",
            snapshot.summary.failed.len(),
            snapshot.entries.len()
        ));
    }
    Ok((service, snapshot))
}

fn entry_of(service: &LeagueService, args: &EntryArgs, config: &Config) -> Result<EntryId> {
    let id = args
        .entry
        .or(config.league.my_entry)
        .ok_or(ConfigError::MissingField {
            field: "league.my_entry",
        })?;
    service
        .find_entry(id)
        .map(|entry| entry.entry_id)
        .ok_or(Error::UnknownEntry(id))
}

fn clear_cache(config: &Config) -> Result<()> {
    let removed = build_cache(config)?.clear();
    if output::is_json() {
        output::json_output(&json!({ "command": "cache.clear", "removed": removed }));
    } else {
        output::success(&format!("Removed {removed} cached responses"));
    }
    Ok(())
}

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "Pos")]
    position: &'static str,
    #[tabled(rename = "Player")]
    name: String,
    #[tabled(rename = "Pred")]
    predicted: String,
    #[tabled(rename = "Form")]
    form: String,
    #[tabled(rename = "Smart")]
    smart: String,
}

impl PlayerRow {
    fn new(player: &Player) -> Self {
        Self {
            position: player.position.short_name(),
            name: player.web_name.clone(),
            predicted: format!("{:.1}", player.predicted()),
            form: format!("{:.1}", player.form.unwrap_or(0.0)),
            smart: format!("{:.1}", player.smart_score),
        }
    }
}

fn player_json(player: &Player) -> serde_json::Value {
    json!({
        "id": player.id,
        "name": player.web_name,
        "position": player.position.short_name(),
        "predicted": player.predicted(),
        "smart_score": player.smart_score,
    })
}

fn selection_json(selection: &LineupSelection<'_>) -> serde_json::Value {
    json!({
        "starting": selection.starting.iter().map(|p| player_json(p)).collect::<Vec<_>>(),
        "bench": selection.bench.iter().map(|p| player_json(p)).collect::<Vec<_>>(),
    })
}

fn stats_json(stats: &LineupStats) -> serde_json::Value {
    json!({
        "predicted": stats.predicted,
        "last_event": stats.last_event,
        "form": stats.form,
        "points_per_90": stats.points_per_90,
    })
}

fn lineup(service: &LeagueService, snapshot: &LeagueSnapshot, entry: EntryId) -> Result<()> {
    let current = service.current_lineup(entry)?;
    let recommended = service.recommended_lineup(entry)?;
    let current_stats = current.stats();
    let recommended_stats = recommended.stats();
    let diff = recommended_stats.diff(&current_stats);

    if output::is_json() {
        output::json_output(&json!({
            "command": "lineup",
            "entry": entry,
            "event": snapshot.event,
            "current": selection_json(&current),
            "recommended": selection_json(&recommended),
            "stats": {
                "current": stats_json(&current_stats),
                "recommended": stats_json(&recommended_stats),
                "diff": stats_json(&diff),
            },
        }));
        return Ok(());
    }

    output::header(&format!("{} · event {}", snapshot.name, snapshot.event));
    output::section("Recommended starting lineup");
    output::table(recommended.starting.iter().map(|p| PlayerRow::new(p)));
    output::section("Recommended bench");
    output::table(recommended.bench.iter().map(|p| PlayerRow::new(p)));
    output::section("Compared with the picked lineup");
    output::field("Predicted", format!("{:+.1}", diff.predicted));
    output::field("Last event", format!("{:+}", diff.last_event));
    output::field("Form", format!("{:+.2}", diff.form));
    output::field("Pts / 90", format!("{:+.2}", diff.points_per_90));
    Ok(())
}

#[derive(Tabled)]
struct SwapRow {
    #[tabled(rename = "Out")]
    out: String,
    #[tabled(rename = "Score")]
    out_score: String,
    #[tabled(rename = "In")]
    candidate: String,
    #[tabled(rename = "Score")]
    candidate_score: String,
    #[tabled(rename = "Net transfers")]
    transfers: i64,
}

fn scored_json(scored: &ScoredPlayer<'_>) -> serde_json::Value {
    json!({
        "id": scored.player.id,
        "name": scored.player.web_name,
        "score": scored.score,
        "transfer_balance": scored.player.transfer_balance(),
    })
}

fn recommend(service: &LeagueService, entry: EntryId, config: &Config) -> Result<()> {
    let swaps = service.recommend(entry, &config.recommendations)?;

    if output::is_json() {
        let payload: Vec<_> = swaps
            .iter()
            .map(|swap| {
                json!({
                    "out": scored_json(&swap.out),
                    "candidates": swap.candidates.iter().map(scored_json).collect::<Vec<_>>(),
                })
            })
            .collect();
        output::json_output(&json!({ "command": "recommend", "entry": entry, "swaps": payload }));
        return Ok(());
    }

    output::header("Swap suggestions");
    if swaps.is_empty() {
        output::success("No free agent outscores your weakest players");
        return Ok(());
    }
    let rows = swaps.iter().flat_map(|swap| {
        swap.candidates.iter().map(move |candidate| SwapRow {
            out: swap.out.player.web_name.clone(),
            out_score: format!("{:.1}", swap.out.score),
            candidate: candidate.player.web_name.clone(),
            candidate_score: format!("{:.1}", candidate.score),
            transfers: candidate.player.transfer_balance(),
        })
    });
    output::table(rows);
    Ok(())
}

fn replacements(service: &LeagueService, args: &ReplacementArgs) -> Result<()> {
    let target = PlayerId::new(args.player);
    let candidates = service.replacements(target, args.count)?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "replacements",
            "player": target,
            "candidates": candidates.iter().map(scored_json).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    output::header("Free-agent replacements");
    if candidates.is_empty() {
        output::success("No eligible free agents");
        return Ok(());
    }
    output::table(candidates.iter().map(|c| PlayerRow::new(c.player)));
    Ok(())
}

#[derive(Tabled)]
struct StandingRow {
    #[tabled(rename = "#")]
    rank: u32,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Manager")]
    manager: String,
    #[tabled(rename = "Points")]
    total: i64,
}

fn standings(snapshot: &LeagueSnapshot) {
    let Some(rows) = &snapshot.standings else {
        output::warning("Standings are unavailable");
        return;
    };
    let rows: Vec<StandingRow> = rows
        .iter()
        .map(|row| {
            let entry = snapshot.entries.iter().find(|e| e.id == row.league_entry);
            StandingRow {
                rank: row.rank,
                team: entry.map(|e| e.name.clone()).unwrap_or_default(),
                manager: entry.map(|e| e.manager.clone()).unwrap_or_default(),
                total: row.total,
            }
        })
        .collect();

    if output::is_json() {
        let payload: Vec<_> = rows
            .iter()
            .map(|r| json!({ "rank": r.rank, "team": r.team, "manager": r.manager, "total": r.total }))
            .collect();
        output::json_output(&json!({ "command": "standings", "standings": payload }));
        return;
    }

    output::header(&snapshot.name);
    output::table(rows);
}

//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Draft league lineup and transfer assistant
#[derive(Parser, Debug)]
#[command(name = "draftwise")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "draftwise.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare an entry's picked lineup with the recommended one
    Lineup(EntryArgs),

    /// Suggest free-agent swaps for an entry's weakest players
    Recommend(EntryArgs),

    /// List the best free agents to replace a player
    Replacements(ReplacementArgs),

    /// Show the league table
    Standings,

    /// Manage the response cache
    #[command(subcommand)]
    Cache(CacheCommand),
}

/// Subcommands for `draftwise cache`.
#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Remove every cached response except the preserved key
    Clear,
}

#[derive(Parser, Debug)]
pub struct EntryArgs {
    /// Entry id (global or league-local); defaults to `league.my_entry`
    #[arg(short, long)]
    pub entry: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct ReplacementArgs {
    /// Canonical player id
    #[arg(short, long)]
    pub player: u32,

    /// Number of candidates
    #[arg(short = 'n', long, default_value_t = 3)]
    pub count: usize,
}

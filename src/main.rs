use anyhow::Context;
use clap::Parser;
use draftwise::adapter::inbound::cli::command::Cli;
use draftwise::adapter::inbound::cli::{handler, output};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config_path = cli.config.clone();

    let result = handler::run(cli)
        .await
        .with_context(|| format!("using config {}", config_path.display()));

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

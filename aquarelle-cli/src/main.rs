//! Aquarelle CLI entry point.

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // 日志输出到 stderr，stdout 留给命令结果
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.json {
                let body = serde_json::json!({ "error": format!("{err:#}") });
                println!("{body}");
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(cli);
    let state = commands::build_state(&config)?;

    match &cli.command {
        Commands::Keys(command) => commands::keys::execute(command, &state, cli.json).await,
        Commands::Paint(args) => commands::paint::execute(args, &state, cli.json).await,
        Commands::MapsUrl => commands::maps::execute(&state, cli.json).await,
    }
}

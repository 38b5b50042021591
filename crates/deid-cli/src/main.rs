mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use deid_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for redacted text
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let results = cli
        .results
        .clone()
        .unwrap_or_else(|| config.results_file.clone());

    match cli.command {
        cli::Commands::Analyze(args) => commands::analyze::handle(args, &results, &config).await,
        cli::Commands::Redact(args) => commands::redact::handle(args, &results, &config),
        cli::Commands::Run { analyze, redact } => {
            commands::run::handle(analyze, redact, &results, &config).await
        }
        cli::Commands::Misses => commands::misses::handle(&results),
    }
}

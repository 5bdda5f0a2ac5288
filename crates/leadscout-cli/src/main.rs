use std::path::PathBuf;

use clap::{Parser, ValueEnum};

mod run;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Probe the full postal-code universe in shuffled order.
    All,
    /// Probe the selected metro areas.
    Metro,
    /// Probe the selected postal codes.
    Zips,
}

#[derive(Debug, Parser)]
#[command(name = "leadscout")]
#[command(about = "Scout and rank business leads around geographic areas")]
struct Cli {
    /// Free-text description of the business type to scout for.
    query: String,

    /// Stop after this many candidates.
    #[arg(long, default_value_t = 50)]
    max_results: usize,

    /// How the probed areas are chosen.
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Metro area to probe (repeatable; used with --mode metro).
    #[arg(long = "metro")]
    metros: Vec<String>,

    /// Postal code to probe (repeatable; used with --mode zips).
    #[arg(long = "zip")]
    zips: Vec<String>,

    /// Account type to exclude from results (repeatable).
    #[arg(long = "exclude")]
    excluded_account_types: Vec<String>,

    /// Output CSV path.
    #[arg(long, default_value = "selected_locations.csv")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = leadscout_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    run::run(cli, config).await
}

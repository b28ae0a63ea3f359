//! Orrery CLI - manage custom planets from the terminal
//!
//! This CLI lets operators:
//! - List, create and delete custom planets
//! - Browse the planet cards shown by the list view
//! - Run a headless scene synced to the daemon
//! - Fetch the astronomy picture of the day
//! - Check daemon health

use clap::{Parser, Subcommand};
use orrery_client::HttpPlanetStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{apod, catalog, planets, scene, status};
use error::CliResult;

/// Orrery CLI application
#[derive(Parser)]
#[command(name = "orrery")]
#[command(about = "Orrery - custom planets for a small solar system", long_about = None)]
#[command(version)]
struct Cli {
    /// Orrery daemon endpoint
    #[arg(short, long, env = "ORRERY_ENDPOINT", default_value = "http://localhost:3000")]
    endpoint: String,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Manage custom planets
    Planets {
        #[command(subcommand)]
        command: planets::PlanetCommands,
    },

    /// Show planet cards for the solar or custom list
    Catalog(catalog::CatalogArgs),

    /// Run a headless scene synced to the daemon
    Scene(scene::SceneArgs),

    /// Show the astronomy picture of the day
    Apod(apod::ApodArgs),

    /// Check daemon connectivity
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let store = HttpPlanetStore::new(&cli.endpoint)?;

    match cli.command {
        Commands::Planets { command } => planets::execute(command, &store, cli.output).await,
        Commands::Catalog(args) => catalog::execute(args, &store, cli.output).await,
        Commands::Scene(args) => scene::execute(args, store, cli.output).await,
        Commands::Apod(args) => apod::execute(args, &store, cli.output).await,
        Commands::Status => status::execute(&store, cli.output).await,
    }
}

//! Monitoring Stack Harness CLI
//!
//! A command-line tool for bringing the monitoring stack up, tearing it
//! down, seeding configuration and inspecting service state.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use harness_lib::HarnessConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Monitoring Stack Harness CLI
#[derive(Parser)]
#[command(name = "stackctl")]
#[command(author, version, about = "Deployment harness for the monitoring stack", long_about = None)]
pub struct Cli {
    /// Path to the compose descriptor
    #[arg(long, env = "STACK_COMPOSE_FILE")]
    pub compose_file: Option<PathBuf>,

    /// Directory holding the seeded configuration tree
    #[arg(long, env = "STACK_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Credential env file read at stack start
    #[arg(long, env = "STACK_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Compose project name
    #[arg(long, env = "STACK_PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Output format for service status
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed configuration, build images and start the whole stack
    Up,

    /// Stop the stack, delete seeded configuration and prune caches
    Down,

    /// Run the configuration seeder on its own
    Seed,

    /// Show the state of the stack's services
    Status,
}

/// Merge CLI flag overrides into the environment-derived configuration
fn resolve_config(cli: &Cli) -> Result<HarnessConfig> {
    let mut config = HarnessConfig::load()?;
    if let Some(path) = &cli.compose_file {
        config.compose_file = path.clone();
    }
    if let Some(path) = &cli.config_dir {
        config.config_dir = path.clone();
    }
    if let Some(path) = &cli.env_file {
        config.env_file = path.clone();
    }
    if let Some(name) = &cli.project_name {
        config.project_name = name.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = resolve_config(&cli)?;

    match cli.command {
        Commands::Up => commands::up::run(&config, cli.format).await?,
        Commands::Down => commands::down::run(&config).await?,
        Commands::Seed => commands::seed::run(&config).await?,
        Commands::Status => commands::status::run(&config, cli.format).await?,
    }

    Ok(())
}

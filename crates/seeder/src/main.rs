//! Stack seeder - one-shot configuration seeding job
//!
//! Runs once per fresh deployment, typically as an init job before the
//! long-running services start. Exit code gates bootstrap progress.

use anyhow::Result;
use harness_lib::{HarnessConfig, Seeder};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const SEEDER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!(version = SEEDER_VERSION, "Starting stack-seeder");

    let config = HarnessConfig::load()?;
    info!(config_dir = %config.config_dir.display(), "Seeder configured");

    let seeder = Seeder::new(&config.config_dir);
    let report = seeder.run().await?;

    if report.already_seeded {
        info!("Configuration already seeded, nothing to do");
    } else {
        info!(
            seeded = report.seeded.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            repaired = report.repaired,
            "Seeding finished"
        );
    }

    Ok(())
}

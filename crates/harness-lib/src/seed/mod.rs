//! One-shot configuration seeding
//!
//! Materializes the bundled default configuration into an operator-owned
//! directory. A marker file guards the whole routine: once it exists the
//! seeder never writes to the target directory again, so operator edits are
//! never overwritten. Individual copies use non-overwrite semantics, which
//! makes an aborted run self-healing on the next invocation.

mod sources;


pub use sources::{SeedSource, DEFAULT_SEED_SET, SEED_DIRS};

use crate::error::HarnessError;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Sentinel file recording that seeding completed for this deployment
pub const MARKER_FILE: &str = ".seeded";

/// Outcome of a seeding run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    /// Files copied into the target directory
    pub seeded: Vec<String>,
    /// Files left untouched because they already existed
    pub skipped: Vec<String>,
    /// Best-effort files whose copy failed
    pub failed: Vec<String>,
    /// Wrong-typed filesystem entries removed before seeding
    pub repaired: usize,
    /// The marker was already present and the run was a no-op
    pub already_seeded: bool,
}

/// One-shot configuration seeder
pub struct Seeder {
    target: PathBuf,
    sources: &'static [SeedSource],
}

impl Seeder {
    /// Create a seeder for the given target directory, using the bundled
    /// default seed set
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            sources: DEFAULT_SEED_SET,
        }
    }

    /// Path of the marker file inside the target directory
    pub fn marker_path(&self) -> PathBuf {
        self.target.join(MARKER_FILE)
    }

    /// Run the seeding routine
    ///
    /// Idempotent: a present marker short-circuits the run, and existing
    /// files are never overwritten. Any fatal filesystem error aborts before
    /// the marker is written, so the next invocation retries from scratch.
    pub async fn run(&self) -> Result<SeedReport, HarnessError> {
        let marker = self.marker_path();
        if path_exists(&marker).await? {
            debug!(marker = %marker.display(), "Marker present, skipping seeding");
            return Ok(SeedReport {
                already_seeded: true,
                ..SeedReport::default()
            });
        }

        let mut report = SeedReport::default();

        fs::create_dir_all(&self.target)
            .await
            .map_err(|e| seed_err(&self.target, e))?;

        for dir in SEED_DIRS {
            self.ensure_dir(dir, &mut report).await?;
        }

        for source in self.sources {
            self.seed_file(source, &mut report).await?;
        }

        let stamp = format!("{}\n", chrono::Utc::now().to_rfc3339());
        fs::write(&marker, stamp)
            .await
            .map_err(|e| seed_err(&marker, e))?;

        info!(
            seeded = report.seeded.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            repaired = report.repaired,
            "Seeding complete"
        );
        Ok(report)
    }

    /// Create a nested directory under the target, repairing any path
    /// component that exists as a file
    async fn ensure_dir(&self, rel: &str, report: &mut SeedReport) -> Result<(), HarnessError> {
        let mut current = self.target.clone();
        for component in Path::new(rel).components() {
            current.push(component);
            match fs::metadata(&current).await {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => {
                    warn!(path = %current.display(), "Removing file found where a directory belongs");
                    fs::remove_file(&current)
                        .await
                        .map_err(|e| seed_err(&current, e))?;
                    report.repaired += 1;
                    fs::create_dir(&current)
                        .await
                        .map_err(|e| seed_err(&current, e))?;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    fs::create_dir(&current)
                        .await
                        .map_err(|e| seed_err(&current, e))?;
                }
                Err(e) => return Err(seed_err(&current, e)),
            }
        }
        Ok(())
    }

    /// Copy one default file with non-overwrite semantics
    async fn seed_file(
        &self,
        source: &SeedSource,
        report: &mut SeedReport,
    ) -> Result<(), HarnessError> {
        let dest = self.target.join(source.rel_path);

        match fs::metadata(&dest).await {
            Ok(meta) if meta.is_dir() => {
                warn!(path = %dest.display(), "Removing directory found where a file belongs");
                fs::remove_dir_all(&dest)
                    .await
                    .map_err(|e| seed_err(&dest, e))?;
                report.repaired += 1;
            }
            Ok(_) => {
                // Already present: operator-owned, leave untouched
                debug!(path = %dest.display(), "Already present, not overwriting");
                report.skipped.push(source.rel_path.to_string());
                return Ok(());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(seed_err(&dest, e)),
        }

        match fs::write(&dest, source.contents).await {
            Ok(()) => {
                debug!(path = %dest.display(), "Seeded default file");
                report.seeded.push(source.rel_path.to_string());
            }
            Err(e) if source.best_effort => {
                warn!(path = %dest.display(), error = %e, "Best-effort copy failed, continuing");
                report.failed.push(source.rel_path.to_string());
            }
            Err(e) => return Err(seed_err(&dest, e)),
        }

        Ok(())
    }
}

async fn path_exists(path: &Path) -> Result<bool, HarnessError> {
    fs::try_exists(path).await.map_err(|e| seed_err(path, e))
}

fn seed_err(path: &Path, source: std::io::Error) -> HarnessError {
    HarnessError::Seed {
        path: path.to_path_buf(),
        source,
    }
}

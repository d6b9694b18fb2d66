//! Bootstrap and cleanup sequences
//!
//! Both sequences are strictly ordered and sequential. Bootstrap fails fast:
//! the first failing step aborts the run and no half-started state is rolled
//! back. Cleanup is fail-fast for the steps that matter (stopping services,
//! deleting configuration) and best-effort for cache pruning.

use crate::env_file::{self, ADMIN_PASSWORD_KEY};
use crate::error::HarnessError;
use crate::paths;
use crate::runtime::{ContainerRuntime, ServiceStatus};
use crate::seed::{SeedReport, Seeder};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Result of a successful bootstrap
#[derive(Debug)]
pub struct BootstrapOutcome {
    /// What the seeding pass did
    pub seed: SeedReport,
    /// Service states reported by the runtime after start
    pub services: Vec<ServiceStatus>,
}

/// Make the environment ready to serve
///
/// Verifies the runtime, seeds configuration, resolves the stack credential
/// from the env file, builds images, starts everything detached and returns
/// the final service snapshot.
pub async fn bootstrap(
    runtime: &dyn ContainerRuntime,
    seeder: &Seeder,
    env_file_path: &Path,
) -> Result<BootstrapOutcome, HarnessError> {
    info!("Verifying container runtime");
    runtime.ensure_available().await?;

    info!("Seeding configuration");
    let seed = seeder.run().await?;

    let mut env = env_file::load(env_file_path).await?;
    let password = env_file::admin_password(&env);
    env.insert(ADMIN_PASSWORD_KEY.to_string(), password);

    info!("Building stack images");
    runtime.build().await?;

    info!("Starting services");
    runtime.up(&env).await?;

    let services = runtime.ps().await?;
    info!(services = services.len(), "Stack started");

    Ok(BootstrapOutcome { seed, services })
}

/// Return the environment to a pristine, pre-bootstrap state
///
/// Stops and removes services, deletes the seeded configuration directory
/// behind a path-safety guard, then prunes runtime caches best-effort.
pub async fn cleanup(
    runtime: &dyn ContainerRuntime,
    config_dir: &Path,
) -> Result<(), HarnessError> {
    info!("Stopping and removing services");
    runtime.down().await?;

    match fs::metadata(config_dir).await {
        Ok(_) => {
            let resolved = paths::guard_delete_path(config_dir)?;
            info!(path = %resolved.display(), "Deleting seeded configuration");
            fs::remove_dir_all(&resolved).await?;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %config_dir.display(), "No seeded configuration to delete");
        }
        Err(e) => return Err(HarnessError::Io(e)),
    }

    if let Err(e) = runtime.prune_caches().await {
        warn!(error = %e, "Cache pruning incomplete, continuing");
    }

    info!("Cleanup complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ServiceStatus;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records runtime calls in order and fails on a chosen step
    #[derive(Default)]
    struct MockRuntime {
        calls: Mutex<Vec<&'static str>>,
        fail_on: Option<&'static str>,
        seen_env: Mutex<Option<HashMap<String, String>>>,
    }

    impl MockRuntime {
        fn failing_on(step: &'static str) -> Self {
            Self {
                fail_on: Some(step),
                ..Self::default()
            }
        }

        fn record(&self, step: &'static str) -> Result<(), HarnessError> {
            self.calls.lock().unwrap().push(step);
            if self.fail_on == Some(step) {
                return Err(HarnessError::CommandFailed {
                    program: step.to_string(),
                    code: 1,
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContainerRuntime for MockRuntime {
        async fn ensure_available(&self) -> Result<(), HarnessError> {
            self.record("available")
        }

        async fn build(&self) -> Result<(), HarnessError> {
            self.record("build")
        }

        async fn up(&self, env: &HashMap<String, String>) -> Result<(), HarnessError> {
            *self.seen_env.lock().unwrap() = Some(env.clone());
            self.record("up")
        }

        async fn down(&self) -> Result<(), HarnessError> {
            self.record("down")
        }

        async fn ps(&self) -> Result<Vec<ServiceStatus>, HarnessError> {
            self.record("ps")?;
            Ok(vec![ServiceStatus {
                name: "monitoring-prometheus-1".to_string(),
                service: "prometheus".to_string(),
                state: "running".to_string(),
                status: "Up".to_string(),
                health: String::new(),
            }])
        }

        async fn prune_caches(&self) -> Result<(), HarnessError> {
            self.record("prune")
        }
    }

    #[tokio::test]
    async fn bootstrap_runs_steps_in_contract_order() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("config");
        let runtime = MockRuntime::default();
        let seeder = Seeder::new(&target);

        let outcome = bootstrap(&runtime, &seeder, &temp.path().join(".env"))
            .await
            .unwrap();

        assert_eq!(runtime.calls(), vec!["available", "build", "up", "ps"]);
        assert!(target.join(crate::seed::MARKER_FILE).exists());
        assert_eq!(outcome.services.len(), 1);
        assert!(outcome.services[0].is_running());
    }

    #[tokio::test]
    async fn bootstrap_exports_default_credential_when_env_file_missing() {
        let temp = TempDir::new().unwrap();
        let runtime = MockRuntime::default();
        let seeder = Seeder::new(temp.path().join("config"));

        bootstrap(&runtime, &seeder, &temp.path().join("absent.env"))
            .await
            .unwrap();

        let env = runtime.seen_env.lock().unwrap().clone().unwrap();
        assert_eq!(env[ADMIN_PASSWORD_KEY], env_file::DEFAULT_ADMIN_PASSWORD);
    }

    #[tokio::test]
    async fn bootstrap_exports_credential_from_env_file() {
        let temp = TempDir::new().unwrap();
        let env_path = temp.path().join(".env");
        tokio::fs::write(&env_path, "GF_SECURITY_ADMIN_PASSWORD=hunter2\n")
            .await
            .unwrap();
        let runtime = MockRuntime::default();
        let seeder = Seeder::new(temp.path().join("config"));

        bootstrap(&runtime, &seeder, &env_path).await.unwrap();

        let env = runtime.seen_env.lock().unwrap().clone().unwrap();
        assert_eq!(env[ADMIN_PASSWORD_KEY], "hunter2");
    }

    #[tokio::test]
    async fn bootstrap_stops_at_first_failing_step() {
        let temp = TempDir::new().unwrap();
        let runtime = MockRuntime::failing_on("build");
        let seeder = Seeder::new(temp.path().join("config"));

        let err = bootstrap(&runtime, &seeder, &temp.path().join(".env"))
            .await
            .unwrap_err();

        assert!(matches!(err, HarnessError::CommandFailed { .. }));
        assert_eq!(runtime.calls(), vec!["available", "build"]);
    }

    #[tokio::test]
    async fn bootstrap_never_seeds_when_runtime_unavailable() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("config");
        let runtime = MockRuntime::failing_on("available");
        let seeder = Seeder::new(&target);

        bootstrap(&runtime, &seeder, &temp.path().join(".env"))
            .await
            .unwrap_err();

        assert!(!target.exists());
    }

    #[tokio::test]
    async fn cleanup_deletes_config_and_swallows_prune_failure() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("config");
        Seeder::new(&target).run().await.unwrap();
        let runtime = MockRuntime::failing_on("prune");

        cleanup(&runtime, &target).await.unwrap();

        assert_eq!(runtime.calls(), vec!["down", "prune"]);
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn cleanup_propagates_down_failure() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("config");
        Seeder::new(&target).run().await.unwrap();
        let runtime = MockRuntime::failing_on("down");

        let err = cleanup(&runtime, &target).await.unwrap_err();

        assert!(matches!(err, HarnessError::CommandFailed { .. }));
        // Configuration must survive when teardown of services failed
        assert!(target.exists());
    }

    #[tokio::test]
    async fn cleanup_refuses_root_config_dir() {
        let runtime = MockRuntime::default();
        let err = cleanup(&runtime, Path::new("/")).await.unwrap_err();
        assert!(matches!(err, HarnessError::UnsafeDeleteTarget(_)));
    }

    #[tokio::test]
    async fn cleanup_tolerates_absent_config_dir() {
        let temp = TempDir::new().unwrap();
        let runtime = MockRuntime::default();

        cleanup(&runtime, &temp.path().join("never-seeded")).await.unwrap();

        assert_eq!(runtime.calls(), vec!["down", "prune"]);
    }
}

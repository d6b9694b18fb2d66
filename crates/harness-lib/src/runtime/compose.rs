//! Docker Compose runtime implementation
//!
//! Drives `docker` as a subprocess. Long-running operations (build, up,
//! down) inherit stdio so the runtime's own progress output stays visible;
//! queries capture stdout for parsing.

use super::{ContainerRuntime, ServiceStatus};
use crate::error::HarnessError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Docker Compose driver for the stack descriptor
pub struct DockerCompose {
    compose_file: PathBuf,
    project_name: String,
}

impl DockerCompose {
    pub fn new(compose_file: impl Into<PathBuf>, project_name: impl Into<String>) -> Self {
        Self {
            compose_file: compose_file.into(),
            project_name: project_name.into(),
        }
    }

    /// A missing descriptor is a distinct failure, raised before any
    /// subprocess runs
    fn ensure_compose_file(&self) -> Result<(), HarnessError> {
        if self.compose_file.is_file() {
            Ok(())
        } else {
            Err(HarnessError::ComposeFileMissing(self.compose_file.clone()))
        }
    }

    fn compose_command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("docker");
        cmd.arg("compose")
            .arg("-f")
            .arg(&self.compose_file)
            .arg("-p")
            .arg(&self.project_name)
            .args(args);
        cmd
    }

    /// Run a subprocess with inherited stdio, failing on non-zero exit
    async fn run_streamed(&self, mut cmd: Command, label: &str) -> Result<(), HarnessError> {
        debug!(command = label, "Running runtime command");
        let status = cmd
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| spawn_err(label, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(HarnessError::CommandFailed {
                program: label.to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }

    /// Run a subprocess capturing stdout, failing on non-zero exit
    async fn run_captured(&self, mut cmd: Command, label: &str) -> Result<String, HarnessError> {
        debug!(command = label, "Running runtime query");
        let output = cmd
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| spawn_err(label, e))?;

        if !output.status.success() {
            return Err(HarnessError::CommandFailed {
                program: label.to_string(),
                code: output.status.code().unwrap_or(-1),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl ContainerRuntime for DockerCompose {
    async fn ensure_available(&self) -> Result<(), HarnessError> {
        let mut cmd = Command::new("docker");
        cmd.args(["info", "--format", "{{.ServerVersion}}"])
            .stdin(Stdio::null());

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                HarnessError::RuntimeUnavailable("docker not found on PATH".to_string())
            } else {
                spawn_err("docker info", e)
            }
        })?;

        if output.status.success() {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            debug!(server_version = %version, "Container runtime responsive");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(HarnessError::RuntimeUnavailable(stderr))
        }
    }

    async fn build(&self) -> Result<(), HarnessError> {
        self.ensure_compose_file()?;
        self.run_streamed(self.compose_command(&["build"]), "docker compose build")
            .await
    }

    async fn up(&self, env: &HashMap<String, String>) -> Result<(), HarnessError> {
        self.ensure_compose_file()?;
        let mut cmd = self.compose_command(&["up", "-d"]);
        cmd.envs(env);
        self.run_streamed(cmd, "docker compose up").await
    }

    async fn down(&self) -> Result<(), HarnessError> {
        self.ensure_compose_file()?;
        let cmd = self.compose_command(&[
            "down",
            "--rmi",
            "local",
            "--volumes",
            "--remove-orphans",
        ]);
        self.run_streamed(cmd, "docker compose down").await
    }

    async fn ps(&self) -> Result<Vec<ServiceStatus>, HarnessError> {
        self.ensure_compose_file()?;
        let stdout = self
            .run_captured(
                self.compose_command(&["ps", "-a", "--format", "json"]),
                "docker compose ps",
            )
            .await?;
        parse_ps_output(&stdout)
    }

    async fn prune_caches(&self) -> Result<(), HarnessError> {
        let mut last_failure = None;

        for (what, args) in [
            ("volumes", ["volume", "prune", "-f"]),
            ("images", ["image", "prune", "-f"]),
            ("networks", ["network", "prune", "-f"]),
        ] {
            let mut cmd = Command::new("docker");
            cmd.args(args);
            let label = format!("docker {} prune", &args[0]);
            if let Err(e) = self.run_streamed(cmd, &label).await {
                warn!(cache = what, error = %e, "Cache prune failed");
                last_failure = Some(e);
            }
        }

        match last_failure {
            None => Ok(()),
            Some(e) => Err(e),
        }
    }
}

/// Parse `compose ps --format json` output
///
/// Newer compose versions emit one JSON object per line; older ones emit a
/// single JSON array. Both are accepted.
fn parse_ps_output(stdout: &str) -> Result<Vec<ServiceStatus>, HarnessError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut services = Vec::new();
    for line in trimmed.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        services.push(serde_json::from_str(line)?);
    }
    Ok(services)
}

fn spawn_err(program: &str, source: std::io::Error) -> HarnessError {
    HarnessError::CommandSpawn {
        program: program.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_delimited_status_output() {
        let stdout = concat!(
            r#"{"Name":"monitoring-prometheus-1","Service":"prometheus","State":"running","Status":"Up 2 minutes","Health":""}"#,
            "\n",
            r#"{"Name":"monitoring-grafana-1","Service":"grafana","State":"exited","Status":"Exited (1) 5 seconds ago","Health":""}"#,
            "\n",
        );

        let services = parse_ps_output(stdout).unwrap();
        assert_eq!(services.len(), 2);
        assert!(services[0].is_running());
        assert_eq!(services[1].service, "grafana");
        assert!(!services[1].is_running());
    }

    #[test]
    fn parses_array_status_output() {
        let stdout = r#"[{"Name":"monitoring-prometheus-1","Service":"prometheus","State":"running","Status":"Up"}]"#;
        let services = parse_ps_output(stdout).unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "monitoring-prometheus-1");
    }

    #[test]
    fn empty_output_means_no_services() {
        assert!(parse_ps_output("").unwrap().is_empty());
        assert!(parse_ps_output("  \n").unwrap().is_empty());
    }

    #[test]
    fn missing_descriptor_is_distinct_error() {
        let runtime = DockerCompose::new("/no/such/compose.yml", "monitoring");
        let err = runtime.ensure_compose_file().unwrap_err();
        assert!(matches!(err, HarnessError::ComposeFileMissing(_)));
    }
}

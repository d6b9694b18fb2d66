//! Status command: dump the state of all declared services

use crate::output::{print_services, OutputFormat};
use anyhow::Result;
use harness_lib::{ContainerRuntime, DockerCompose, HarnessConfig};

pub async fn run(config: &HarnessConfig, format: OutputFormat) -> Result<()> {
    let runtime = DockerCompose::new(&config.compose_file, &config.project_name);

    runtime.ensure_available().await?;
    let services = runtime.ps().await?;

    print_services(&services, format);
    Ok(())
}

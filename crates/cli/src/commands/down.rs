//! Cleanup command: tear the stack down and delete seeded state

use crate::output::{print_info, print_success};
use anyhow::Result;
use harness_lib::{cleanup, DockerCompose, HarnessConfig};

pub async fn run(config: &HarnessConfig) -> Result<()> {
    let runtime = DockerCompose::new(&config.compose_file, &config.project_name);

    print_info(&format!(
        "Tearing down project '{}' and deleting '{}'",
        config.project_name,
        config.config_dir.display()
    ));

    cleanup(&runtime, &config.config_dir).await?;

    print_success("Environment returned to pristine state");
    Ok(())
}

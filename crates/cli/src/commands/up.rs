//! Bootstrap command: seed configuration and start the stack

use crate::output::{print_info, print_services, print_success, print_warning, OutputFormat};
use anyhow::Result;
use harness_lib::{bootstrap, DockerCompose, HarnessConfig, Seeder};

pub async fn run(config: &HarnessConfig, format: OutputFormat) -> Result<()> {
    let runtime = DockerCompose::new(&config.compose_file, &config.project_name);
    let seeder = Seeder::new(&config.config_dir);

    print_info(&format!(
        "Bringing the stack up (project '{}', config '{}')",
        config.project_name,
        config.config_dir.display()
    ));

    let outcome = bootstrap(&runtime, &seeder, &config.env_file).await?;

    if outcome.seed.already_seeded {
        print_info("Configuration already seeded, operator edits preserved");
    } else {
        print_success(&format!(
            "Seeded {} files ({} already present)",
            outcome.seed.seeded.len(),
            outcome.seed.skipped.len()
        ));
        if !outcome.seed.failed.is_empty() {
            print_warning(&format!(
                "{} provisioning files could not be copied: {}",
                outcome.seed.failed.len(),
                outcome.seed.failed.join(", ")
            ));
        }
    }

    print_success("Stack is up");
    print_services(&outcome.services, format);

    let stopped: Vec<&str> = outcome
        .services
        .iter()
        .filter(|s| !s.is_running())
        .map(|s| s.service.as_str())
        .collect();
    if !stopped.is_empty() {
        print_warning(&format!("Not running: {}", stopped.join(", ")));
    }

    Ok(())
}

//! Standalone seeding command

use crate::output::{print_info, print_success, print_warning};
use anyhow::Result;
use harness_lib::{HarnessConfig, Seeder};

pub async fn run(config: &HarnessConfig) -> Result<()> {
    let seeder = Seeder::new(&config.config_dir);
    let report = seeder.run().await?;

    if report.already_seeded {
        print_info(&format!(
            "'{}' already seeded, nothing to do",
            config.config_dir.display()
        ));
        return Ok(());
    }

    for path in &report.seeded {
        print_success(&format!("seeded  {}", path));
    }
    for path in &report.skipped {
        print_info(&format!("kept    {}", path));
    }
    for path in &report.failed {
        print_warning(&format!("failed  {}", path));
    }
    if report.repaired > 0 {
        print_warning(&format!(
            "repaired {} wrong-typed filesystem entries",
            report.repaired
        ));
    }

    print_success(&format!(
        "Seeding complete under '{}'",
        config.config_dir.display()
    ));
    Ok(())
}

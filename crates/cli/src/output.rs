//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use harness_lib::ServiceStatus;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Row for the service status table
#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Print the final service status dump
pub fn print_services(services: &[ServiceStatus], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(services) {
                println!("{}", json);
            }
        }
        OutputFormat::Table => {
            if services.is_empty() {
                println!("{}", "No services found".yellow());
                return;
            }
            let rows: Vec<ServiceRow> = services
                .iter()
                .map(|s| ServiceRow {
                    name: s.name.clone(),
                    service: s.service.clone(),
                    state: color_state(&s.state),
                    status: s.status.clone(),
                })
                .collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            println!("{}", table);
        }
    }
}

/// Color a service state based on its value
fn color_state(state: &str) -> String {
    match state.to_lowercase().as_str() {
        "running" => state.green().to_string(),
        "restarting" | "created" | "paused" => state.yellow().to_string(),
        "exited" | "dead" => state.red().to_string(),
        _ => state.to_string(),
    }
}

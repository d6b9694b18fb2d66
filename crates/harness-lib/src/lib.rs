//! Harness library for the monitoring stack deployment
//!
//! This crate provides the core functionality for:
//! - One-shot configuration seeding with a marker-file idempotence guard
//! - Driving the container runtime (docker compose) as a subprocess
//! - Bootstrap and cleanup lifecycle sequences
//! - Credential env-file parsing

pub mod config;
pub mod env_file;
pub mod error;
pub mod lifecycle;
pub mod paths;
pub mod runtime;
pub mod seed;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use lifecycle::{bootstrap, cleanup, BootstrapOutcome};
pub use runtime::{ContainerRuntime, DockerCompose, ServiceStatus};
pub use seed::{SeedReport, Seeder, MARKER_FILE};

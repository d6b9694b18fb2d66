//! Container runtime driving
//!
//! The harness never talks to the orchestrator's API: it shells out to the
//! runtime CLI and treats it as an external collaborator. The trait is the
//! seam that lets lifecycle sequencing be tested without a runtime.

mod compose;

pub use compose::DockerCompose;

use crate::error::HarnessError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State of one orchestrated service as reported by the runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Service", default)]
    pub service: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Health", default)]
    pub health: String,
}

impl ServiceStatus {
    pub fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("running")
    }
}

/// Operations the harness needs from the container runtime
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Verify the runtime is installed and responsive
    async fn ensure_available(&self) -> Result<(), HarnessError>;

    /// Build the stack's images
    async fn build(&self) -> Result<(), HarnessError>;

    /// Start all services detached, with the given extra environment
    async fn up(&self, env: &HashMap<String, String>) -> Result<(), HarnessError>;

    /// Stop and remove services, local images, anonymous volumes and
    /// orphaned containers
    async fn down(&self) -> Result<(), HarnessError>;

    /// Report the state of all declared services
    async fn ps(&self) -> Result<Vec<ServiceStatus>, HarnessError>;

    /// Prune now-unused runtime caches (volumes, images, networks)
    ///
    /// Implementations attempt every cache even when one prune fails; the
    /// returned error reports the last failure so callers can decide whether
    /// it matters.
    async fn prune_caches(&self) -> Result<(), HarnessError>;
}

//! Harness configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

/// Harness configuration
///
/// Loaded from `STACK_`-prefixed environment variables, with defaults
/// matching the repository layout (compose descriptor and env file in the
/// working directory, seeded configuration under `./config`).
#[derive(Debug, Clone, Deserialize)]
pub struct HarnessConfig {
    /// Directory receiving the seeded configuration tree
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Compose descriptor the runtime operates on
    #[serde(default = "default_compose_file")]
    pub compose_file: PathBuf,

    /// Credential env file read at stack start
    #[serde(default = "default_env_file")]
    pub env_file: PathBuf,

    /// Compose project name
    #[serde(default = "default_project_name")]
    pub project_name: String,
}

fn default_config_dir() -> PathBuf {
    PathBuf::from("./config")
}

fn default_compose_file() -> PathBuf {
    PathBuf::from("docker-compose.yml")
}

fn default_env_file() -> PathBuf {
    PathBuf::from(".env")
}

fn default_project_name() -> String {
    "monitoring".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            compose_file: default_compose_file(),
            env_file: default_env_file(),
            project_name: default_project_name(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("STACK"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_repository_layout() {
        let config = HarnessConfig::default();
        assert_eq!(config.config_dir, PathBuf::from("./config"));
        assert_eq!(config.compose_file, PathBuf::from("docker-compose.yml"));
        assert_eq!(config.env_file, PathBuf::from(".env"));
        assert_eq!(config.project_name, "monitoring");
    }
}

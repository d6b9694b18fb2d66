//! Bundled default configuration payloads
//!
//! The seed source set is fixed at compile time: every file the stack needs
//! on first start is embedded here, so the seeder has no runtime asset
//! dependencies.

/// A single default configuration file
pub struct SeedSource {
    /// Path relative to the target configuration directory
    pub rel_path: &'static str,
    /// File contents
    pub contents: &'static str,
    /// Whether a failed copy is tolerated
    ///
    /// Grafana provisioning payloads are copied best-effort: the dashboard
    /// UI can start without them, and a permission problem on one of them
    /// should not leave the whole stack unseeded.
    pub best_effort: bool,
}

/// Directory skeleton created before any file is copied
pub const SEED_DIRS: &[&str] = &[
    "prometheus",
    "grafana/provisioning/datasources",
    "grafana/provisioning/dashboards",
    "grafana/dashboards",
    "fritz",
];

/// The default seed source set
pub const DEFAULT_SEED_SET: &[SeedSource] = &[
    SeedSource {
        rel_path: "prometheus/prometheus.yml",
        contents: include_str!("../../assets/prometheus/prometheus.yml"),
        best_effort: false,
    },
    SeedSource {
        rel_path: "grafana/provisioning/datasources/datasources.yml",
        contents: include_str!("../../assets/grafana/provisioning/datasources/datasources.yml"),
        best_effort: true,
    },
    SeedSource {
        rel_path: "grafana/provisioning/dashboards/providers.yml",
        contents: include_str!("../../assets/grafana/provisioning/dashboards/providers.yml"),
        best_effort: true,
    },
    SeedSource {
        rel_path: "grafana/dashboards/stack-overview.json",
        contents: include_str!("../../assets/grafana/dashboards/stack-overview.json"),
        best_effort: true,
    },
    SeedSource {
        rel_path: "fritz/fritz.yml",
        contents: include_str!("../../assets/fritz/fritz.yml"),
        best_effort: false,
    },
];

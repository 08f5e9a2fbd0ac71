//! # Runtime Configuration
//!
//! Combines telemetry and engine settings with the process-level options.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `YARD_TOPOLOGY_SEED` | unset | JSON topology seed file; the built-in `YRD1` topology when unset |
//!
//! Engine variables (`YARD_CACHE_*`, `YARD_DEFAULT_CONTAINER_*`) are read by
//! [`AllocationConfig::from_env`].

use std::path::PathBuf;
use yard_allocation::{AllocationConfig, ConfigError};
use yard_telemetry::TelemetryConfig;

pub const SEED_PATH_VAR: &str = "YARD_TOPOLOGY_SEED";

/// Complete process configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Logging and metrics.
    pub telemetry: TelemetryConfig,
    /// Allocation engine.
    pub allocation: AllocationConfig,
    /// Topology seed file. `None` loads the built-in topology.
    pub seed_path: Option<PathBuf>,
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            telemetry: TelemetryConfig::from_env(),
            ..Self::from_lookup(|key| std::env::var(key).ok())?
        })
    }

    /// Build from an arbitrary variable source. Telemetry keeps its defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed_path = lookup(SEED_PATH_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            telemetry: TelemetryConfig::default(),
            allocation: AllocationConfig::from_lookup(lookup)?,
            seed_path,
        })
    }
}

//! # Yard Telemetry
//!
//! Logging and metrics for the yard allocation engine.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with env filter, pretty or JSON output
//! - **Metrics**: Prometheus counters for suggestions, placements, pickups and cache lookups
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yard_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `YARD_SERVICE_NAME` | `yard-allocation` | Service name in logs |
//! | `YARD_LOG_LEVEL` | `info` | Log level filter |
//! | `YARD_JSON_LOGS` | `false` | JSON log output |
//! | `YARD_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, CACHE_LOOKUPS,
    FINDER_DURATION, PICKUPS, PLACEMENTS, SUGGESTIONS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so that start-up log lines can already be counted
    let metrics_handle = register_metrics()?;
    let logging_guard = init_logging(&config)?;

    Ok(TelemetryGuard {
        _logging: logging_guard,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logging: LoggingGuard,
    _metrics: MetricsHandle,
}

/// Record a metric increment with labels.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

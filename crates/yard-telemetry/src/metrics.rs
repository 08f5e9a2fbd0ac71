//! Prometheus metrics for the yard allocation engine.
//!
//! All metrics follow the naming convention: `yard_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Suggestions served, by outcome (found/error code)
    pub static ref SUGGESTIONS: CounterVec = CounterVec::new(
        Opts::new("yard_suggestions_total", "Position suggestions served"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Placement transactions, by outcome (committed/error code)
    pub static ref PLACEMENTS: CounterVec = CounterVec::new(
        Opts::new("yard_placements_total", "Placement transactions"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Pickup transactions, by outcome (committed/error code)
    pub static ref PICKUPS: CounterVec = CounterVec::new(
        Opts::new("yard_pickups_total", "Pickup transactions"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Cache lookups, by cache name (plans/occupancy/suggestions) and result (hit/miss/error)
    pub static ref CACHE_LOOKUPS: CounterVec = CounterVec::new(
        Opts::new("yard_cache_lookups_total", "Read-through cache lookups"),
        &["cache", "result"]
    ).expect("metric creation failed");

    /// Time spent in the position finder scan
    pub static ref FINDER_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "yard_finder_scan_duration_seconds",
            "Time spent scanning a plan region for a free position"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).expect("bucket layout is static"))
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SUGGESTIONS.clone()),
        Box::new(PLACEMENTS.clone()),
        Box::new(PICKUPS.clone()),
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(FINDER_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::HistogramTimer::new(&$histogram)
    };
}

//! Metrics for scan activity.
//!
//! Without an installed recorder the macros are no-ops; the binary installs
//! a Prometheus recorder when asked to print a snapshot.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Odds fetch latency metric name.
pub const METRIC_ODDS_FETCH_LATENCY: &str = "odds_fetch_latency_ms";
/// Per-match evaluation latency metric name.
pub const METRIC_MATCH_EVALUATION_LATENCY: &str = "match_evaluation_latency_ms";
/// Matches evaluated counter metric name.
pub const METRIC_MATCHES_EVALUATED: &str = "matches_evaluated_total";
/// Opportunities detected counter metric name.
pub const METRIC_OPPORTUNITIES_DETECTED: &str = "opportunities_detected_total";
/// Incomplete matches counter metric name.
pub const METRIC_INCOMPLETE_MATCHES: &str = "incomplete_matches_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after any recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_ODDS_FETCH_LATENCY,
        "Odds API request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_MATCH_EVALUATION_LATENCY,
        "Time to normalize and evaluate one match in milliseconds"
    );

    describe_counter!(METRIC_MATCHES_EVALUATED, "Total number of matches evaluated");
    describe_counter!(
        METRIC_OPPORTUNITIES_DETECTED,
        "Total number of arbitrage opportunities detected"
    );
    describe_counter!(
        METRIC_INCOMPLETE_MATCHES,
        "Total number of matches with missing or invalid outcomes"
    );

    debug!("Metrics initialized");
}

/// Install a Prometheus recorder whose handle can render a text snapshot.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Record odds fetch latency.
pub fn record_odds_fetch_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_ODDS_FETCH_LATENCY).record(latency_ms);
}

/// Increment matches evaluated counter.
pub fn inc_matches_evaluated() {
    counter!(METRIC_MATCHES_EVALUATED).increment(1);
}

/// Increment opportunities detected counter.
pub fn inc_opportunities_detected() {
    counter!(METRIC_OPPORTUNITIES_DETECTED).increment(1);
}

/// Increment incomplete matches counter.
pub fn inc_incomplete_matches() {
    counter!(METRIC_INCOMPLETE_MATCHES).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for match evaluation.
pub fn timer_match_evaluation() -> LatencyTimer {
    LatencyTimer::new(METRIC_MATCH_EVALUATION_LATENCY)
}

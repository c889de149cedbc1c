//! Prometheus Metrics Module
//!
//! # Metrics
//!
//! - `position_sizer_evaluations_total{outcome}`: full evaluations by outcome
//! - `position_sizer_recomputations_total{outcome}`: downstream recomputations
//! - `position_sizer_evaluation_seconds`: evaluation latency
//!
//! Metrics are exposed at `/metrics` on the HTTP port when enabled.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Later calls return the handle installed by the first.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

fn register_metrics() {
    describe_counter!(
        "position_sizer_evaluations_total",
        "Total trade evaluations by outcome"
    );
    describe_counter!(
        "position_sizer_recomputations_total",
        "Total downstream share count recomputations by outcome"
    );
    describe_histogram!(
        "position_sizer_evaluation_seconds",
        "Time to validate and evaluate a trade"
    );
}

/// Outcome label for recorded requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Metrics were produced.
    Ok,
    /// Input was rejected.
    Invalid,
}

impl Outcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Invalid => "invalid",
        }
    }
}

/// Record a full evaluation.
pub fn record_evaluation(outcome: Outcome, elapsed: Duration) {
    counter!("position_sizer_evaluations_total", "outcome" => outcome.as_str()).increment(1);
    histogram!("position_sizer_evaluation_seconds").record(elapsed.as_secs_f64());
}

/// Record a downstream recomputation.
pub fn record_recomputation(outcome: Outcome) {
    counter!("position_sizer_recomputations_total", "outcome" => outcome.as_str()).increment(1);
}

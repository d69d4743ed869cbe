//! Prometheus metrics for booking and read traffic.
//!
//! Metrics are emitted through the `metrics` facade and are no-ops until a
//! recorder is installed. [`MetricsExporter`] installs the Prometheus recorder
//! and renders the current values for scraping.
//!
//! # Example
//!
//! ```rust,no_run
//! use car_park_runtime::metrics::MetricsExporter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut exporter = MetricsExporter::new();
//! exporter.install()?;
//!
//! // Serve this from a /metrics endpoint
//! let body = exporter.render().unwrap_or_default();
//! # Ok(())
//! # }
//! ```

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

/// Total booking attempts, labelled by `outcome`.
pub const BOOKINGS_TOTAL: &str = "car_park_bookings_total";
/// Total release attempts, labelled by `outcome`.
pub const RELEASES_TOTAL: &str = "car_park_releases_total";
/// Number of times an empty store was seeded.
pub const STORE_SEEDS_TOTAL: &str = "car_park_store_seeds_total";
/// Time taken to build a level view.
pub const LEVEL_VIEW_DURATION: &str = "car_park_level_view_duration_seconds";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build the exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install the global recorder
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Prometheus recorder installed as the global `metrics` recorder.
#[derive(Default)]
pub struct MetricsExporter {
    handle: Option<PrometheusHandle>,
}

impl MetricsExporter {
    /// Create an exporter that has not been installed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Register metric descriptions and install the Prometheus recorder.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Build`] if the histogram buckets are rejected,
    /// or [`MetricsError::Install`] if another recorder is already installed
    /// for a reason other than a previous call to this method.
    pub fn install(&mut self) -> Result<(), MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                self.handle = Some(handle);
                describe();
                tracing::info!("Prometheus metrics recorder installed");
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                if message.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(())
                } else {
                    Err(MetricsError::Install(message))
                }
            }
        }
    }

    /// Render current metrics in Prometheus text format.
    ///
    /// Returns `None` if this exporter did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register descriptions for every metric emitted by this crate.
pub fn describe() {
    describe_counter!(BOOKINGS_TOTAL, "Total number of booking attempts by outcome");
    describe_counter!(RELEASES_TOTAL, "Total number of release attempts by outcome");
    describe_counter!(STORE_SEEDS_TOTAL, "Total number of lazy store initializations");
    describe_histogram!(LEVEL_VIEW_DURATION, "Time taken to build a level view");
}

/// Outcome label attached to booking and release counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The space changed state
    Applied,
    /// The id chain did not match
    Invalid,
    /// The space was already taken
    Unavailable,
    /// The store failed
    Failed,
}

impl Outcome {
    /// Label value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Invalid => "invalid",
            Self::Unavailable => "unavailable",
            Self::Failed => "failed",
        }
    }
}

/// Booking engine metrics recorder.
pub struct BookingMetrics;

impl BookingMetrics {
    /// Record the outcome of a booking attempt.
    pub fn record_booking(outcome: Outcome) {
        counter!(BOOKINGS_TOTAL, "outcome" => outcome.as_str()).increment(1);
    }

    /// Record the outcome of a release attempt.
    pub fn record_release(outcome: Outcome) {
        counter!(RELEASES_TOTAL, "outcome" => outcome.as_str()).increment(1);
    }
}

/// View builder metrics recorder.
pub struct ViewMetrics;

impl ViewMetrics {
    /// Record a lazy store initialization.
    pub fn record_seed() {
        counter!(STORE_SEEDS_TOTAL).increment(1);
    }

    /// Record how long a level view took to build.
    pub fn record_level_view(duration: Duration) {
        histogram!(LEVEL_VIEW_DURATION).record(duration.as_secs_f64());
    }
}

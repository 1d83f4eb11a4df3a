//! Observability for the prediction pipeline
//!
//! Provides:
//! - Prometheus metrics (submissions, failures by class, stale responses, inference latency)
//! - Structured logging with tracing

use crate::predictor::ConservationStatusEntry;
use crate::error::FailureClass;
use crate::models::PredictionKind;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Histogram buckets for remote inference latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<PredictorMetricsInner> = OnceLock::new();

struct PredictorMetricsInner {
    submissions_accepted: IntCounterVec,
    validation_rejections: IntCounterVec,
    predictions_succeeded: IntCounterVec,
    predictions_failed: IntCounterVec,
    stale_responses: IntCounterVec,
    inference_latency_seconds: HistogramVec,
}

impl PredictorMetricsInner {
    fn new() -> Self {
        Self {
            submissions_accepted: register_int_counter_vec!(
                "wildlife_predictor_submissions_accepted_total",
                "Submissions that passed validation",
                &["kind"]
            )
            .expect("Failed to register submissions_accepted"),

            validation_rejections: register_int_counter_vec!(
                "wildlife_predictor_validation_rejections_total",
                "Submissions blocked by profile validation",
                &["kind"]
            )
            .expect("Failed to register validation_rejections"),

            predictions_succeeded: register_int_counter_vec!(
                "wildlife_predictor_predictions_succeeded_total",
                "Inference calls that produced a result",
                &["kind"]
            )
            .expect("Failed to register predictions_succeeded"),

            predictions_failed: register_int_counter_vec!(
                "wildlife_predictor_predictions_failed_total",
                "Inference calls that failed, by failure class",
                &["kind", "class"]
            )
            .expect("Failed to register predictions_failed"),

            stale_responses: register_int_counter_vec!(
                "wildlife_predictor_stale_responses_total",
                "Resolved responses discarded because a newer submission superseded them",
                &["kind"]
            )
            .expect("Failed to register stale_responses"),

            inference_latency_seconds: register_histogram_vec!(
                "wildlife_predictor_inference_latency_seconds",
                "Round-trip time of remote inference calls",
                &["kind"],
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register inference_latency_seconds"),
        }
    }
}

/// Pipeline metrics for Prometheus exposition
///
/// Lightweight handle to the global metrics instance; clones share the
/// same underlying metrics.
#[derive(Clone)]
pub struct PredictorMetrics {
    _private: (),
}

impl Default for PredictorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictorMetrics {
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(PredictorMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &PredictorMetricsInner {
        GLOBAL_METRICS.get_or_init(PredictorMetricsInner::new)
    }

    pub fn inc_submissions_accepted(&self, kind: PredictionKind) {
        self.inner()
            .submissions_accepted
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn inc_validation_rejections(&self, kind: PredictionKind) {
        self.inner()
            .validation_rejections
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn inc_predictions_succeeded(&self, kind: PredictionKind) {
        self.inner()
            .predictions_succeeded
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn inc_predictions_failed(&self, kind: PredictionKind, class: FailureClass) {
        self.inner()
            .predictions_failed
            .with_label_values(&[kind.as_str(), class.as_str()])
            .inc();
    }

    pub fn inc_stale_responses(&self, kind: PredictionKind) {
        self.inner()
            .stale_responses
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn observe_inference_latency(&self, kind: PredictionKind, duration_secs: f64) {
        self.inner()
            .inference_latency_seconds
            .with_label_values(&[kind.as_str()])
            .observe(duration_secs);
    }

    pub fn stale_responses(&self, kind: PredictionKind) -> u64 {
        self.inner()
            .stale_responses
            .with_label_values(&[kind.as_str()])
            .get()
    }

    /// Render every registered metric in the Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if encoder.encode(&prometheus::gather(), &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}

/// Structured logger for submission lifecycle events
#[derive(Clone)]
pub struct StructuredLogger {
    kind: PredictionKind,
}

impl StructuredLogger {
    pub fn new(kind: PredictionKind) -> Self {
        Self { kind }
    }

    pub fn log_submission(&self, ticket: u64, species: &str) {
        debug!(
            event = "submission_accepted",
            kind = %self.kind,
            ticket = ticket,
            species = %species,
            "Submission accepted"
        );
    }

    pub fn log_validation_rejected(&self, violations: usize) {
        info!(
            event = "validation_rejected",
            kind = %self.kind,
            violations = violations,
            "Profile rejected before submission"
        );
    }

    pub fn log_lifespan(&self, ticket: u64, years: f64) {
        info!(
            event = "prediction_generated",
            kind = %self.kind,
            ticket = ticket,
            predicted_years = years,
            "Generated lifespan prediction"
        );
    }

    pub fn log_conservation(
        &self,
        ticket: u64,
        status_code: i64,
        probability_endangered: f64,
        entry: &ConservationStatusEntry,
    ) {
        info!(
            event = "prediction_generated",
            kind = %self.kind,
            ticket = ticket,
            status_code = status_code,
            status = %entry.status,
            curated = entry.curated,
            probability_endangered = probability_endangered,
            "Generated conservation status prediction"
        );
        if !entry.curated {
            warn!(
                event = "uncurated_status_code",
                kind = %self.kind,
                status_code = status_code,
                "Model returned a status code with no curated entry"
            );
        }
    }

    pub fn log_failure(&self, ticket: u64, class: FailureClass, status: Option<u16>, error: &str) {
        warn!(
            event = "prediction_failed",
            kind = %self.kind,
            ticket = ticket,
            class = class.as_str(),
            http_status = ?status,
            error = %error,
            "Prediction failed"
        );
    }

    pub fn log_stale(&self, ticket: u64, latest: u64) {
        debug!(
            event = "stale_response_discarded",
            kind = %self.kind,
            ticket = ticket,
            latest_ticket = latest,
            "Discarded response from a superseded submission"
        );
    }
}

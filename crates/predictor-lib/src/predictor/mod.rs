//! Prediction pipeline: projection, remote inference, classification

mod classifier;
mod client;
mod controller;
mod features;

pub use classifier::{
    classify, ConservationStatus, ConservationStatusEntry, SeverityColor, FALLBACK_DESCRIPTION,
};
pub use client::{InferenceClient, API_KEY_HEADER};
pub use controller::{
    FailureNotice, PredictionOutcome, Resolution, SubmissionController, SubmissionState, Ticket,
};
pub use features::{
    project_conservation, project_lifespan, ConservationFeatureRecord, LifespanFeatureRecord,
    ASSUMED_ENDANGERED_INDICATOR, CONSERVATION_COLUMNS, LIFESPAN_COLUMNS,
};

use crate::error::PredictionResult;
use crate::models::{ConservationPrediction, LifespanPrediction};
use async_trait::async_trait;

/// Remote inference, one method per prediction kind.
///
/// Implementations must be stateless with respect to calls: concurrent
/// calls are independent.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict_lifespan(
        &self,
        record: &LifespanFeatureRecord,
    ) -> PredictionResult<LifespanPrediction>;

    async fn predict_conservation(
        &self,
        record: &ConservationFeatureRecord,
    ) -> PredictionResult<ConservationPrediction>;
}

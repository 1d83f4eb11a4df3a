//! Species-trait prediction library
//!
//! This crate provides the submission pipeline for the wildlife
//! prediction tools:
//! - Species profile validation
//! - Feature projection for the lifespan and conservation models
//! - Authenticated calls to the remote inference service
//! - Conservation status classification
//! - Per-tool submission lifecycle with stale-response protection

pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod validation;

pub use config::{ResolvedConfig, ServiceConfig};
pub use error::{ConfigError, FailureClass, PredictionError, PredictionResult};
pub use models::*;
pub use observability::{PredictorMetrics, StructuredLogger};
pub use predictor::{
    classify, InferenceClient, PredictionOutcome, PredictionService, Resolution,
    SubmissionController, SubmissionState,
};
pub use validation::{validate, RawProfile, ValidationErrors};

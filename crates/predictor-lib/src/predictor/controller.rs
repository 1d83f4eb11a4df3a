//! Submission lifecycle for one prediction tool
//!
//! Orchestrates validate → project → call → classify and owns the displayed
//! state. Each resolved call is applied only if it belongs to the most recent
//! submission; older responses are discarded.

use super::classifier::{classify, ConservationStatusEntry};
use super::features::{project_conservation, project_lifespan};
use super::PredictionService;
use crate::error::{FailureClass, PredictionError, PredictionResult};
use crate::models::{ConservationPrediction, LifespanPrediction, PredictionKind, SpeciesProfile};
use crate::observability::{PredictorMetrics, StructuredLogger};
use crate::validation::{validate, RawProfile, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Identifies one accepted submission; later submissions get larger tickets
pub type Ticket = u64;

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PredictionOutcome {
    Lifespan(LifespanPrediction),
    Conservation {
        prediction: ConservationPrediction,
        entry: ConservationStatusEntry,
    },
}

/// User-facing failure notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureNotice {
    pub class: FailureClass,
    pub status: Option<u16>,
    pub message: String,
}

impl FailureNotice {
    fn from_error(err: &PredictionError) -> Self {
        Self {
            class: err.class(),
            status: err.status(),
            message: format!("Failed to generate prediction: {}. Please try again.", err),
        }
    }
}

/// What the tool currently displays
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SubmissionState {
    Idle,
    Pending {
        ticket: Ticket,
    },
    Succeeded {
        ticket: Ticket,
        outcome: PredictionOutcome,
        completed_at: DateTime<Utc>,
    },
    Failed {
        ticket: Ticket,
        notice: FailureNotice,
    },
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending { .. })
    }

    pub fn ticket(&self) -> Option<Ticket> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::Pending { ticket }
            | SubmissionState::Succeeded { ticket, .. }
            | SubmissionState::Failed { ticket, .. } => Some(*ticket),
        }
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        match self {
            SubmissionState::Succeeded { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn notice(&self) -> Option<&FailureNotice> {
        match self {
            SubmissionState::Failed { notice, .. } => Some(notice),
            _ => None,
        }
    }
}

/// How a resolved call was handled
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The call was the latest submission; carries the new state
    Applied(SubmissionState),
    /// A newer submission started first; state was left untouched
    Superseded { ticket: Ticket, latest: Ticket },
}

#[derive(Debug)]
struct ControllerState {
    latest: Ticket,
    current: SubmissionState,
}

/// Controller for one tool instance (lifespan or conservation)
pub struct SubmissionController<S: ?Sized> {
    kind: PredictionKind,
    service: Arc<S>,
    state: RwLock<ControllerState>,
    metrics: PredictorMetrics,
    logger: StructuredLogger,
}

impl<S: PredictionService + ?Sized> SubmissionController<S> {
    pub fn new(kind: PredictionKind, service: Arc<S>) -> Self {
        Self {
            kind,
            service,
            state: RwLock::new(ControllerState {
                latest: 0,
                current: SubmissionState::Idle,
            }),
            metrics: PredictorMetrics::new(),
            logger: StructuredLogger::new(kind),
        }
    }

    pub fn kind(&self) -> PredictionKind {
        self.kind
    }

    /// Snapshot of the displayed state
    pub async fn state(&self) -> SubmissionState {
        self.state.read().await.current.clone()
    }

    /// Validate and move to Pending under a fresh ticket.
    ///
    /// Invalid input leaves the state untouched.
    pub async fn begin(
        &self,
        raw: &RawProfile,
    ) -> Result<(Ticket, SpeciesProfile), ValidationErrors> {
        let profile = match validate(raw) {
            Ok(p) => p,
            Err(errors) => {
                self.metrics.inc_validation_rejections(self.kind);
                self.logger.log_validation_rejected(errors.len());
                return Err(errors);
            }
        };

        let mut state = self.state.write().await;
        state.latest += 1;
        let ticket = state.latest;
        state.current = SubmissionState::Pending { ticket };
        drop(state);

        self.metrics.inc_submissions_accepted(self.kind);
        self.logger.log_submission(ticket, &profile.species);
        Ok((ticket, profile))
    }

    /// Apply a resolved call if `ticket` is still the latest submission
    pub async fn complete(
        &self,
        ticket: Ticket,
        result: PredictionResult<PredictionOutcome>,
    ) -> Resolution {
        let mut state = self.state.write().await;
        if ticket != state.latest {
            let latest = state.latest;
            drop(state);
            self.metrics.inc_stale_responses(self.kind);
            self.logger.log_stale(ticket, latest);
            return Resolution::Superseded { ticket, latest };
        }

        state.current = match result {
            Ok(outcome) => {
                self.metrics.inc_predictions_succeeded(self.kind);
                match &outcome {
                    PredictionOutcome::Lifespan(p) => self.logger.log_lifespan(ticket, p.years),
                    PredictionOutcome::Conservation { prediction, entry } => {
                        self.logger.log_conservation(
                            ticket,
                            prediction.status_code,
                            prediction.probability_endangered,
                            entry,
                        )
                    }
                }
                SubmissionState::Succeeded {
                    ticket,
                    outcome,
                    completed_at: Utc::now(),
                }
            }
            Err(err) => {
                let notice = FailureNotice::from_error(&err);
                self.metrics.inc_predictions_failed(self.kind, notice.class);
                self.logger
                    .log_failure(ticket, notice.class, notice.status, &err.to_string());
                SubmissionState::Failed { ticket, notice }
            }
        };

        Resolution::Applied(state.current.clone())
    }

    /// Run one submission end to end
    pub async fn submit(&self, raw: &RawProfile) -> Result<Resolution, ValidationErrors> {
        let (ticket, profile) = self.begin(raw).await?;

        let start = Instant::now();
        let result = self.run(&profile).await;
        self.metrics
            .observe_inference_latency(self.kind, start.elapsed().as_secs_f64());

        Ok(self.complete(ticket, result).await)
    }

    /// Return to Idle; responses still in flight become stale
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.latest += 1;
        state.current = SubmissionState::Idle;
    }

    async fn run(&self, profile: &SpeciesProfile) -> PredictionResult<PredictionOutcome> {
        match self.kind {
            PredictionKind::Lifespan => {
                let record = project_lifespan(profile);
                let prediction = self.service.predict_lifespan(&record).await?;
                Ok(PredictionOutcome::Lifespan(prediction))
            }
            PredictionKind::Conservation => {
                let record = project_conservation(profile);
                let prediction = self.service.predict_conservation(&record).await?;
                let entry = classify(prediction.status_code);
                Ok(PredictionOutcome::Conservation { prediction, entry })
            }
        }
    }
}

//! Prediction commands

use anyhow::{anyhow, Context, Result};
use predictor_lib::{
    validate, InferenceClient, PredictionKind, PredictionOutcome, RawProfile, Resolution, ServiceConfig,
    SubmissionController, SubmissionState,
};
use std::sync::Arc;
use tabled::Tabled;
use tracing::debug;

use crate::output::{
    color_probability, color_status, format_years, print_error, print_json, print_success,
    print_table, print_violations, OutputFormat,
};

#[derive(Tabled)]
struct LifespanRow {
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Predicted Lifespan")]
    lifespan: String,
}

#[derive(Tabled)]
struct ConservationRow {
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Probability Endangered")]
    probability: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Run one prediction tool end to end.
///
/// The profile is checked before any service settings are loaded, so an
/// invalid profile is reported the same way with or without a configured
/// service.
pub async fn run_prediction<F>(
    kind: PredictionKind,
    raw: &RawProfile,
    load_settings: F,
    format: OutputFormat,
) -> Result<()>
where
    F: FnOnce() -> Result<ServiceConfig>,
{
    if let Err(errors) = validate(raw) {
        print_violations(&errors, format)?;
        return Err(anyhow!("Profile has {} invalid field(s)", errors.len()));
    }

    let resolved = load_settings()?
        .resolve()
        .context("Inference service is not configured")?;
    let client = InferenceClient::new(&resolved)?;
    let base_url = client.base_url().to_string();
    let controller = SubmissionController::new(kind, Arc::new(client));
    debug!(
        base_url = %base_url,
        kind = %controller.kind(),
        "Using inference service"
    );

    let resolution = match controller.submit(raw).await {
        Ok(resolution) => resolution,
        Err(errors) => {
            print_violations(&errors, format)?;
            return Err(anyhow!("Profile has {} invalid field(s)", errors.len()));
        }
    };

    let state = match resolution {
        Resolution::Applied(state) => state,
        Resolution::Superseded { ticket, latest } => {
            return Err(anyhow!(
                "Submission {} was superseded by submission {}",
                ticket,
                latest
            ));
        }
    };

    if let OutputFormat::Json = format {
        print_json(&state)?;
        return match state.notice() {
            Some(notice) => Err(anyhow!(notice.message.clone())),
            None => Ok(()),
        };
    }

    let species = raw
        .species
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    match state {
        SubmissionState::Succeeded {
            outcome,
            completed_at,
            ..
        } => {
            print_outcome(species, &outcome);
            debug!(completed_at = %completed_at.to_rfc3339(), "Prediction completed");
            Ok(())
        }
        SubmissionState::Failed { notice, .. } => {
            print_error(&notice.message);
            Err(anyhow!("Prediction failed ({})", notice.class.as_str()))
        }
        other => {
            let reason = if other.is_pending() {
                "Prediction did not complete"
            } else {
                "No prediction was submitted"
            };
            Err(anyhow!(reason))
        }
    }
}

fn print_outcome(species: String, outcome: &PredictionOutcome) {
    match outcome {
        PredictionOutcome::Lifespan(prediction) => {
            print_table(vec![LifespanRow {
                species,
                lifespan: format_years(prediction.years),
            }]);
            print_success("Lifespan prediction generated");
        }
        PredictionOutcome::Conservation { prediction, entry } => {
            print_table(vec![ConservationRow {
                species,
                status: color_status(entry),
                probability: color_probability(prediction.probability_endangered),
                description: entry.description.clone(),
            }]);
            print_success("Conservation status prediction generated");
        }
    }
}

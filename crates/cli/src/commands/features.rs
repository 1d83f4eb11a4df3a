//! Feature projection preview

use anyhow::{anyhow, Result};
use predictor_lib::predictor::{
    project_conservation, project_lifespan, CONSERVATION_COLUMNS, LIFESPAN_COLUMNS,
};
use predictor_lib::{validate, PredictionKind, RawProfile};
use serde_json::Value;
use tabled::Tabled;

use crate::output::{print_table, print_violations, OutputFormat};

#[derive(Tabled)]
struct FeatureRow {
    #[tabled(rename = "Column")]
    column: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Validate a profile and show the record a prediction would send.
///
/// Never contacts the inference service.
pub fn show_features(kind: PredictionKind, raw: &RawProfile, format: OutputFormat) -> Result<()> {
    let profile = match validate(raw) {
        Ok(profile) => profile,
        Err(errors) => {
            print_violations(&errors, format)?;
            return Err(anyhow!("Profile has {} invalid field(s)", errors.len()));
        }
    };

    let (body, columns) = match kind {
        PredictionKind::Lifespan => (
            serde_json::to_string_pretty(&project_lifespan(&profile))?,
            LIFESPAN_COLUMNS.to_vec(),
        ),
        PredictionKind::Conservation => (
            serde_json::to_string_pretty(&project_conservation(&profile))?,
            CONSERVATION_COLUMNS.to_vec(),
        ),
    };

    match format {
        OutputFormat::Json => println!("{}", body),
        OutputFormat::Table => {
            let values: Value = serde_json::from_str(&body)?;
            let rows = columns
                .iter()
                .map(|column| FeatureRow {
                    column: *column,
                    value: values[*column].to_string(),
                })
                .collect();
            print_table::<FeatureRow>(rows);
        }
    }

    Ok(())
}

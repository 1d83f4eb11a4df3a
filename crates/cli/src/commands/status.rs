//! Status lookup command

use anyhow::Result;
use predictor_lib::classify;
use tabled::Tabled;

use crate::output::{color_status, print_json, print_table, print_warning, OutputFormat};

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Code")]
    code: i64,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Show the classification of a raw model status code
pub fn show_status(code: i64, format: OutputFormat) -> Result<()> {
    let entry = classify(code);

    match format {
        OutputFormat::Json => print_json(&entry)?,
        OutputFormat::Table => {
            print_table(vec![StatusRow {
                code,
                status: color_status(&entry),
                description: entry.description.clone(),
            }]);
            if !entry.curated {
                print_warning("No curated entry exists for this code");
            }
        }
    }

    Ok(())
}

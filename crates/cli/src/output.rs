//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use predictor_lib::predictor::{ConservationStatusEntry, SeverityColor};
use predictor_lib::validation::ValidationErrors;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print rows as a rounded table
pub fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print every field violation, one per line
pub fn print_violations(errors: &ValidationErrors, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(errors),
        OutputFormat::Table => {
            for violation in errors.iter() {
                print_error(&format!("{}: {}", violation.field.name(), violation.message));
            }
            Ok(())
        }
    }
}

/// Format a lifespan estimate
pub fn format_years(years: f64) -> String {
    format!("{:.1} years", years)
}

/// Format a probability as a percentage with one decimal
pub fn format_probability(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Color a status label by its severity
pub fn color_status(entry: &ConservationStatusEntry) -> String {
    match entry.color {
        SeverityColor::Blue => entry.status.blue().bold().to_string(),
        SeverityColor::Orange => entry.status.truecolor(255, 140, 0).bold().to_string(),
        SeverityColor::Gray => entry.status.bright_black().to_string(),
    }
}

/// Color a probability: higher endangerment reads warmer
pub fn color_probability(probability: f64) -> String {
    let formatted = format_probability(probability);
    if probability >= 0.5 {
        formatted.red().to_string()
    } else if probability >= 0.25 {
        formatted.yellow().to_string()
    } else {
        formatted.green().to_string()
    }
}

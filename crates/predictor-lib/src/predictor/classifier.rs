//! Conservation status classification
//!
//! Maps the conservation model's raw integer output to a display entry.
//! Only two codes are curated today; the remote model may emit others, so
//! every unknown code gets a synthesized fallback entry instead of an error.

use serde::Serialize;
use std::fmt;

/// Description shown when no curated entry exists for a code
pub const FALLBACK_DESCRIPTION: &str = "This prediction is based on available data and \
statistical models. The actual conservation status may vary.";

/// Severity color token for a status entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Blue,
    Orange,
    /// Used for codes without a curated entry
    Gray,
}

impl SeverityColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityColor::Blue => "blue",
            SeverityColor::Orange => "orange",
            SeverityColor::Gray => "gray",
        }
    }
}

impl fmt::Display for SeverityColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Curated conservation statuses, keyed by model output code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConservationStatus {
    NotEndangered,
    Endangered,
}

impl ConservationStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ConservationStatus::NotEndangered),
            1 => Some(ConservationStatus::Endangered),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            ConservationStatus::NotEndangered => 0,
            ConservationStatus::Endangered => 1,
        }
    }

    fn entry(&self) -> ConservationStatusEntry {
        match self {
            ConservationStatus::NotEndangered => ConservationStatusEntry {
                status: "Not Endangered".to_string(),
                color: SeverityColor::Blue,
                description: "Species may or may not be at risk of extinction in the wild."
                    .to_string(),
                curated: true,
            },
            ConservationStatus::Endangered => ConservationStatusEntry {
                status: "Endangered".to_string(),
                color: SeverityColor::Orange,
                description: "Species is at very high risk of extinction in the wild.".to_string(),
                curated: true,
            },
        }
    }
}

/// Display record for one status code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConservationStatusEntry {
    pub status: String,
    pub color: SeverityColor,
    pub description: String,
    /// False for synthesized fallback entries
    pub curated: bool,
}

/// Classify a raw status code. Total: every code yields a populated entry.
pub fn classify(code: i64) -> ConservationStatusEntry {
    match ConservationStatus::from_code(code) {
        Some(status) => status.entry(),
        None => ConservationStatusEntry {
            status: format!("Status Level: {}", code),
            color: SeverityColor::Gray,
            description: FALLBACK_DESCRIPTION.to_string(),
            curated: false,
        },
    }
}

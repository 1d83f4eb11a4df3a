//! Core data models for the species-trait prediction pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dietary class of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diet {
    Carnivore,
    Other,
}

impl Diet {
    pub const ALLOWED: [&'static str; 2] = ["Carnivore", "Other"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Diet::Carnivore => "Carnivore",
            Diet::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Carnivore" => Some(Diet::Carnivore),
            "Other" => Some(Diet::Other),
            _ => None,
        }
    }
}

/// Primary habitat of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Habitat {
    Oceans,
    #[serde(rename = "Not Oceans")]
    NotOceans,
}

impl Habitat {
    pub const ALLOWED: [&'static str; 2] = ["Oceans", "Not Oceans"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Habitat::Oceans => "Oceans",
            Habitat::NotOceans => "Not Oceans",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Oceans" => Some(Habitat::Oceans),
            "Not Oceans" => Some(Habitat::NotOceans),
            _ => None,
        }
    }
}

/// Social organisation of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialStructure {
    Solitary,
    #[serde(rename = "Group-based")]
    GroupBased,
}

impl SocialStructure {
    pub const ALLOWED: [&'static str; 2] = ["Solitary", "Group-based"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialStructure::Solitary => "Solitary",
            SocialStructure::GroupBased => "Group-based",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Solitary" => Some(SocialStructure::Solitary),
            "Group-based" => Some(SocialStructure::GroupBased),
            _ => None,
        }
    }
}

/// Validated biological profile of one species.
///
/// Only produced by [`crate::validation::validate`], so every numeric field
/// is finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesProfile {
    pub species: String,
    /// Height in centimetres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Gestation period in days
    pub gestation_period: f64,
    /// Top speed in km/h
    pub top_speed: f64,
    pub offspring_per_birth: f64,
    pub diet: Diet,
    pub habitat: Habitat,
    pub social_structure: SocialStructure,
}

/// Which remote model a submission targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionKind {
    Lifespan,
    Conservation,
}

impl PredictionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionKind::Lifespan => "lifespan",
            PredictionKind::Conservation => "conservation",
        }
    }

    /// Endpoint path relative to the configured base address
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            PredictionKind::Lifespan => "predict/lifespan",
            PredictionKind::Conservation => "predict/conservation",
        }
    }
}

impl fmt::Display for PredictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifespan model output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifespanPrediction {
    /// Expected lifespan in years, never negative
    pub years: f64,
}

/// Conservation model output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConservationPrediction {
    /// Raw categorical code, interpreted by the classifier
    pub status_code: i64,
    /// Probability in [0, 1] that the species is endangered
    pub probability_endangered: f64,
}

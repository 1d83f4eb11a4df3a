//! Feature projection for the remote models
//!
//! Maps a validated [`SpeciesProfile`] onto the flat input record each remote
//! model was trained on. The two models use different column names and
//! feature sets, so each gets its own record type.
//!
//! Column names and order must match the trained models exactly. A mismatch
//! does not fail locally; the service silently mispredicts. Keep
//! [`LIFESPAN_COLUMNS`] and [`CONSERVATION_COLUMNS`] in lockstep with the
//! training pipeline.

use crate::models::{Diet, Habitat, SocialStructure, SpeciesProfile};
use serde::Serialize;

/// Lifespan model input columns, in serialization order
pub const LIFESPAN_COLUMNS: [&str; 9] = [
    "Height_high",
    "Weight_high",
    "GP_high",
    "Top Spe_high",
    "OPB_high",
    "Diet_Carnivore",
    "Habitat_Oceans",
    "Conservation Status_Endangered",
    "Social Structure_Group-based",
];

/// Conservation model input columns, in serialization order
pub const CONSERVATION_COLUMNS: [&str; 8] = [
    "Height (cm)",
    "Weight (kg)",
    "Gestation Period (days)",
    "Top Speed (km/h)",
    "Offspring per Birth",
    "Diet_Carnivore",
    "Habitat_Oceans",
    "Social Structure_Group-based",
];

/// Value of the lifespan model's conservation-status indicator.
///
/// The lifespan model expects an endangered-status column but the form never
/// asks for it, so every request sends 1. Pending product clarification on
/// whether the model was trained only on endangered rows.
pub const ASSUMED_ENDANGERED_INDICATOR: u8 = 1;

/// Input record for `predict/lifespan`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifespanFeatureRecord {
    #[serde(rename = "Height_high")]
    pub height: f64,
    #[serde(rename = "Weight_high")]
    pub weight: f64,
    #[serde(rename = "GP_high")]
    pub gestation_period: f64,
    #[serde(rename = "Top Spe_high")]
    pub top_speed: f64,
    #[serde(rename = "OPB_high")]
    pub offspring_per_birth: f64,
    #[serde(rename = "Diet_Carnivore")]
    pub diet_carnivore: u8,
    #[serde(rename = "Habitat_Oceans")]
    pub habitat_oceans: u8,
    #[serde(rename = "Conservation Status_Endangered")]
    pub conservation_status_endangered: u8,
    #[serde(rename = "Social Structure_Group-based")]
    pub social_structure_group_based: u8,
}

/// Input record for `predict/conservation`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConservationFeatureRecord {
    #[serde(rename = "Height (cm)")]
    pub height_cm: f64,
    #[serde(rename = "Weight (kg)")]
    pub weight_kg: f64,
    #[serde(rename = "Gestation Period (days)")]
    pub gestation_period_days: f64,
    #[serde(rename = "Top Speed (km/h)")]
    pub top_speed_kmh: f64,
    #[serde(rename = "Offspring per Birth")]
    pub offspring_per_birth: f64,
    #[serde(rename = "Diet_Carnivore")]
    pub diet_carnivore: u8,
    #[serde(rename = "Habitat_Oceans")]
    pub habitat_oceans: u8,
    #[serde(rename = "Social Structure_Group-based")]
    pub social_structure_group_based: u8,
}

impl From<&SpeciesProfile> for LifespanFeatureRecord {
    fn from(profile: &SpeciesProfile) -> Self {
        Self {
            height: profile.height,
            weight: profile.weight,
            gestation_period: profile.gestation_period,
            top_speed: profile.top_speed,
            offspring_per_birth: profile.offspring_per_birth,
            diet_carnivore: diet_indicator(profile.diet),
            habitat_oceans: habitat_indicator(profile.habitat),
            conservation_status_endangered: ASSUMED_ENDANGERED_INDICATOR,
            social_structure_group_based: social_indicator(profile.social_structure),
        }
    }
}

impl From<&SpeciesProfile> for ConservationFeatureRecord {
    fn from(profile: &SpeciesProfile) -> Self {
        Self {
            height_cm: profile.height,
            weight_kg: profile.weight,
            gestation_period_days: profile.gestation_period,
            top_speed_kmh: profile.top_speed,
            offspring_per_birth: profile.offspring_per_birth,
            diet_carnivore: diet_indicator(profile.diet),
            habitat_oceans: habitat_indicator(profile.habitat),
            social_structure_group_based: social_indicator(profile.social_structure),
        }
    }
}

/// Project a profile onto the lifespan model's columns
pub fn project_lifespan(profile: &SpeciesProfile) -> LifespanFeatureRecord {
    LifespanFeatureRecord::from(profile)
}

/// Project a profile onto the conservation model's columns
pub fn project_conservation(profile: &SpeciesProfile) -> ConservationFeatureRecord {
    ConservationFeatureRecord::from(profile)
}

fn diet_indicator(diet: Diet) -> u8 {
    u8::from(diet == Diet::Carnivore)
}

fn habitat_indicator(habitat: Habitat) -> u8 {
    u8::from(habitat == Habitat::Oceans)
}

fn social_indicator(social: SocialStructure) -> u8 {
    u8::from(social == SocialStructure::GroupBased)
}

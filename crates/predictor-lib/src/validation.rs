//! Species profile validation
//!
//! Turns raw user input (text fields, optional selections) into a
//! [`SpeciesProfile`], or into the full set of field-level violations.
//! Both prediction tools share this rule set.

use crate::models::{Diet, Habitat, SocialStructure, SpeciesProfile};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Minimum species name length after trimming
pub const MIN_SPECIES_NAME_LEN: usize = 2;

/// Unvalidated profile as entered by a user.
///
/// Numeric fields hold the entered text; a JSON document may supply them as
/// numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub weight: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub gestation_period: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub top_speed: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub offspring_per_birth: Option<String>,
    #[serde(default)]
    pub diet: Option<String>,
    #[serde(default)]
    pub habitat: Option<String>,
    #[serde(default)]
    pub social_structure: Option<String>,
}

impl RawProfile {
    /// Fill every unset field of `self` from `fallback`
    pub fn or(self, fallback: RawProfile) -> RawProfile {
        RawProfile {
            species: self.species.or(fallback.species),
            height: self.height.or(fallback.height),
            weight: self.weight.or(fallback.weight),
            gestation_period: self.gestation_period.or(fallback.gestation_period),
            top_speed: self.top_speed.or(fallback.top_speed),
            offspring_per_birth: self.offspring_per_birth.or(fallback.offspring_per_birth),
            diet: self.diet.or(fallback.diet),
            habitat: self.habitat.or(fallback.habitat),
            social_structure: self.social_structure.or(fallback.social_structure),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(f64),
    }

    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|v| match v {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }),
    )
}

/// Profile fields, named as the input form names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Species,
    Height,
    Weight,
    GestationPeriod,
    TopSpeed,
    OffspringPerBirth,
    Diet,
    Habitat,
    SocialStructure,
}

impl ProfileField {
    pub fn name(&self) -> &'static str {
        match self {
            ProfileField::Species => "species",
            ProfileField::Height => "height",
            ProfileField::Weight => "weight",
            ProfileField::GestationPeriod => "gestationPeriod",
            ProfileField::TopSpeed => "topSpeed",
            ProfileField::OffspringPerBirth => "offspringPerBirth",
            ProfileField::Diet => "diet",
            ProfileField::Habitat => "habitat",
            ProfileField::SocialStructure => "socialStructure",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ProfileField::Species => "Species name",
            ProfileField::Height => "Height",
            ProfileField::Weight => "Weight",
            ProfileField::GestationPeriod => "Gestation period",
            ProfileField::TopSpeed => "Top speed",
            ProfileField::OffspringPerBirth => "Number of offspring",
            ProfileField::Diet => "diet type",
            ProfileField::Habitat => "habitat type",
            ProfileField::SocialStructure => "social structure",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What is wrong with a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Nothing was entered or selected
    Required,
    TooShort { min: usize },
    NotANumber,
    NotPositive,
    InvalidChoice { allowed: Vec<&'static str> },
}

/// A single field-scoped validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: ProfileField,
    #[serde(flatten)]
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    fn new(field: ProfileField, kind: ViolationKind) -> Self {
        let message = match &kind {
            ViolationKind::Required => match field {
                ProfileField::Diet | ProfileField::Habitat | ProfileField::SocialStructure => {
                    format!("Please select a {}.", field.label())
                }
                _ => format!("{} is required.", field.label()),
            },
            ViolationKind::TooShort { min } => {
                format!("{} must be at least {} characters.", field.label(), min)
            }
            ViolationKind::NotANumber => format!("{} must be a number.", field.label()),
            ViolationKind::NotPositive => format!("{} must be a positive number.", field.label()),
            ViolationKind::InvalidChoice { allowed } => format!(
                "Please select a valid {}: one of {}.",
                field.label(),
                allowed.join(", ")
            ),
        };
        Self {
            field,
            kind,
            message,
        }
    }
}

/// Every violation found in one raw profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.violations.iter()
    }

    /// First violation recorded for a field, if any
    pub fn for_field(&self, field: ProfileField) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.violations.len())?;
        for (i, v) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", sep, v.field, v.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a raw profile.
///
/// Pure and synchronous. Collects every violation rather than stopping at the
/// first, so a caller can report all of them at once.
pub fn validate(raw: &RawProfile) -> Result<SpeciesProfile, ValidationErrors> {
    let mut violations = Vec::new();

    let species = check_species(raw.species.as_deref(), &mut violations);
    let height = check_positive(ProfileField::Height, raw.height.as_deref(), &mut violations);
    let weight = check_positive(ProfileField::Weight, raw.weight.as_deref(), &mut violations);
    let gestation_period = check_positive(
        ProfileField::GestationPeriod,
        raw.gestation_period.as_deref(),
        &mut violations,
    );
    let top_speed = check_positive(ProfileField::TopSpeed, raw.top_speed.as_deref(), &mut violations);
    let offspring_per_birth = check_positive(
        ProfileField::OffspringPerBirth,
        raw.offspring_per_birth.as_deref(),
        &mut violations,
    );
    let diet = check_choice(
        ProfileField::Diet,
        raw.diet.as_deref(),
        &Diet::ALLOWED,
        Diet::from_label,
        &mut violations,
    );
    let habitat = check_choice(
        ProfileField::Habitat,
        raw.habitat.as_deref(),
        &Habitat::ALLOWED,
        Habitat::from_label,
        &mut violations,
    );
    let social_structure = check_choice(
        ProfileField::SocialStructure,
        raw.social_structure.as_deref(),
        &SocialStructure::ALLOWED,
        SocialStructure::from_label,
        &mut violations,
    );

    match (
        species,
        height,
        weight,
        gestation_period,
        top_speed,
        offspring_per_birth,
        diet,
        habitat,
        social_structure,
    ) {
        (
            Some(species),
            Some(height),
            Some(weight),
            Some(gestation_period),
            Some(top_speed),
            Some(offspring_per_birth),
            Some(diet),
            Some(habitat),
            Some(social_structure),
        ) if violations.is_empty() => Ok(SpeciesProfile {
            species,
            height,
            weight,
            gestation_period,
            top_speed,
            offspring_per_birth,
            diet,
            habitat,
            social_structure,
        }),
        _ => Err(ValidationErrors { violations }),
    }
}

fn check_species(input: Option<&str>, violations: &mut Vec<FieldViolation>) -> Option<String> {
    let trimmed = input.map(str::trim).unwrap_or_default();
    if trimmed.chars().count() < MIN_SPECIES_NAME_LEN {
        violations.push(FieldViolation::new(
            ProfileField::Species,
            ViolationKind::TooShort {
                min: MIN_SPECIES_NAME_LEN,
            },
        ));
        return None;
    }
    Some(trimmed.to_string())
}

fn check_positive(
    field: ProfileField,
    input: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<f64> {
    let text = match input.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => {
            violations.push(FieldViolation::new(field, ViolationKind::Required));
            return None;
        }
    };

    let value = match text.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            violations.push(FieldViolation::new(field, ViolationKind::NotANumber));
            return None;
        }
    };

    if value <= 0.0 {
        violations.push(FieldViolation::new(field, ViolationKind::NotPositive));
        return None;
    }
    Some(value)
}

fn check_choice<T>(
    field: ProfileField,
    input: Option<&str>,
    allowed: &[&'static str],
    parse: fn(&str) -> Option<T>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    let label = match input.map(str::trim) {
        Some(l) if !l.is_empty() => l,
        _ => {
            violations.push(FieldViolation::new(field, ViolationKind::Required));
            return None;
        }
    };

    let parsed = parse(label);
    if parsed.is_none() {
        violations.push(FieldViolation::new(
            field,
            ViolationKind::InvalidChoice {
                allowed: allowed.to_vec(),
            },
        ));
    }
    parsed
}

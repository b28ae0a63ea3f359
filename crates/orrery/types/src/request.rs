//! Planet submission as sent over the wire

use crate::error::ValidationError;
use crate::planet::{PlanetDraft, PlanetKind};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/planets`
///
/// Every field is optional on the wire so that a missing value surfaces as a
/// [`ValidationError`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet_name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub atmosphere: Vec<String>,
    #[serde(default)]
    pub has_water: bool,
}

impl CreatePlanetRequest {
    /// Validate into a draft ready for the store
    pub fn validate(&self) -> Result<PlanetDraft, ValidationError> {
        let pseudo = required_text(&self.pseudo, "pseudo")?;
        let name = required_text(&self.planet_name, "planetName")?;
        let kind = required_text(&self.kind, "type")?;
        let size = required_number(self.size, "size")?;
        let distance = required_number(self.distance, "distance")?;
        let temperature = required_number(self.temperature, "temperature")?;

        if distance == 0.0 {
            return Err(ValidationError::Degenerate(
                "distance must be non-zero".to_string(),
            ));
        }

        let atmosphere = self
            .atmosphere
            .iter()
            .map(|gas| gas.trim())
            .filter(|gas| !gas.is_empty())
            .map(str::to_string)
            .collect();

        Ok(PlanetDraft {
            pseudo,
            name,
            kind: PlanetKind::from(kind),
            size,
            distance,
            temperature,
            atmosphere,
            has_water: self.has_water,
        })
    }
}

impl From<&PlanetDraft> for CreatePlanetRequest {
    fn from(draft: &PlanetDraft) -> Self {
        Self {
            pseudo: Some(draft.pseudo.clone()),
            planet_name: Some(draft.name.clone()),
            kind: Some(draft.kind.as_str().to_string()),
            size: Some(draft.size),
            distance: Some(draft.distance),
            temperature: Some(draft.temperature),
            atmosphere: draft.atmosphere.clone(),
            has_water: draft.has_water,
        }
    }
}

fn required_text(value: &Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn required_number(value: Option<f64>, field: &'static str) -> Result<f64, ValidationError> {
    match value {
        Some(number) if number.is_finite() => Ok(number),
        Some(_) => Err(ValidationError::NotFinite(field)),
        None => Err(ValidationError::MissingField(field)),
    }
}

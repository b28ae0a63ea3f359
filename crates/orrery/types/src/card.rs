//! Information cards for the list view

use crate::catalog::{catalog, CatalogBody};
use crate::ids::PlanetId;
use crate::planet::{hex_color, PlanetRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which collection the list view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFilter {
    /// The built-in catalog
    #[default]
    Solar,
    /// User-submitted planets
    Custom,
}

impl ListFilter {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Solar => "Solar System Planets",
            Self::Custom => "Added Planets",
        }
    }

    /// Text shown when the filter matches nothing
    pub fn empty_message(&self) -> &'static str {
        match self {
            Self::Solar => "No planets to display.",
            Self::Custom => "No planets added yet. Use the 3D view to add custom planets.",
        }
    }
}

impl fmt::Display for ListFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solar => f.write_str("solar"),
            Self::Custom => f.write_str("custom"),
        }
    }
}

impl FromStr for ListFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solar" => Ok(Self::Solar),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown list filter: {other}")),
        }
    }
}

/// Flat card describing one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetCard {
    pub id: Option<PlanetId>,
    pub name: String,
    pub kind: String,
    pub radius: f64,
    pub distance: f64,
    pub color: String,
    pub custom: bool,
}

impl From<&CatalogBody> for PlanetCard {
    fn from(body: &CatalogBody) -> Self {
        Self {
            id: None,
            name: body.name.to_string(),
            kind: body.kind.label().to_string(),
            radius: body.radius,
            distance: body.distance,
            color: hex_color(body.color),
            custom: false,
        }
    }
}

impl From<&PlanetRecord> for PlanetCard {
    fn from(record: &PlanetRecord) -> Self {
        Self {
            id: Some(record.id),
            name: record.name.clone(),
            kind: record.kind.label().to_string(),
            radius: record.size,
            distance: record.distance,
            color: hex_color(record.kind.color()),
            custom: true,
        }
    }
}

/// Cards for the given filter, in display order
pub fn cards_for(filter: ListFilter, custom: &[PlanetRecord]) -> Vec<PlanetCard> {
    match filter {
        ListFilter::Solar => catalog().iter().map(PlanetCard::from).collect(),
        ListFilter::Custom => custom.iter().map(PlanetCard::from).collect(),
    }
}

//! Custom planet records

use crate::ids::PlanetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback colour for kinds without a dedicated one
pub const DEFAULT_COLOR: u32 = 0x888888;

/// Planet classification
///
/// The enumeration is open: unknown tokens are kept verbatim in
/// [`PlanetKind::Other`] so they round-trip through the store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanetKind {
    Rocky,
    Gaseous,
    Oceanic,
    /// Only used by the catalog Sun
    Star,
    Other(String),
}

impl PlanetKind {
    /// Wire token
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rocky => "rocky",
            Self::Gaseous => "gaseous",
            Self::Oceanic => "oceanic",
            Self::Star => "star",
            Self::Other(token) => token,
        }
    }

    /// Human-readable label used on cards
    pub fn label(&self) -> &str {
        match self {
            Self::Rocky => "Rocky",
            Self::Gaseous => "Gaseous",
            Self::Oceanic => "Oceanic",
            Self::Star => "Star",
            Self::Other(token) => token,
        }
    }

    /// Render colour as 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            Self::Rocky => 0x8c7853,
            Self::Gaseous => 0xd8ca9d,
            Self::Oceanic => 0x4b70dd,
            Self::Star => 0xffff00,
            Self::Other(_) => DEFAULT_COLOR,
        }
    }
}

impl From<String> for PlanetKind {
    fn from(token: String) -> Self {
        match token.trim().to_lowercase().as_str() {
            "rocky" | "rocheuse" => Self::Rocky,
            "gaseous" | "gazeuse" => Self::Gaseous,
            "oceanic" | "oceanique" | "océanique" => Self::Oceanic,
            "star" | "étoile" | "etoile" => Self::Star,
            _ => Self::Other(token),
        }
    }
}

impl From<&str> for PlanetKind {
    fn from(token: &str) -> Self {
        Self::from(token.to_string())
    }
}

impl From<PlanetKind> for String {
    fn from(kind: PlanetKind) -> Self {
        match kind {
            PlanetKind::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PlanetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a 0xRRGGBB colour as `#rrggbb`
pub fn hex_color(color: u32) -> String {
    format!("#{:06x}", color & 0xffffff)
}

/// A custom planet as held by the store
///
/// Records are immutable once created; the only lifecycle transitions are
/// creation and deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetRecord {
    pub id: PlanetId,
    pub pseudo: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlanetKind,
    pub size: f64,
    pub distance: f64,
    pub temperature: f64,
    #[serde(default)]
    pub atmosphere: Vec<String>,
    #[serde(default)]
    pub has_water: bool,
    pub created_at: DateTime<Utc>,
}

impl PlanetRecord {
    /// Whether the record can be turned into an orbiting visual.
    ///
    /// Orbital speed divides by distance, so zero or non-finite distances
    /// (and non-finite sizes) are rejected before reaching the factory.
    pub fn is_renderable(&self) -> bool {
        self.distance.is_finite() && self.distance != 0.0 && self.size.is_finite()
    }

    /// Atmosphere joined for display, or `None` when empty
    pub fn atmosphere_text(&self) -> Option<String> {
        if self.atmosphere.is_empty() {
            None
        } else {
            Some(self.atmosphere.join(", "))
        }
    }
}

/// A validated planet that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetDraft {
    pub pseudo: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlanetKind,
    pub size: f64,
    pub distance: f64,
    pub temperature: f64,
    pub atmosphere: Vec<String>,
    pub has_water: bool,
}

impl PlanetDraft {
    /// Turn the draft into a record once the store has assigned an id
    pub fn into_record(self, id: PlanetId, created_at: DateTime<Utc>) -> PlanetRecord {
        PlanetRecord {
            id,
            pseudo: self.pseudo,
            name: self.name,
            kind: self.kind,
            size: self.size,
            distance: self.distance,
            temperature: self.temperature,
            atmosphere: self.atmosphere,
            has_water: self.has_water,
            created_at,
        }
    }
}

//! Strongly-typed identifiers
//!
//! Planet ids are assigned by the store on creation and are never reused,
//! so they are the only key the scene uses to match visuals to records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a stored custom planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanetId(i64);

impl PlanetId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "planet:{}", self.0)
    }
}

impl FromStr for PlanetId {
    type Err = std::num::ParseIntError;

    /// Accepts both the bare number and the `planet:<n>` display form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("planet:").unwrap_or(s);
        raw.trim().parse().map(Self)
    }
}

impl From<i64> for PlanetId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

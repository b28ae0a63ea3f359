//! Response bodies of the planet REST API

use crate::ids::PlanetId;
use serde::{Deserialize, Serialize};

/// Response of `POST /api/planets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePlanetResponse {
    pub success: bool,
    pub id: PlanetId,
    #[serde(default)]
    pub message: String,
}

/// Response of `DELETE /api/planets/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePlanetResponse {
    pub success: bool,
    /// False when the id was already absent
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub message: String,
}

/// Error payload; `error` is shown to users verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

//! Custom planet handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use orrery_types::{
    CreatePlanetRequest, CreatePlanetResponse, DeletePlanetResponse, PlanetId, PlanetRecord,
};

fn parse_id(raw: &str) -> ApiResult<PlanetId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid planet id: {}", raw)))
}

/// List all custom planets, newest first
pub async fn list_planets(State(state): State<AppState>) -> ApiResult<Json<Vec<PlanetRecord>>> {
    let planets = state
        .storage
        .list()
        .await
        .map_err(|e| ApiError::storage("Failed to load planets", e))?;
    Ok(Json(planets))
}

/// Get a specific planet
pub async fn get_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PlanetRecord>> {
    let planet_id = parse_id(&id)?;
    let planet = state
        .storage
        .get(planet_id)
        .await
        .map_err(|e| ApiError::storage("Failed to load planet", e))?
        .ok_or_else(|| ApiError::NotFound(format!("Planet {} not found", id)))?;

    Ok(Json(planet))
}

/// Create a new planet
pub async fn create_planet(
    State(state): State<AppState>,
    body: Result<Json<CreatePlanetRequest>, JsonRejection>,
) -> ApiResult<Json<CreatePlanetResponse>> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let draft = request.validate()?;

    let record = state
        .storage
        .insert(draft)
        .await
        .map_err(|e| ApiError::storage("Failed to save planet", e))?;

    tracing::info!(planet_id = %record.id, name = %record.name, "Created planet");

    Ok(Json(CreatePlanetResponse {
        success: true,
        id: record.id,
        message: "Planet saved".to_string(),
    }))
}

/// Delete a planet; deleting an unknown id still succeeds
pub async fn delete_planet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeletePlanetResponse>> {
    let planet_id = parse_id(&id)?;
    let deleted = state
        .storage
        .delete(planet_id)
        .await
        .map_err(|e| ApiError::storage("Failed to delete planet", e))?;

    if deleted {
        tracing::info!(planet_id = %planet_id, "Deleted planet");
    } else {
        tracing::debug!(planet_id = %planet_id, "Delete of absent planet");
    }

    Ok(Json(DeletePlanetResponse {
        success: true,
        deleted,
        message: if deleted {
            "Planet deleted".to_string()
        } else {
            "Planet already absent".to_string()
        },
    }))
}

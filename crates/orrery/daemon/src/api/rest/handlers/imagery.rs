//! Imagery proxy handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Image search query string
#[derive(Debug, Deserialize)]
pub struct ImageSearchQuery {
    pub q: Option<String>,
}

/// Relay the picture of the day
pub async fn apod(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let body = state
        .imagery
        .apod(&params)
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch NASA data", e))?;
    Ok(Json(body))
}

/// Relay an image search
pub async fn search_images(
    State(state): State<AppState>,
    Query(query): Query<ImageSearchQuery>,
) -> ApiResult<Json<Value>> {
    let body = state
        .imagery
        .search(query.q.as_deref())
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch NASA images", e))?;
    Ok(Json(body))
}

/// Relay an image search for one planet name
pub async fn planet_images(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<Value>> {
    let body = state
        .imagery
        .search(Some(&name))
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch planet data", e))?;
    Ok(Json(body))
}

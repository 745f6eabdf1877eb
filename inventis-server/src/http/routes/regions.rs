//! Coverage region endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{IdParam, JsonBody};
use crate::http::server::AppState;
use crate::models::{Region, RegionPayload};

/// GET /regions - list all regions
async fn list_regions(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Region>>, ApiError> {
    Ok(Json(state.storage.list_regions().await?))
}

/// POST /regions - create a region
async fn create_region(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<RegionPayload>,
) -> Result<(StatusCode, Json<Region>), ApiError> {
    let new = payload.validate()?;
    let region = state.storage.create_region(new).await?;
    tracing::info!(id = region.id, title = %region.title, "Region created");

    Ok((StatusCode::CREATED, Json(region)))
}

/// GET /regions/{id} - get a single region
async fn get_region(
    State(state): State<Arc<AppState>>,
    IdParam(id): IdParam,
) -> Result<Json<Region>, ApiError> {
    state
        .storage
        .get_region(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound {
            resource: "region",
            id: id.to_string(),
        })
}

/// Region routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/regions", get(list_regions).post(create_region))
        .route("/regions/{id}", get(get_region))
}

//! Complication catalogue HTTP handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use deadpool_postgres::Pool;
use hms_core::{
    Complication, ComplicationPatch, ComplicationStore, Listing, NewComplication, Record,
};

use super::ListParams;
use crate::db::ComplicationRepository;
use crate::error::AppError;

/// GET /api/complications - List complications, `q` matches the name
pub async fn list(
    State(pool): State<Pool>,
    Query(params): Query<ListParams>,
) -> Result<Json<Listing<Complication>>, AppError> {
    let repo = ComplicationRepository::new(pool);
    let rows = repo.search(&params.into_query()).await?;
    Ok(Json(Listing::new(Complication::SCHEMA.collection, rows)))
}

/// POST /api/complications - Create a complication
pub async fn create(
    State(pool): State<Pool>,
    Json(body): Json<NewComplication>,
) -> Result<impl IntoResponse, AppError> {
    let repo = ComplicationRepository::new(pool);
    let created = repo.insert(body).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/complications/{}", created.id).parse() {
        headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(created)))
}

/// PATCH /api/complications/{id} - Update the supplied fields
pub async fn update(
    State(pool): State<Pool>,
    Path(id): Path<i64>,
    Json(patch): Json<ComplicationPatch>,
) -> Result<Json<Complication>, AppError> {
    let repo = ComplicationRepository::new(pool);
    Ok(Json(repo.update(id, patch).await?))
}

/// DELETE /api/complications/{id} - Delete a complication
pub async fn delete(
    State(pool): State<Pool>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let repo = ComplicationRepository::new(pool);
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Annotation store handlers: `/api/labels` and `/api/labels/{id}`.

use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use models::image_label::{AnnotationInput, Model};

use crate::{errors::JsonApiError, state::StoreState};

#[utoipa::path(
    get, path = "/api/labels", tag = "labels",
    responses(
        (status = 200, description = "All records in storage order", body = [crate::openapi::AnnotationRecordDoc]),
        (status = 500, description = "Database failure", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(State(state): State<StoreState>) -> Result<Json<Vec<Model>>, JsonApiError> {
    let rows = state
        .labels
        .list()
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to fetch data"))?;
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/labels/{id}", tag = "labels",
    params(("id" = i64, Path, description = "image_id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AnnotationRecordDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(
    State(state): State<StoreState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
) -> Result<Json<Model>, JsonApiError> {
    let found = state
        .labels
        .get(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to fetch data"))?;
    Ok(Json(found))
}

#[utoipa::path(
    post, path = "/api/labels", tag = "labels",
    request_body = crate::openapi::AnnotationInputDoc,
    responses(
        (status = 201, description = "Created; echoes the submitted record", body = crate::openapi::AnnotationInputDoc),
        (status = 400, description = "Invalid JSON or missing required fields", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Insert failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<StoreState>,
    WithRejection(Json(body), _): WithRejection<Json<serde_json::Value>, JsonApiError>,
) -> Result<(StatusCode, Json<AnnotationInput>), JsonApiError> {
    let echoed = state
        .labels
        .create(body)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to insert data"))?;
    Ok((StatusCode::CREATED, Json(echoed)))
}

#[utoipa::path(
    put, path = "/api/labels/{id}", tag = "labels",
    params(("id" = i64, Path, description = "image_id")),
    request_body = crate::openapi::AnnotationInputDoc,
    responses(
        (status = 200, description = "Replaced (also for unknown ids); echoes the submitted record", body = crate::openapi::AnnotationInputDoc),
        (status = 400, description = "Invalid JSON or missing required fields", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Update failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<StoreState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
    WithRejection(Json(body), _): WithRejection<Json<serde_json::Value>, JsonApiError>,
) -> Result<Json<AnnotationInput>, JsonApiError> {
    let echoed = state
        .labels
        .update(id, body)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to update data"))?;
    Ok(Json(echoed))
}

#[utoipa::path(
    delete, path = "/api/labels/{id}", tag = "labels",
    params(("id" = i64, Path, description = "image_id")),
    responses(
        (status = 204, description = "Deleted (also for unknown ids)"),
        (status = 500, description = "Delete failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(
    State(state): State<StoreState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    state
        .labels
        .delete(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, "Failed to delete data"))?;
    Ok(StatusCode::NO_CONTENT)
}

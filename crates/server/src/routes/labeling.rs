use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use service::labeling::LabelingError;
use tracing::info;

use crate::{errors::JsonApiError, state::LabelingState};

#[derive(Debug, Deserialize)]
pub struct LabelRequest {
    #[serde(default)]
    pub image_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LabelResponse {
    pub label: String,
}

#[utoipa::path(
    post, path = "/generate_image_label", tag = "labeling",
    request_body(
        content = crate::openapi::LabelRequestDoc,
        description = "`image_path` is joined onto the configured image root; absolute paths are used as given"
    ),
    responses(
        (status = 200, description = "Label generated", body = crate::openapi::LabelResponseDoc),
        (status = 400, description = "No image path provided", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Image unreadable or model call failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn generate_image_label(
    State(state): State<LabelingState>,
    WithRejection(Json(req), _): WithRejection<Json<LabelRequest>, JsonApiError>,
) -> Result<Json<LabelResponse>, JsonApiError> {
    let Some(image_path) = req.image_path.filter(|p| !p.trim().is_empty()) else {
        return Err(LabelingError::MissingImagePath.into());
    };
    let label = state.labeler.label_image(&image_path).await?;
    info!(%image_path, model = state.labeler.model_name(), "generated image label");
    Ok(Json(LabelResponse { label }))
}

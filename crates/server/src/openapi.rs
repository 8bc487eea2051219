use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBodyDoc {
    pub error: String,
    pub detail: Option<String>,
}

/// Body of POST/PUT `/api/labels`; `image_url` and `ai_label` are required.
#[derive(ToSchema)]
pub struct AnnotationInputDoc {
    pub image_url: String,
    pub ai_label: String,
    pub human_1_score: Option<i64>,
    pub human_2_score: Option<i64>,
    pub human_3_score: Option<i64>,
    pub human_1_comment: Option<String>,
    pub human_2_comment: Option<String>,
    pub human_3_comment: Option<String>,
    pub ai_accuracy: Option<f64>,
}

#[derive(ToSchema)]
pub struct AnnotationRecordDoc {
    pub image_id: i64,
    pub image_url: String,
    pub ai_label: String,
    pub human_1_score: Option<i64>,
    pub human_2_score: Option<i64>,
    pub human_3_score: Option<i64>,
    pub human_1_comment: Option<String>,
    pub human_2_comment: Option<String>,
    pub human_3_comment: Option<String>,
    pub ai_accuracy: Option<f64>,
}

#[derive(ToSchema)]
pub struct LabelRequestDoc { pub image_path: String }

#[derive(ToSchema)]
pub struct LabelResponseDoc { pub label: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::labels::list,
        crate::routes::labels::get,
        crate::routes::labels::create,
        crate::routes::labels::update,
        crate::routes::labels::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            AnnotationInputDoc,
            AnnotationRecordDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "labels")
    )
)]
pub struct StoreApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::labeling::generate_image_label,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBodyDoc,
            LabelRequestDoc,
            LabelResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "labeling")
    )
)]
pub struct LabelingApiDoc;

use axum::{routing::{get, post}, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::{LabelingApiDoc, StoreApiDoc};
use crate::state::{LabelingState, StoreState};

pub mod labeling;
pub mod labels;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn trace_layer() -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(false),
        )
        // 请求到达时打点
        .on_request(
            DefaultOnRequest::new()
                .level(Level::INFO),
        )
        // 响应返回时打点，包含状态码与耗时
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .include_headers(false),
        )
        // 失败（5xx 等）时以 ERROR 记录
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR),
        )
}

/// Annotation store: CRUD on `/api/labels`, health and API docs.
pub fn build_store_router(state: StoreState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/labels", get(labels::list).post(labels::create))
        .route(
            "/api/labels/:id",
            get(labels::get).put(labels::update).delete(labels::delete),
        )
        .route("/health", get(health))
        .with_state(state);

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", StoreApiDoc::openapi()))
        .layer(cors)
        .layer(trace_layer())
}

/// Labeling service: a single POST endpoint plus health and API docs.
pub fn build_labeling_router(state: LabelingState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/generate_image_label", post(labeling::generate_image_label))
        .route("/health", get(health))
        .with_state(state);

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", LabelingApiDoc::openapi()))
        .layer(cors)
        .layer(trace_layer())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use service::labeling::{ImageLabeler, LabelingError};
    use tower::ServiceExt;

    use super::*;

    struct FixedLabeler;

    #[async_trait]
    impl ImageLabeler for FixedLabeler {
        async fn label_image(&self, image_path: &str) -> Result<String, LabelingError> {
            Ok(format!("a picture at {image_path}"))
        }
        fn model_name(&self) -> &str { "fixed" }
    }

    async fn store_app() -> Router {
        let db = models::db::connect_in_memory().await.unwrap();
        <migration::Migrator as migration::MigratorTrait>::up(&db, None).await.unwrap();
        build_store_router(StoreState::new(db), CorsLayer::very_permissive())
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn store_health_and_empty_list() {
        let app = store_app().await;
        let res = app.clone().oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["status"], "ok");

        let res = app.oneshot(Request::get("/api/labels").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let app = store_app().await;
        let res = app
            .oneshot(Request::delete("/api/labels/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "Invalid id");
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_json() {
        let app = store_app().await;
        let req = Request::post("/api/labels")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "Invalid JSON");
    }

    #[tokio::test]
    async fn openapi_document_lists_label_routes() {
        let app = store_app().await;
        let res = app
            .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let doc = body_json(res).await;
        assert!(doc["paths"]["/api/labels"].is_object());
        assert!(doc["paths"]["/api/labels/{id}"].is_object());
    }

    #[tokio::test]
    async fn labeling_route_uses_labeler() {
        let app = build_labeling_router(
            LabelingState { labeler: Arc::new(FixedLabeler) },
            CorsLayer::very_permissive(),
        );
        let req = Request::post("/generate_image_label")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"image_path":"uploads/cat.jpg"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["label"], "a picture at uploads/cat.jpg");
    }
}

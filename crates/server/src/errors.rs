use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use service::labeling::LabelingError;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by every handler: a status code plus `{"error": ..., "detail": ...}`.
///
/// 5xx responses never carry a detail; the cause is logged instead.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, error: error.into(), detail }
    }

    /// Map a service failure; `failure` is the message used for statement errors
    /// (e.g. "Failed to insert data").
    pub fn from_service(e: ServiceError, failure: &str) -> Self {
        match e {
            ServiceError::InvalidBody(m) => Self::new(StatusCode::BAD_REQUEST, "Invalid JSON", Some(m)),
            ServiceError::MissingFields(f) => {
                Self::new(StatusCode::BAD_REQUEST, "Missing required fields", Some(f.join(", ")))
            }
            ServiceError::Validation(m) => Self::new(StatusCode::BAD_REQUEST, "Invalid field value", Some(m)),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(m)),
            ServiceError::Unavailable(m) => {
                error!(err = %m, "database connection failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Database connection failed", None)
            }
            ServiceError::Db(m) => {
                error!(err = %m, "{failure}");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, failure, None)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.error, detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(err = %rejection.body_text(), "rejected request body");
        Self::new(StatusCode::BAD_REQUEST, "Invalid JSON", Some(rejection.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid id", Some(rejection.body_text()))
    }
}

impl From<LabelingError> for JsonApiError {
    fn from(e: LabelingError) -> Self {
        if e.is_client_error() {
            return Self::new(StatusCode::BAD_REQUEST, e.to_string(), None);
        }
        error!(err = %e, "labeling failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
    }
}

/// Failures before the listener is up; these end the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

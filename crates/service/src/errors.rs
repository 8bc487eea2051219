use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid body: {0}")]
    InvalidBody(String),
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::InvalidBody(m) => Self::InvalidBody(m),
            ModelError::MissingFields(f) => Self::MissingFields(f),
            ModelError::Validation(m) => Self::Validation(m),
            ModelError::Unavailable(m) => Self::Unavailable(m),
            ModelError::Db(m) => Self::Db(m),
        }
    }
}

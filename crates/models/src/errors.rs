use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid body: {0}")]
    InvalidBody(String),
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e {
            // pool could not hand out a connection, or the file could not be opened
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ModelError::Unavailable(e.to_string()),
            other => ModelError::Db(other.to_string()),
        }
    }
}

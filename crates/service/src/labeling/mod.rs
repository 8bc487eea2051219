//! Image labeling through an external vision model.
//!
//! The HTTP layer only sees [`ImageLabeler`]; the OpenAI-compatible backend is
//! one implementation and tests substitute their own.

pub mod openai;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiImageLabeler;

/// Labeling client errors
#[derive(Debug, Error)]
pub enum LabelingError {
    #[error("No image path provided")]
    MissingImagePath,

    #[error("Cannot read image {path}: {reason}")]
    ImageRead { path: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model returned no label")]
    EmptyResponse,

    #[error("Invalid labeling configuration: {0}")]
    Config(String),
}

impl LabelingError {
    /// Caller mistakes rather than backend failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingImagePath)
    }
}

/// Produces a short descriptive label for an image.
#[async_trait]
pub trait ImageLabeler: Send + Sync {
    /// Label the image found at `image_path`.
    async fn label_image(&self, image_path: &str) -> Result<String, LabelingError>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

use std::sync::Arc;

use models::image_label::{self, AnnotationInput};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::image_label::repository::{ImageLabelRepository, SeaOrmImageLabelRepository};

/// Application service for the annotation store.
///
/// Bodies arrive as untyped JSON and are validated into [`AnnotationInput`]
/// before anything touches storage. Create and update echo the validated input
/// back to the caller rather than the stored row.
#[derive(Clone)]
pub struct ImageLabelService {
    repo: Arc<dyn ImageLabelRepository>,
}

impl ImageLabelService {
    pub fn new(repo: Arc<dyn ImageLabelRepository>) -> Self { Self { repo } }

    pub fn with_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmImageLabelRepository { db }))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<image_label::Model>, ServiceError> {
        let rows = self.repo.list().await?;
        info!(count = rows.len(), "list image labels");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, image_id: i64) -> Result<image_label::Model, ServiceError> {
        self.repo
            .get(image_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("image label"))
    }

    #[instrument(skip(self, body))]
    pub async fn create(&self, body: serde_json::Value) -> Result<AnnotationInput, ServiceError> {
        let input = AnnotationInput::from_json(body)?;
        let created = self.repo.create(input.clone()).await?;
        info!(image_id = created.image_id, image_url = %created.image_url, "created image label");
        Ok(input)
    }

    /// Full replacement. An unknown id affects no rows and still succeeds.
    #[instrument(skip(self, body))]
    pub async fn update(&self, image_id: i64, body: serde_json::Value) -> Result<AnnotationInput, ServiceError> {
        let input = AnnotationInput::from_json(body)?;
        let rows_affected = self.repo.update(image_id, input.clone()).await?;
        if rows_affected == 0 {
            debug!(image_id, "update matched no rows");
        } else {
            info!(image_id, "updated image label");
        }
        Ok(input)
    }

    /// Succeeds whether or not the row existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, image_id: i64) -> Result<(), ServiceError> {
        let rows_affected = self.repo.delete(image_id).await?;
        info!(image_id, rows_affected, "deleted image label");
        Ok(())
    }
}

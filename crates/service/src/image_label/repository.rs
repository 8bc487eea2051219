use async_trait::async_trait;
use models::image_label::{self, AnnotationInput};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// Persistence seam for annotation records.
#[async_trait]
pub trait ImageLabelRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<image_label::Model>, ServiceError>;
    async fn get(&self, image_id: i64) -> Result<Option<image_label::Model>, ServiceError>;
    async fn create(&self, input: AnnotationInput) -> Result<image_label::Model, ServiceError>;
    /// Returns rows affected; 0 for an unknown id.
    async fn update(&self, image_id: i64, input: AnnotationInput) -> Result<u64, ServiceError>;
    /// Returns rows affected; 0 for an unknown id.
    async fn delete(&self, image_id: i64) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmImageLabelRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ImageLabelRepository for SeaOrmImageLabelRepository {
    async fn list(&self) -> Result<Vec<image_label::Model>, ServiceError> {
        Ok(image_label::list(&self.db).await?)
    }

    async fn get(&self, image_id: i64) -> Result<Option<image_label::Model>, ServiceError> {
        Ok(image_label::find(&self.db, image_id).await?)
    }

    async fn create(&self, input: AnnotationInput) -> Result<image_label::Model, ServiceError> {
        Ok(image_label::create(&self.db, input).await?)
    }

    async fn update(&self, image_id: i64, input: AnnotationInput) -> Result<u64, ServiceError> {
        Ok(image_label::update(&self.db, image_id, input).await?)
    }

    async fn delete(&self, image_id: i64) -> Result<u64, ServiceError> {
        Ok(image_label::delete(&self.db, image_id).await?)
    }
}

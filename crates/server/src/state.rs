use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::image_label::ImageLabelService;
use service::labeling::ImageLabeler;

/// Shared state of the annotation store router.
#[derive(Clone)]
pub struct StoreState {
    pub labels: ImageLabelService,
}

impl StoreState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { labels: ImageLabelService::with_db(db) }
    }
}

/// Shared state of the labeling router.
#[derive(Clone)]
pub struct LabelingState {
    pub labeler: Arc<dyn ImageLabeler>,
}

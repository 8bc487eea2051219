pub mod repository;
pub mod service;

pub use repository::{ImageLabelRepository, SeaOrmImageLabelRepository};
pub use service::ImageLabelService;

//! Migrator for the annotation store schema.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20250201_000001_create_image_labels;
mod m20250201_000002_add_image_url_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250201_000001_create_image_labels::Migration),
            // Indexes should always be applied last
            Box::new(m20250201_000002_add_image_url_index::Migration),
        ]
    }
}

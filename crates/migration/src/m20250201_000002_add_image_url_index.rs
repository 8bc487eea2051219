//! Non-unique index on `image_labels.image_url`.
//! The same image may be annotated many times; the index only speeds up lookups.
use sea_orm_migration::prelude::*;

use crate::m20250201_000001_create_image_labels::ImageLabels;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_image_labels_image_url")
                    .table(ImageLabels::Table)
                    .col(ImageLabels::ImageUrl)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_image_labels_image_url")
                    .table(ImageLabels::Table)
                    .to_owned(),
            )
            .await
    }
}

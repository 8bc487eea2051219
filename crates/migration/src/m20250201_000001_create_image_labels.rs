//! Create `image_labels` table.
//!
//! One row per annotated image: the AI label plus three optional human reviews.
//! `image_id` is a 64-bit AUTOINCREMENT rowid so ids are never reused after a delete.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ImageLabels::Table)
                    .if_not_exists()
                    .col(big_integer(ImageLabels::ImageId).auto_increment().primary_key().take())
                    .col(text(ImageLabels::ImageUrl))
                    .col(text(ImageLabels::AiLabel))
                    .col(big_integer_null(ImageLabels::Human1Score))
                    .col(big_integer_null(ImageLabels::Human2Score))
                    .col(big_integer_null(ImageLabels::Human3Score))
                    .col(text_null(ImageLabels::Human1Comment))
                    .col(text_null(ImageLabels::Human2Comment))
                    .col(text_null(ImageLabels::Human3Comment))
                    .col(double_null(ImageLabels::AiAccuracy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ImageLabels::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum ImageLabels {
    Table,
    ImageId,
    ImageUrl,
    AiLabel,
    #[sea_orm(iden = "human_1_score")]
    Human1Score,
    #[sea_orm(iden = "human_2_score")]
    Human2Score,
    #[sea_orm(iden = "human_3_score")]
    Human3Score,
    #[sea_orm(iden = "human_1_comment")]
    Human1Comment,
    #[sea_orm(iden = "human_2_comment")]
    Human2Comment,
    #[sea_orm(iden = "human_3_comment")]
    Human3Comment,
    AiAccuracy,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every query is filtered by dealer
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cars_dealer")
                    .table(Cars::Table)
                    .col(Cars::DealerId)
                    .to_owned(),
            )
            .await?;

        // Search: (dealer_id, make_key, model_key)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cars_dealer_make_model")
                    .table(Cars::Table)
                    .col(Cars::DealerId)
                    .col(Cars::MakeKey)
                    .col(Cars::ModelKey)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_cars_dealer_make_model").table(Cars::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_cars_dealer").table(Cars::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cars { Table, DealerId, MakeKey, ModelKey }

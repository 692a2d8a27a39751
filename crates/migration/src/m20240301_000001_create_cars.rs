//! Create `cars` table.
//!
//! One row per inventory line item; `dealer_id` is the tenant key.
//! `make_key`/`model_key` hold the case-folded labels that search compares.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(pk_auto(Cars::Id))
                    .col(string_len(Cars::Make, 128))
                    .col(string_len(Cars::Model, 128))
                    .col(integer(Cars::Year))
                    .col(integer(Cars::Stock))
                    .col(integer(Cars::DealerId))
                    .col(text(Cars::MakeKey))
                    .col(text(Cars::ModelKey))
                    .check(Expr::col(Cars::Stock).gte(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cars::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cars { Table, Id, Make, Model, Year, Stock, DealerId, MakeKey, ModelKey }

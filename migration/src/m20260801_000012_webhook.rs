use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Webhook::Table)
                    .if_not_exists()
                    .col(pk_auto(Webhook::Id))
                    .col(string_uniq(Webhook::Name))
                    .col(boolean(Webhook::Enabled).default(true))
                    .col(boolean(Webhook::TypeCreate).default(false))
                    .col(boolean(Webhook::TypeUpdate).default(false))
                    .col(boolean(Webhook::TypeDelete).default(false))
                    .col(string(Webhook::HttpMethod).default("POST"))
                    .col(string(Webhook::PayloadUrl))
                    .col(boolean(Webhook::SslValidation).default(true))
                    .col(timestamp(Webhook::CreatedAt))
                    .col(timestamp(Webhook::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Webhook::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Webhook {
    Table,
    Id,
    Name,
    Enabled,
    TypeCreate,
    TypeUpdate,
    TypeDelete,
    HttpMethod,
    PayloadUrl,
    SslValidation,
    CreatedAt,
    UpdatedAt,
}

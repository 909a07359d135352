use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RackRole::Table)
                    .if_not_exists()
                    .col(pk_auto(RackRole::Id))
                    .col(string_uniq(RackRole::Name))
                    .col(string_uniq(RackRole::Slug))
                    .col(string(RackRole::Color).default("9e9e9e"))
                    .col(string(RackRole::Description).default(""))
                    .col(timestamp(RackRole::CreatedAt))
                    .col(timestamp(RackRole::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RackRole::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RackRole {
    Table,
    Id,
    Name,
    Slug,
    Color,
    Description,
    CreatedAt,
    UpdatedAt,
}

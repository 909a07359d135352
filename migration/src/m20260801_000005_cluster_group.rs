use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClusterGroup::Table)
                    .if_not_exists()
                    .col(pk_auto(ClusterGroup::Id))
                    .col(string_uniq(ClusterGroup::Name))
                    .col(string_uniq(ClusterGroup::Slug))
                    .col(string(ClusterGroup::Description).default(""))
                    .col(timestamp(ClusterGroup::CreatedAt))
                    .col(timestamp(ClusterGroup::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClusterGroup::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ClusterGroup {
    Table,
    Id,
    Name,
    Slug,
    Description,
    CreatedAt,
    UpdatedAt,
}

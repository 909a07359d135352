use sea_orm_migration::{prelude::*, schema::*};

static IDX_USER_PREFERENCE_USER_TABLE: &str = "idx_user_preference_user_name_table_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPreference::Table)
                    .if_not_exists()
                    .col(pk_auto(UserPreference::Id))
                    .col(string(UserPreference::UserName))
                    .col(string(UserPreference::TableName))
                    .col(json_binary_null(UserPreference::Columns))
                    .col(json_binary_null(UserPreference::Sort))
                    .col(integer_null(UserPreference::PerPage))
                    .col(timestamp(UserPreference::CreatedAt))
                    .col(timestamp(UserPreference::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_PREFERENCE_USER_TABLE)
                    .table(UserPreference::Table)
                    .col(UserPreference::UserName)
                    .col(UserPreference::TableName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_PREFERENCE_USER_TABLE)
                    .table(UserPreference::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UserPreference::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserPreference {
    Table,
    Id,
    UserName,
    TableName,
    Columns,
    Sort,
    PerPage,
    CreatedAt,
    UpdatedAt,
}

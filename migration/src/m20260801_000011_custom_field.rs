use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CustomField::Table)
                    .if_not_exists()
                    .col(pk_auto(CustomField::Id))
                    .col(string_uniq(CustomField::Name))
                    .col(string(CustomField::Label).default(""))
                    .col(string(CustomField::FieldType))
                    .col(boolean(CustomField::Required).default(false))
                    .col(integer(CustomField::Weight).default(100))
                    .col(string_null(CustomField::DefaultValue))
                    .col(string(CustomField::Description).default(""))
                    .col(timestamp(CustomField::CreatedAt))
                    .col(timestamp(CustomField::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomField::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CustomField {
    Table,
    Id,
    Name,
    Label,
    FieldType,
    Required,
    Weight,
    DefaultValue,
    Description,
    CreatedAt,
    UpdatedAt,
}

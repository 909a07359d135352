use sea_orm_migration::{prelude::*, schema::*};

static IDX_OBJECT_CHANGE_CHANGED: &str = "idx_object_change_changed_object";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ObjectChange::Table)
                    .if_not_exists()
                    .col(pk_auto(ObjectChange::Id))
                    .col(timestamp(ObjectChange::Time))
                    .col(string(ObjectChange::UserName))
                    .col(string(ObjectChange::Action))
                    .col(string(ObjectChange::ChangedObjectApp))
                    .col(string(ObjectChange::ChangedObjectType))
                    .col(integer(ObjectChange::ChangedObjectId))
                    .col(string(ObjectChange::ObjectRepr))
                    .col(json_binary_null(ObjectChange::ObjectData))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OBJECT_CHANGE_CHANGED)
                    .table(ObjectChange::Table)
                    .col(ObjectChange::ChangedObjectApp)
                    .col(ObjectChange::ChangedObjectType)
                    .col(ObjectChange::ChangedObjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_OBJECT_CHANGE_CHANGED)
                    .table(ObjectChange::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ObjectChange::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ObjectChange {
    Table,
    Id,
    Time,
    UserName,
    Action,
    ChangedObjectApp,
    ChangedObjectType,
    ChangedObjectId,
    ObjectRepr,
    ObjectData,
}

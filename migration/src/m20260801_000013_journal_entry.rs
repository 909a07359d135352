use sea_orm_migration::{prelude::*, schema::*};

static IDX_JOURNAL_ENTRY_ASSIGNED: &str = "idx_journal_entry_assigned_object";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(JournalEntry::Table)
                    .if_not_exists()
                    .col(pk_auto(JournalEntry::Id))
                    .col(string(JournalEntry::AssignedObjectApp))
                    .col(string(JournalEntry::AssignedObjectType))
                    .col(integer(JournalEntry::AssignedObjectId))
                    .col(string(JournalEntry::CreatedBy))
                    .col(string(JournalEntry::Kind).default("info"))
                    .col(string(JournalEntry::Comments))
                    .col(timestamp(JournalEntry::CreatedAt))
                    .col(timestamp(JournalEntry::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_JOURNAL_ENTRY_ASSIGNED)
                    .table(JournalEntry::Table)
                    .col(JournalEntry::AssignedObjectApp)
                    .col(JournalEntry::AssignedObjectType)
                    .col(JournalEntry::AssignedObjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_JOURNAL_ENTRY_ASSIGNED)
                    .table(JournalEntry::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(JournalEntry::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum JournalEntry {
    Table,
    Id,
    AssignedObjectApp,
    AssignedObjectType,
    AssignedObjectId,
    CreatedBy,
    Kind,
    Comments,
    CreatedAt,
    UpdatedAt,
}

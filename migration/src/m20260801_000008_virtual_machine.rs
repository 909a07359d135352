use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000006_cluster::Cluster;

static IDX_VIRTUAL_MACHINE_CLUSTER_ID_NAME: &str = "idx_virtual_machine_cluster_id_name";
static FK_VIRTUAL_MACHINE_CLUSTER_ID: &str = "fk_virtual_machine_cluster_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VirtualMachine::Table)
                    .if_not_exists()
                    .col(pk_auto(VirtualMachine::Id))
                    .col(string(VirtualMachine::Name))
                    .col(integer(VirtualMachine::ClusterId))
                    .col(string(VirtualMachine::Status).default("active"))
                    .col(integer_null(VirtualMachine::Vcpus))
                    .col(integer_null(VirtualMachine::MemoryMb))
                    .col(integer_null(VirtualMachine::DiskGb))
                    .col(string(VirtualMachine::Comments).default(""))
                    .col(timestamp(VirtualMachine::CreatedAt))
                    .col(timestamp(VirtualMachine::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VIRTUAL_MACHINE_CLUSTER_ID_NAME)
                    .table(VirtualMachine::Table)
                    .col(VirtualMachine::ClusterId)
                    .col(VirtualMachine::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VIRTUAL_MACHINE_CLUSTER_ID)
                    .from_tbl(VirtualMachine::Table)
                    .from_col(VirtualMachine::ClusterId)
                    .to_tbl(Cluster::Table)
                    .to_col(Cluster::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_VIRTUAL_MACHINE_CLUSTER_ID)
                    .table(VirtualMachine::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_VIRTUAL_MACHINE_CLUSTER_ID_NAME)
                    .table(VirtualMachine::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VirtualMachine::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum VirtualMachine {
    Table,
    Id,
    Name,
    ClusterId,
    Status,
    Vcpus,
    MemoryMb,
    DiskGb,
    Comments,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000008_virtual_machine::VirtualMachine;

static IDX_VM_INTERFACE_VM_ID_NAME: &str = "idx_vm_interface_virtual_machine_id_name";
static FK_VM_INTERFACE_VM_ID: &str = "fk_vm_interface_virtual_machine_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VmInterface::Table)
                    .if_not_exists()
                    .col(pk_auto(VmInterface::Id))
                    .col(integer(VmInterface::VirtualMachineId))
                    .col(string(VmInterface::Name))
                    .col(boolean(VmInterface::Enabled).default(true))
                    .col(integer_null(VmInterface::Mtu))
                    .col(string_null(VmInterface::MacAddress))
                    .col(string(VmInterface::Description).default(""))
                    .col(timestamp(VmInterface::CreatedAt))
                    .col(timestamp(VmInterface::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VM_INTERFACE_VM_ID_NAME)
                    .table(VmInterface::Table)
                    .col(VmInterface::VirtualMachineId)
                    .col(VmInterface::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_VM_INTERFACE_VM_ID)
                    .from_tbl(VmInterface::Table)
                    .from_col(VmInterface::VirtualMachineId)
                    .to_tbl(VirtualMachine::Table)
                    .to_col(VirtualMachine::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop().name(FK_VM_INTERFACE_VM_ID).table(VmInterface::Table).to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_VM_INTERFACE_VM_ID_NAME)
                    .table(VmInterface::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VmInterface::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum VmInterface {
    Table,
    Id,
    VirtualMachineId,
    Name,
    Enabled,
    Mtu,
    MacAddress,
    Description,
    CreatedAt,
    UpdatedAt,
}

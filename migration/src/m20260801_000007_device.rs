use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000001_site::Site, m20260801_000003_rack::Rack, m20260801_000006_cluster::Cluster,
};

static IDX_DEVICE_CLUSTER_ID: &str = "idx_device_cluster_id";
static FK_DEVICE_SITE_ID: &str = "fk_device_site_id";
static FK_DEVICE_RACK_ID: &str = "fk_device_rack_id";
static FK_DEVICE_CLUSTER_ID: &str = "fk_device_cluster_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Device::Table)
                    .if_not_exists()
                    .col(pk_auto(Device::Id))
                    .col(string(Device::Name))
                    .col(integer(Device::SiteId))
                    .col(integer_null(Device::RackId))
                    .col(integer_null(Device::ClusterId))
                    .col(timestamp(Device::CreatedAt))
                    .col(timestamp(Device::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_CLUSTER_ID)
                    .table(Device::Table)
                    .col(Device::ClusterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DEVICE_SITE_ID)
                    .from_tbl(Device::Table)
                    .from_col(Device::SiteId)
                    .to_tbl(Site::Table)
                    .to_col(Site::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DEVICE_RACK_ID)
                    .from_tbl(Device::Table)
                    .from_col(Device::RackId)
                    .to_tbl(Rack::Table)
                    .to_col(Rack::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DEVICE_CLUSTER_ID)
                    .from_tbl(Device::Table)
                    .from_col(Device::ClusterId)
                    .to_tbl(Cluster::Table)
                    .to_col(Cluster::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop().name(FK_DEVICE_CLUSTER_ID).table(Device::Table).to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop().name(FK_DEVICE_RACK_ID).table(Device::Table).to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop().name(FK_DEVICE_SITE_ID).table(Device::Table).to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name(IDX_DEVICE_CLUSTER_ID).table(Device::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Device::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Device {
    Table,
    Id,
    Name,
    SiteId,
    RackId,
    ClusterId,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260801_000004_cluster_type::ClusterType, m20260801_000005_cluster_group::ClusterGroup,
};

static IDX_CLUSTER_TYPE_ID: &str = "idx_cluster_cluster_type_id";
static FK_CLUSTER_TYPE_ID: &str = "fk_cluster_cluster_type_id";
static FK_CLUSTER_GROUP_ID: &str = "fk_cluster_cluster_group_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cluster::Table)
                    .if_not_exists()
                    .col(pk_auto(Cluster::Id))
                    .col(string_uniq(Cluster::Name))
                    .col(integer(Cluster::ClusterTypeId))
                    .col(integer_null(Cluster::ClusterGroupId))
                    .col(string(Cluster::Status).default("active"))
                    .col(string(Cluster::Comments).default(""))
                    .col(timestamp(Cluster::CreatedAt))
                    .col(timestamp(Cluster::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CLUSTER_TYPE_ID)
                    .table(Cluster::Table)
                    .col(Cluster::ClusterTypeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CLUSTER_TYPE_ID)
                    .from_tbl(Cluster::Table)
                    .from_col(Cluster::ClusterTypeId)
                    .to_tbl(ClusterType::Table)
                    .to_col(ClusterType::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CLUSTER_GROUP_ID)
                    .from_tbl(Cluster::Table)
                    .from_col(Cluster::ClusterGroupId)
                    .to_tbl(ClusterGroup::Table)
                    .to_col(ClusterGroup::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop().name(FK_CLUSTER_GROUP_ID).table(Cluster::Table).to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop().name(FK_CLUSTER_TYPE_ID).table(Cluster::Table).to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name(IDX_CLUSTER_TYPE_ID).table(Cluster::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Cluster::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Cluster {
    Table,
    Id,
    Name,
    ClusterTypeId,
    ClusterGroupId,
    Status,
    Comments,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20260801_000001_site::Site, m20260801_000002_rack_role::RackRole};

static IDX_RACK_SITE_ID_NAME: &str = "idx_rack_site_id_name";
static FK_RACK_SITE_ID: &str = "fk_rack_site_id";
static FK_RACK_ROLE_ID: &str = "fk_rack_role_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rack::Table)
                    .if_not_exists()
                    .col(pk_auto(Rack::Id))
                    .col(string(Rack::Name))
                    .col(integer(Rack::SiteId))
                    .col(integer_null(Rack::RoleId))
                    .col(string(Rack::Status).default("active"))
                    .col(integer(Rack::UHeight).default(42))
                    .col(string(Rack::Comments).default(""))
                    .col(timestamp(Rack::CreatedAt))
                    .col(timestamp(Rack::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_RACK_SITE_ID_NAME)
                    .table(Rack::Table)
                    .col(Rack::SiteId)
                    .col(Rack::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RACK_SITE_ID)
                    .from_tbl(Rack::Table)
                    .from_col(Rack::SiteId)
                    .to_tbl(Site::Table)
                    .to_col(Site::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_RACK_ROLE_ID)
                    .from_tbl(Rack::Table)
                    .from_col(Rack::RoleId)
                    .to_tbl(RackRole::Table)
                    .to_col(RackRole::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(ForeignKey::drop().name(FK_RACK_ROLE_ID).table(Rack::Table).to_owned())
            .await?;

        manager
            .drop_foreign_key(ForeignKey::drop().name(FK_RACK_SITE_ID).table(Rack::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name(IDX_RACK_SITE_ID_NAME).table(Rack::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rack::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Rack {
    Table,
    Id,
    Name,
    SiteId,
    RoleId,
    Status,
    UHeight,
    Comments,
    CreatedAt,
    UpdatedAt,
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An equipment rack within a site.
///
/// Rack names are unique per site. Deleting a site with racks is blocked;
/// deleting a rack role clears the role from its racks.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rack")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub site_id: i32,
    pub role_id: Option<i32>,
    #[sea_orm(default_value = "active")]
    pub status: String,
    #[sea_orm(default_value = 42)]
    pub u_height: i32,
    #[sea_orm(default_value = "")]
    pub comments: String,
    pub created_at: ChronoDateTime,
    pub updated_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::site::Entity",
        from = "Column::SiteId",
        to = "super::site::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Site,
    #[sea_orm(
        belongs_to = "super::rack_role::Entity",
        from = "Column::RoleId",
        to = "super::rack_role::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Role,
    #[sea_orm(has_many = "super::device::Entity")]
    Device,
}

impl Related<super::site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl Related<super::rack_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

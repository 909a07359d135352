use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A pool of virtualization capacity backed by zero or more devices.
///
/// Deleting a cluster type that still has clusters is blocked; deleting a
/// cluster group clears the group from its clusters.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cluster")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub cluster_type_id: i32,
    pub cluster_group_id: Option<i32>,
    #[sea_orm(default_value = "active")]
    pub status: String,
    #[sea_orm(default_value = "")]
    pub comments: String,
    pub created_at: ChronoDateTime,
    pub updated_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cluster_type::Entity",
        from = "Column::ClusterTypeId",
        to = "super::cluster_type::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Type,
    #[sea_orm(
        belongs_to = "super::cluster_group::Entity",
        from = "Column::ClusterGroupId",
        to = "super::cluster_group::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Group,
    #[sea_orm(has_many = "super::virtual_machine::Entity")]
    VirtualMachine,
    #[sea_orm(has_many = "super::device::Entity")]
    Device,
}

impl Related<super::cluster_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Type.def()
    }
}

impl Related<super::cluster_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::virtual_machine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VirtualMachine.def()
    }
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A virtual machine hosted on a cluster.
///
/// VM names are unique per cluster. Deleting a cluster with virtual
/// machines is blocked.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "virtual_machine")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub cluster_id: i32,
    #[sea_orm(default_value = "active")]
    pub status: String,
    pub vcpus: Option<i32>,
    pub memory_mb: Option<i32>,
    pub disk_gb: Option<i32>,
    #[sea_orm(default_value = "")]
    pub comments: String,
    pub created_at: ChronoDateTime,
    pub updated_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cluster::Entity",
        from = "Column::ClusterId",
        to = "super::cluster::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Cluster,
    #[sea_orm(has_many = "super::vm_interface::Entity")]
    Interface,
}

impl Related<super::cluster::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cluster.def()
    }
}

impl Related<super::vm_interface::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Interface.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

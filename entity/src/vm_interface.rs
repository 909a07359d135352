use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A network interface attached to a virtual machine.
///
/// Interface names are unique per virtual machine and are deleted with it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vm_interface")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub virtual_machine_id: i32,
    pub name: String,
    #[sea_orm(default_value = true)]
    pub enabled: bool,
    pub mtu: Option<i32>,
    pub mac_address: Option<String>,
    #[sea_orm(default_value = "")]
    pub description: String,
    pub created_at: ChronoDateTime,
    pub updated_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::virtual_machine::Entity",
        from = "Column::VirtualMachineId",
        to = "super::virtual_machine::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    VirtualMachine,
}

impl Related<super::virtual_machine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VirtualMachine.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

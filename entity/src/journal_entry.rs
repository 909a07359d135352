use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A dated note attached to an inventory object.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub assigned_object_app: String,
    pub assigned_object_type: String,
    pub assigned_object_id: i32,
    pub created_by: String,
    #[sea_orm(default_value = "info")]
    pub kind: String,
    pub comments: String,
    pub created_at: ChronoDateTime,
    pub updated_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

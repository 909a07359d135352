use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Definition of a user-declared field rendered on inventory objects.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "custom_field")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(default_value = "")]
    pub label: String,
    pub field_type: String,
    #[sea_orm(default_value = false)]
    pub required: bool,
    #[sea_orm(default_value = 100)]
    pub weight: i32,
    pub default_value: Option<String>,
    #[sea_orm(default_value = "")]
    pub description: String,
    pub created_at: ChronoDateTime,
    pub updated_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

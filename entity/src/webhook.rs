use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An outbound HTTP callback fired on object lifecycle events.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "webhook")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(default_value = true)]
    pub enabled: bool,
    #[sea_orm(default_value = false)]
    pub type_create: bool,
    #[sea_orm(default_value = false)]
    pub type_update: bool,
    #[sea_orm(default_value = false)]
    pub type_delete: bool,
    #[sea_orm(default_value = "POST")]
    pub http_method: String,
    pub payload_url: String,
    #[sea_orm(default_value = true)]
    pub ssl_validation: bool,
    pub created_at: ChronoDateTime,
    pub updated_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored per-user table configuration (visible columns, sort, page size).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_preference")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_name: String,
    pub table_name: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub columns: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub sort: Option<Json>,
    pub per_page: Option<i32>,
    pub created_at: ChronoDateTime,
    pub updated_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

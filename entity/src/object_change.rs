use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One recorded mutation of an inventory object.
///
/// Rows are written inside the transaction of the operation that performed
/// the change and are never edited afterwards.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "object_change")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub time: ChronoDateTime,
    pub user_name: String,
    pub action: String,
    pub changed_object_app: String,
    pub changed_object_type: String,
    pub changed_object_id: i32,
    pub object_repr: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub object_data: Option<Json>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

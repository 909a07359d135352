use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr};
use serde_json::Value;

use crate::server::model::principal::Principal;

/// Writes object-change rows.
///
/// Generic over the connection so entries land inside the transaction of
/// the mutating operation that produced them.
pub struct ObjectChangeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ObjectChangeRepository<'a, C> {
    /// Creates a new instance of [`ObjectChangeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records one mutation of an inventory object.
    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        &self,
        principal: &Principal,
        action: &str,
        app: &str,
        object_type: &str,
        object_id: i32,
        object_repr: String,
        object_data: Option<Value>,
    ) -> Result<(), DbErr> {
        let entry = entity::object_change::ActiveModel {
            time: ActiveValue::Set(Utc::now().naive_utc()),
            user_name: ActiveValue::Set(principal.username.clone()),
            action: ActiveValue::Set(action.to_string()),
            changed_object_app: ActiveValue::Set(app.to_string()),
            changed_object_type: ActiveValue::Set(object_type.to_string()),
            changed_object_id: ActiveValue::Set(object_id),
            object_repr: ActiveValue::Set(object_repr),
            object_data: ActiveValue::Set(object_data),
            ..Default::default()
        };

        entry.insert(self.db).await?;

        Ok(())
    }
}

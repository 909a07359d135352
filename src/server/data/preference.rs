use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter,
};

pub struct PreferenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PreferenceRepository<'a> {
    /// Creates a new instance of [`PreferenceRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the stored configuration for one user and table, if any.
    pub async fn get(
        &self,
        user_name: &str,
        table_name: &str,
    ) -> Result<Option<entity::user_preference::Model>, DbErr> {
        entity::prelude::UserPreference::find()
            .filter(entity::user_preference::Column::UserName.eq(user_name))
            .filter(entity::user_preference::Column::TableName.eq(table_name))
            .one(self.db)
            .await
    }

    /// Stores the configuration for one user and table, replacing any
    /// previous row for the pair.
    pub async fn set(
        &self,
        user_name: &str,
        table_name: &str,
        columns: Option<Vec<String>>,
        sort: Option<Vec<String>>,
        per_page: Option<i32>,
    ) -> Result<entity::user_preference::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let columns = columns.map(|columns| serde_json::json!(columns));
        let sort = sort.map(|sort| serde_json::json!(sort));

        match self.get(user_name, table_name).await? {
            Some(existing) => {
                let mut preference = existing.into_active_model();
                preference.columns = ActiveValue::Set(columns);
                preference.sort = ActiveValue::Set(sort);
                preference.per_page = ActiveValue::Set(per_page);
                preference.updated_at = ActiveValue::Set(now);

                preference.update(self.db).await
            }
            None => {
                let preference = entity::user_preference::ActiveModel {
                    user_name: ActiveValue::Set(user_name.to_string()),
                    table_name: ActiveValue::Set(table_name.to_string()),
                    columns: ActiveValue::Set(columns),
                    sort: ActiveValue::Set(sort),
                    per_page: ActiveValue::Set(per_page),
                    created_at: ActiveValue::Set(now),
                    updated_at: ActiveValue::Set(now),
                    ..Default::default()
                };

                preference.insert(self.db).await
            }
        }
    }

    /// Deserializes a stored JSON string list column.
    pub fn string_list(value: Option<&serde_json::Value>) -> Option<Vec<String>> {
        value.and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

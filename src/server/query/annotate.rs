//! Count annotations.
//!
//! An annotation is a derived value attached to serialized records for the
//! duration of one request, never stored. Counts are fetched as one grouped
//! query per annotation and merged onto the records by primary key, which
//! keeps application idempotent and independent of annotation order.

use std::collections::HashMap;

use futures::future::BoxFuture;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QuerySelect};
use serde_json::Value;

/// Fetches a `record id -> count` map for one annotation.
pub type AnnotationFetch =
    for<'a> fn(&'a DatabaseConnection) -> BoxFuture<'a, Result<HashMap<i32, i64>, DbErr>>;

pub struct CountAnnotation {
    /// Key the count is merged under, e.g. `device_count`.
    pub name: &'static str,
    pub fetch: AnnotationFetch,
}

impl CountAnnotation {
    pub fn new(name: &'static str, fetch: AnnotationFetch) -> Self {
        Self { name, fetch }
    }
}

/// Groups `E` by a foreign-key column and counts rows per key.
pub async fn count_by<E, C>(db: &DatabaseConnection, column: C) -> Result<HashMap<i32, i64>, DbErr>
where
    E: EntityTrait,
    C: ColumnTrait + Copy,
{
    let rows: Vec<(Option<i32>, i64)> = E::find()
        .select_only()
        .column(column)
        .column_as(column.count(), "count")
        .group_by(column)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(key, count)| key.map(|key| (key, count)))
        .collect())
}

/// Merges a fetched count map onto serialized records; records without a
/// matching key get an explicit zero.
pub fn merge(records: &mut [Value], name: &str, counts: &HashMap<i32, i64>) {
    for record in records.iter_mut() {
        let id = record
            .get("id")
            .and_then(Value::as_i64)
            .map(|id| id as i32);

        if let (Some(id), Some(map)) = (id, record.as_object_mut()) {
            map.insert(
                name.to_string(),
                Value::from(counts.get(&id).copied().unwrap_or(0)),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    #[test]
    fn merge_attaches_counts_and_zero_fills() {
        let mut records = vec![json!({"id": 1}), json!({"id": 2})];
        let counts = HashMap::from([(1, 4_i64)]);

        super::merge(&mut records, "device_count", &counts);

        assert_eq!(records[0]["device_count"], 4);
        assert_eq!(records[1]["device_count"], 0);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut records = vec![json!({"id": 7})];
        let counts = HashMap::from([(7, 2_i64)]);

        super::merge(&mut records, "vm_count", &counts);
        super::merge(&mut records, "vm_count", &counts);

        assert_eq!(records[0]["vm_count"], 2);
    }
}

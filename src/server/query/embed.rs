//! Related-record embedding.
//!
//! Table columns may reach across a relation (`site.name` on a rack row).
//! Records are serialized flat, so the owning object type declares which
//! related records to embed: the related rows are fetched once per request
//! and inserted under the declared key, where the accessor walker finds
//! them. A null foreign key simply leaves the key absent.

use std::collections::{BTreeSet, HashMap};

use futures::future::BoxFuture;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PrimaryKeyToColumn, QueryFilter};
use sea_orm::Iterable;
use serde_json::Value;

/// Fetches related records as `related id -> serialized record`.
pub type EmbedFetch = for<'a> fn(
    &'a DatabaseConnection,
    Vec<i32>,
) -> BoxFuture<'a, Result<HashMap<i32, Value>, DbErr>>;

pub struct RelatedEmbed {
    /// Key the related record is embedded under, e.g. `site`.
    pub key: &'static str,
    /// Foreign-key field on the owning record, e.g. `site_id`.
    pub fk_field: &'static str,
    pub fetch: EmbedFetch,
}

impl RelatedEmbed {
    pub fn new(key: &'static str, fk_field: &'static str, fetch: EmbedFetch) -> Self {
        Self { key, fk_field, fetch }
    }
}

/// Loads `E` records by primary key and serializes them, keyed by id.
pub async fn by_id<E>(db: &DatabaseConnection, ids: Vec<i32>) -> Result<HashMap<i32, Value>, DbErr>
where
    E: EntityTrait,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let Some(pk) = E::PrimaryKey::iter().next() else {
        return Ok(HashMap::new());
    };
    let column = pk.into_column();

    let rows = E::find().filter(column.is_in(ids)).into_json().all(db).await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            row.get("id")
                .and_then(Value::as_i64)
                .map(|id| (id as i32, row))
        })
        .collect())
}

/// Resolves every declared embed for a batch of records.
pub async fn attach(
    db: &DatabaseConnection,
    records: &mut [Value],
    embeds: &[RelatedEmbed],
) -> Result<(), DbErr> {
    for embed in embeds {
        let ids: BTreeSet<i32> = records
            .iter()
            .filter_map(|record| record.get(embed.fk_field).and_then(Value::as_i64))
            .map(|id| id as i32)
            .collect();

        let related = (embed.fetch)(db, ids.into_iter().collect()).await?;

        for record in records.iter_mut() {
            let fk = record
                .get(embed.fk_field)
                .and_then(Value::as_i64)
                .map(|id| id as i32);

            let value = fk.and_then(|fk| related.get(&fk).cloned());
            if let (Some(value), Some(map)) = (value, record.as_object_mut()) {
                map.insert(embed.key.to_string(), value);
            }
        }
    }

    Ok(())
}

//! The generic view set.
//!
//! Every inventory type plugs into the same operation templates — List,
//! Detail, create/update, Delete, the bulk operations, and parent-scoped
//! child listings — by implementing [`ObjectType`]: a declarative bundle of
//! entity, table schema, filter schema, annotations, embeds, validation,
//! and protected-relation hooks. The operations themselves live in
//! [`views::Views`]; [`registry::ViewRegistry`] erases the types so HTTP
//! handlers can dispatch on `{app}/{type}` path segments.

pub mod children;
pub mod form;
pub mod registry;
pub mod views;

use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::{Condition, DatabaseTransaction, DbErr, EntityTrait, Select};
use serde_json::{Map, Value};

use crate::server::error::{Dependent, Error, ValidationErrors};
use crate::server::query::annotate::CountAnnotation;
use crate::server::query::embed::RelatedEmbed;
use crate::server::query::filter::FilterSchema;
use crate::server::table::schema::TableSchema;

/// Every operation the framework offers.
pub static FULL_ACTIONS: &[&str] = &[
    "list",
    "detail",
    "create",
    "update",
    "delete",
    "bulk_import",
    "bulk_edit",
    "bulk_delete",
    "bulk_rename",
];

/// For types that are recorded, never edited (e.g. the change log).
pub static READ_ONLY_ACTIONS: &[&str] = &["list", "detail"];

/// Declarative configuration of one inventory type.
///
/// Implementations are stateless markers; all configuration is associated
/// data. Hooks with default bodies are overridden only where a type has
/// something to add.
#[async_trait]
pub trait ObjectType: Send + Sync + 'static {
    type Entity: EntityTrait;
    type ActiveModel: sea_orm::ActiveModelTrait<Entity = Self::Entity>
        + sea_orm::ActiveModelBehavior
        + Default
        + Send;

    /// Application the type belongs to, e.g. `virtualization`.
    const APP: &'static str;
    /// Type token used in URLs and permission strings, e.g. `cluster`.
    const NAME: &'static str;
    /// Human-readable singular name, e.g. `cluster`.
    const VERBOSE_NAME: &'static str;
    /// Human-readable plural name, e.g. `clusters`.
    const VERBOSE_NAME_PLURAL: &'static str;

    fn table() -> &'static TableSchema;
    fn filters() -> &'static FilterSchema;

    /// Derived counts merged onto serialized records per request.
    fn annotations() -> &'static [CountAnnotation] {
        &[]
    }

    /// Related records embedded for accessor hops across relations.
    fn embeds() -> &'static [RelatedEmbed] {
        &[]
    }

    /// Free-text search condition, when the type supports `q`.
    fn search(_term: &str) -> Option<Condition> {
        None
    }

    /// The operations this type permits.
    fn actions() -> &'static [&'static str] {
        FULL_ACTIONS
    }

    /// Field renamed by BulkRename; `None` disables the operation.
    fn name_field() -> Option<&'static str> {
        Some("name")
    }

    /// Base query every operation starts from.
    fn base_query() -> Select<Self::Entity> {
        Self::Entity::find()
    }

    /// Short display form of a serialized record.
    fn repr(record: &Value) -> String {
        record
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| {
                format!(
                    "{} #{}",
                    Self::VERBOSE_NAME,
                    record.get("id").and_then(Value::as_i64).unwrap_or_default()
                )
            })
    }

    /// Qualified type key, e.g. `virtualization.cluster`.
    fn type_key() -> String {
        format!("{}.{}", Self::APP, Self::NAME)
    }

    /// URL path prefix, e.g. `virtualization/cluster`.
    fn object_path() -> String {
        format!("{}/{}", Self::APP, Self::NAME)
    }

    /// Permission token for an action verb, e.g. `virtualization.view_cluster`.
    fn permission(action: &str) -> String {
        format!("{}.{}_{}", Self::APP, action, Self::NAME)
    }

    /// Applies a field map to the active model, setting exactly the fields
    /// the map carries. The entity-specific form of the Edit operations.
    fn apply(
        model: &mut Self::ActiveModel,
        input: &Map<String, Value>,
    ) -> Result<(), ValidationErrors>;

    /// Validates a field map against the entity schema.
    ///
    /// `existing` carries the key of the record being updated so uniqueness
    /// checks can exclude it. Runs inside the operation's transaction.
    /// Schema violations surface as [`Error::Validation`].
    async fn validate(
        _db: &DatabaseTransaction,
        _input: &Map<String, Value>,
        _existing: Option<i32>,
    ) -> Result<(), Error> {
        Ok(())
    }

    /// Records blocking deletion of `id` through protected relations.
    async fn dependents(_db: &DatabaseTransaction, _id: i32) -> Result<Vec<Dependent>, DbErr> {
        Ok(Vec::new())
    }
}

/// Validated, parsed list-request parameters.
///
/// Reserved keys (`q`, `sort`, `columns`, `page`, `per_page`) are split off;
/// everything else is filter criteria for the type's filter schema.
#[derive(Debug, Default, Clone)]
pub struct ListParams {
    pub filters: BTreeMap<String, Vec<String>>,
    pub q: Option<String>,
    pub sort: Vec<String>,
    pub columns: Option<Vec<String>>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl ListParams {
    /// Parses raw query pairs; repeated filter keys accumulate.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, Error> {
        let mut params = Self::default();
        let mut errors = ValidationErrors::new();

        for (key, value) in pairs {
            match key.as_str() {
                "q" => params.q = Some(value),
                "sort" => params
                    .sort
                    .extend(split_list(&value)),
                "columns" => params
                    .columns
                    .get_or_insert_with(Vec::new)
                    .extend(split_list(&value)),
                "page" => match value.parse() {
                    Ok(page) => params.page = Some(page),
                    Err(_) => errors.add("page", format!("Invalid page number: {value:?}")),
                },
                "per_page" => match value.parse() {
                    Ok(per_page) => params.per_page = Some(per_page),
                    Err(_) => errors.add("per_page", format!("Invalid page size: {value:?}")),
                },
                _ => params.filters.entry(key).or_default().push(value),
            }
        }

        errors.into_result()?;

        Ok(params)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::ListParams;

    #[test]
    fn reserved_keys_are_split_from_filters() {
        let params = ListParams::from_pairs(vec![
            ("status".to_string(), "active".to_string()),
            ("status".to_string(), "planned".to_string()),
            ("sort".to_string(), "name,-site".to_string()),
            ("page".to_string(), "2".to_string()),
            ("q".to_string(), "edge".to_string()),
        ])
        .unwrap();

        assert_eq!(params.filters["status"], vec!["active", "planned"]);
        assert_eq!(params.sort, vec!["name", "-site"]);
        assert_eq!(params.page, Some(2));
        assert_eq!(params.q.as_deref(), Some("edge"));
    }

    #[test]
    fn invalid_page_is_a_validation_error() {
        let result =
            ListParams::from_pairs(vec![("page".to_string(), "second".to_string())]);

        assert!(result.is_err());
    }
}

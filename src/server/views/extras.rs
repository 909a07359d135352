//! View configuration for the extras application: tags, custom fields,
//! webhooks, journal entries, and the read-only object change log.

use async_trait::async_trait;
use sea_orm::{ActiveValue, ColumnTrait, Condition, DatabaseTransaction, EntityTrait, QueryFilter};
use serde_json::{Map, Value};

use crate::server::error::{Error, ValidationErrors};
use crate::server::filters::extras as filters;
use crate::server::generic::form::{require_present, FieldMap};
use crate::server::generic::{ObjectType, READ_ONLY_ACTIONS};
use crate::server::query::filter;
use crate::server::query::filter::FilterSchema;
use crate::server::table::schema::TableSchema;
use crate::server::tables::extras as tables;
use crate::server::views::check_choice;

pub static CUSTOM_FIELD_TYPES: &[&str] =
    &["text", "integer", "boolean", "date", "url", "select"];
pub static WEBHOOK_HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];
pub static JOURNAL_KINDS: &[&str] = &["info", "success", "warning", "danger"];

pub struct Tags;

#[async_trait]
impl ObjectType for Tags {
    type Entity = entity::tag::Entity;
    type ActiveModel = entity::tag::ActiveModel;

    const APP: &'static str = "extras";
    const NAME: &'static str = "tag";
    const VERBOSE_NAME: &'static str = "tag";
    const VERBOSE_NAME_PLURAL: &'static str = "tags";

    fn table() -> &'static TableSchema {
        &tables::TAG_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::TAG_FILTERS
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[entity::tag::Column::Name, entity::tag::Column::Description],
            term,
        ))
    }

    fn apply(
        model: &mut Self::ActiveModel,
        input: &Map<String, Value>,
    ) -> Result<(), ValidationErrors> {
        let mut fields = FieldMap::new(input);

        if let Some(name) = fields.string("name") {
            model.name = ActiveValue::Set(name);
        }
        if let Some(slug) = fields.string("slug") {
            model.slug = ActiveValue::Set(slug);
        }
        if let Some(color) = fields.string("color") {
            model.color = ActiveValue::Set(color);
        }
        if let Some(description) = fields.string("description") {
            model.description = ActiveValue::Set(description);
        }

        fields.finish()
    }

    async fn validate(
        db: &DatabaseTransaction,
        input: &Map<String, Value>,
        existing: Option<i32>,
    ) -> Result<(), Error> {
        let mut errors = ValidationErrors::new();

        if existing.is_none() {
            require_present(input, &["name", "slug"], &mut errors);
        }

        if let Some(name) = input.get("name").and_then(Value::as_str) {
            let duplicate = entity::prelude::Tag::find()
                .filter(entity::tag::Column::Name.eq(name))
                .one(db)
                .await?;
            if duplicate.is_some_and(|found| Some(found.id) != existing) {
                errors.add("name", "A tag with this name already exists.");
            }
        }

        errors.into_result()
    }
}

pub struct CustomFields;

#[async_trait]
impl ObjectType for CustomFields {
    type Entity = entity::custom_field::Entity;
    type ActiveModel = entity::custom_field::ActiveModel;

    const APP: &'static str = "extras";
    const NAME: &'static str = "custom_field";
    const VERBOSE_NAME: &'static str = "custom field";
    const VERBOSE_NAME_PLURAL: &'static str = "custom fields";

    fn table() -> &'static TableSchema {
        &tables::CUSTOM_FIELD_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::CUSTOM_FIELD_FILTERS
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::custom_field::Column::Name,
                entity::custom_field::Column::Label,
                entity::custom_field::Column::Description,
            ],
            term,
        ))
    }

    fn apply(
        model: &mut Self::ActiveModel,
        input: &Map<String, Value>,
    ) -> Result<(), ValidationErrors> {
        let mut fields = FieldMap::new(input);

        if let Some(name) = fields.string("name") {
            model.name = ActiveValue::Set(name);
        }
        if let Some(label) = fields.string("label") {
            model.label = ActiveValue::Set(label);
        }
        if let Some(field_type) = fields.string("field_type") {
            model.field_type = ActiveValue::Set(field_type);
        }
        if let Some(required) = fields.boolean("required") {
            model.required = ActiveValue::Set(required);
        }
        if let Some(weight) = fields.integer("weight") {
            model.weight = ActiveValue::Set(weight);
        }
        if let Some(default_value) = fields.opt_string("default_value") {
            model.default_value = ActiveValue::Set(default_value);
        }
        if let Some(description) = fields.string("description") {
            model.description = ActiveValue::Set(description);
        }

        fields.finish()
    }

    async fn validate(
        _db: &DatabaseTransaction,
        input: &Map<String, Value>,
        existing: Option<i32>,
    ) -> Result<(), Error> {
        let mut errors = ValidationErrors::new();

        if existing.is_none() {
            require_present(input, &["name", "field_type"], &mut errors);
        }
        check_choice(input, "field_type", CUSTOM_FIELD_TYPES, &mut errors);

        errors.into_result()
    }
}

pub struct Webhooks;

#[async_trait]
impl ObjectType for Webhooks {
    type Entity = entity::webhook::Entity;
    type ActiveModel = entity::webhook::ActiveModel;

    const APP: &'static str = "extras";
    const NAME: &'static str = "webhook";
    const VERBOSE_NAME: &'static str = "webhook";
    const VERBOSE_NAME_PLURAL: &'static str = "webhooks";

    fn table() -> &'static TableSchema {
        &tables::WEBHOOK_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::WEBHOOK_FILTERS
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::webhook::Column::Name,
                entity::webhook::Column::PayloadUrl,
            ],
            term,
        ))
    }

    fn apply(
        model: &mut Self::ActiveModel,
        input: &Map<String, Value>,
    ) -> Result<(), ValidationErrors> {
        let mut fields = FieldMap::new(input);

        if let Some(name) = fields.string("name") {
            model.name = ActiveValue::Set(name);
        }
        if let Some(enabled) = fields.boolean("enabled") {
            model.enabled = ActiveValue::Set(enabled);
        }
        if let Some(type_create) = fields.boolean("type_create") {
            model.type_create = ActiveValue::Set(type_create);
        }
        if let Some(type_update) = fields.boolean("type_update") {
            model.type_update = ActiveValue::Set(type_update);
        }
        if let Some(type_delete) = fields.boolean("type_delete") {
            model.type_delete = ActiveValue::Set(type_delete);
        }
        if let Some(http_method) = fields.string("http_method") {
            model.http_method = ActiveValue::Set(http_method);
        }
        if let Some(payload_url) = fields.string("payload_url") {
            model.payload_url = ActiveValue::Set(payload_url);
        }
        if let Some(ssl_validation) = fields.boolean("ssl_validation") {
            model.ssl_validation = ActiveValue::Set(ssl_validation);
        }

        fields.finish()
    }

    async fn validate(
        _db: &DatabaseTransaction,
        input: &Map<String, Value>,
        existing: Option<i32>,
    ) -> Result<(), Error> {
        let mut errors = ValidationErrors::new();

        if existing.is_none() {
            require_present(input, &["name", "payload_url"], &mut errors);
        }
        check_choice(input, "http_method", WEBHOOK_HTTP_METHODS, &mut errors);

        errors.into_result()
    }
}

pub struct JournalEntries;

#[async_trait]
impl ObjectType for JournalEntries {
    type Entity = entity::journal_entry::Entity;
    type ActiveModel = entity::journal_entry::ActiveModel;

    const APP: &'static str = "extras";
    const NAME: &'static str = "journal_entry";
    const VERBOSE_NAME: &'static str = "journal entry";
    const VERBOSE_NAME_PLURAL: &'static str = "journal entries";

    fn table() -> &'static TableSchema {
        &tables::JOURNAL_ENTRY_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::JOURNAL_ENTRY_FILTERS
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[entity::journal_entry::Column::Comments],
            term,
        ))
    }

    fn name_field() -> Option<&'static str> {
        None
    }

    fn apply(
        model: &mut Self::ActiveModel,
        input: &Map<String, Value>,
    ) -> Result<(), ValidationErrors> {
        let mut fields = FieldMap::new(input);

        if let Some(app) = fields.string("assigned_object_app") {
            model.assigned_object_app = ActiveValue::Set(app);
        }
        if let Some(object_type) = fields.string("assigned_object_type") {
            model.assigned_object_type = ActiveValue::Set(object_type);
        }
        if let Some(object_id) = fields.integer("assigned_object_id") {
            model.assigned_object_id = ActiveValue::Set(object_id);
        }
        if let Some(created_by) = fields.string("created_by") {
            model.created_by = ActiveValue::Set(created_by);
        }
        if let Some(kind) = fields.string("kind") {
            model.kind = ActiveValue::Set(kind);
        }
        if let Some(comments) = fields.string("comments") {
            model.comments = ActiveValue::Set(comments);
        }

        fields.finish()
    }

    async fn validate(
        _db: &DatabaseTransaction,
        input: &Map<String, Value>,
        existing: Option<i32>,
    ) -> Result<(), Error> {
        let mut errors = ValidationErrors::new();

        if existing.is_none() {
            require_present(
                input,
                &[
                    "assigned_object_app",
                    "assigned_object_type",
                    "assigned_object_id",
                    "created_by",
                    "comments",
                ],
                &mut errors,
            );
        }
        check_choice(input, "kind", JOURNAL_KINDS, &mut errors);

        errors.into_result()
    }
}

pub struct ObjectChanges;

#[async_trait]
impl ObjectType for ObjectChanges {
    type Entity = entity::object_change::Entity;
    type ActiveModel = entity::object_change::ActiveModel;

    const APP: &'static str = "extras";
    const NAME: &'static str = "object_change";
    const VERBOSE_NAME: &'static str = "object change";
    const VERBOSE_NAME_PLURAL: &'static str = "object changes";

    fn table() -> &'static TableSchema {
        &tables::OBJECT_CHANGE_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::OBJECT_CHANGE_FILTERS
    }

    // The change log is written by mutating operations, never by hand.
    fn actions() -> &'static [&'static str] {
        READ_ONLY_ACTIONS
    }

    fn name_field() -> Option<&'static str> {
        None
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::object_change::Column::ObjectRepr,
                entity::object_change::Column::UserName,
            ],
            term,
        ))
    }

    fn repr(record: &Value) -> String {
        record
            .get("object_repr")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn apply(
        _model: &mut Self::ActiveModel,
        _input: &Map<String, Value>,
    ) -> Result<(), ValidationErrors> {
        // Unreachable through the view layer; every mutating action is
        // rejected by the action gate above.
        Ok(())
    }
}

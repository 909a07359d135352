use std::sync::LazyLock;

use crate::server::query::filter::{self, FilterField, FilterSchema};

pub static TAG_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![FilterField::new("slug", |values| {
        filter::string(entity::tag::Column::Slug, values)
    })])
});

pub static CUSTOM_FIELD_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("field_type", |values| {
            filter::string(entity::custom_field::Column::FieldType, values)
        }),
        FilterField::new("required", |values| {
            filter::boolean(entity::custom_field::Column::Required, values)
        }),
    ])
});

pub static WEBHOOK_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("enabled", |values| {
            filter::boolean(entity::webhook::Column::Enabled, values)
        }),
        FilterField::new("http_method", |values| {
            filter::string(entity::webhook::Column::HttpMethod, values)
        }),
    ])
});

pub static JOURNAL_ENTRY_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("assigned_object_app", |values| {
            filter::string(entity::journal_entry::Column::AssignedObjectApp, values)
        }),
        FilterField::new("assigned_object_type", |values| {
            filter::string(entity::journal_entry::Column::AssignedObjectType, values)
        }),
        FilterField::new("assigned_object_id", |values| {
            filter::integer(entity::journal_entry::Column::AssignedObjectId, values)
        }),
        FilterField::new("kind", |values| {
            filter::string(entity::journal_entry::Column::Kind, values)
        }),
        FilterField::new("created_by", |values| {
            filter::string(entity::journal_entry::Column::CreatedBy, values)
        }),
    ])
});

pub static OBJECT_CHANGE_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("user_name", |values| {
            filter::string(entity::object_change::Column::UserName, values)
        }),
        FilterField::new("action", |values| {
            filter::string(entity::object_change::Column::Action, values)
        }),
        FilterField::new("changed_object_app", |values| {
            filter::string(entity::object_change::Column::ChangedObjectApp, values)
        }),
        FilterField::new("changed_object_type", |values| {
            filter::string(entity::object_change::Column::ChangedObjectType, values)
        }),
        FilterField::new("changed_object_id", |values| {
            filter::integer(entity::object_change::Column::ChangedObjectId, values)
        }),
    ])
});

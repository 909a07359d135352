use std::sync::LazyLock;

use crate::server::table::column::{CellKind, ColumnDescriptor};
use crate::server::table::schema::TableSchema;

pub static TAG_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "extras.tag",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("extras/tag", &["id"])
                .default_visible(),
            ColumnDescriptor::new("color", "Color", &["color"])
                .kind(CellKind::Color)
                .default_visible(),
            ColumnDescriptor::new("description", "Description", &["description"])
                .default_visible(),
            ColumnDescriptor::new("slug", "Slug", &["slug"]),
        ],
    )
});

pub static CUSTOM_FIELD_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "extras.custom_field",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("extras/custom_field", &["id"])
                .default_visible(),
            ColumnDescriptor::new("label", "Label", &["label"]).default_visible(),
            ColumnDescriptor::new("field_type", "Type", &["field_type"]).default_visible(),
            ColumnDescriptor::new("required", "Required", &["required"])
                .kind(CellKind::Boolean)
                .default_visible(),
            ColumnDescriptor::new("description", "Description", &["description"])
                .default_visible(),
            ColumnDescriptor::new("weight", "Weight", &["weight"]),
            ColumnDescriptor::new("default_value", "Default", &["default_value"]),
        ],
    )
});

pub static WEBHOOK_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "extras.webhook",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("extras/webhook", &["id"])
                .default_visible(),
            ColumnDescriptor::new("enabled", "Enabled", &["enabled"])
                .kind(CellKind::Boolean)
                .default_visible(),
            ColumnDescriptor::new("type_create", "Create", &["type_create"])
                .kind(CellKind::Boolean)
                .default_visible(),
            ColumnDescriptor::new("type_update", "Update", &["type_update"])
                .kind(CellKind::Boolean)
                .default_visible(),
            ColumnDescriptor::new("type_delete", "Delete", &["type_delete"])
                .kind(CellKind::Boolean)
                .default_visible(),
            ColumnDescriptor::new("http_method", "HTTP Method", &["http_method"])
                .default_visible(),
            ColumnDescriptor::new("payload_url", "URL", &["payload_url"]).default_visible(),
            ColumnDescriptor::new("ssl_validation", "SSL Validation", &["ssl_validation"])
                .kind(CellKind::Boolean),
        ],
    )
});

pub static JOURNAL_ENTRY_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "extras.journal_entry",
        vec![
            ColumnDescriptor::new("created_at", "Created", &["created_at"]).default_visible(),
            ColumnDescriptor::new("created_by", "Created By", &["created_by"])
                .default_visible(),
            ColumnDescriptor::new("assigned_object_type", "Object Type", &["assigned_object_type"])
                .default_visible(),
            ColumnDescriptor::new("assigned_object_id", "Object ID", &["assigned_object_id"])
                .default_visible(),
            ColumnDescriptor::new("kind", "Kind", &["kind"]).default_visible(),
            ColumnDescriptor::new("comments", "Comments", &["comments"]).default_visible(),
            ColumnDescriptor::new("assigned_object_app", "Object App", &["assigned_object_app"]),
        ],
    )
});

pub static OBJECT_CHANGE_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "extras.object_change",
        vec![
            ColumnDescriptor::new("time", "Time", &["time"]).default_visible(),
            ColumnDescriptor::new("user_name", "User", &["user_name"]).default_visible(),
            ColumnDescriptor::new("action", "Action", &["action"]).default_visible(),
            ColumnDescriptor::new(
                "changed_object_type",
                "Type",
                &["changed_object_type"],
            )
            .default_visible(),
            ColumnDescriptor::new("object_repr", "Object", &["object_repr"])
                .not_orderable()
                .default_visible(),
            ColumnDescriptor::new("changed_object_app", "App", &["changed_object_app"]),
            ColumnDescriptor::new("changed_object_id", "Object ID", &["changed_object_id"]),
        ],
    )
});

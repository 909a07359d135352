use std::sync::LazyLock;

use crate::server::table::column::{CellKind, ColumnDescriptor};
use crate::server::table::schema::TableSchema;

pub static SITE_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "dcim.site",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("dcim/site", &["id"])
                .default_visible(),
            ColumnDescriptor::new("slug", "Slug", &["slug"]).default_visible(),
            ColumnDescriptor::new("rack_count", "Racks", &["rack_count"])
                .kind(CellKind::Count {
                    list_path: "dcim/rack",
                    filter_param: "site_id",
                })
                .default_visible(),
            ColumnDescriptor::new("device_count", "Devices", &["device_count"])
                .kind(CellKind::Count {
                    list_path: "dcim/device",
                    filter_param: "site_id",
                })
                .default_visible(),
            ColumnDescriptor::new("description", "Description", &["description"])
                .default_visible(),
        ],
    )
});

pub static RACK_ROLE_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "dcim.rack_role",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("dcim/rack_role", &["id"])
                .default_visible(),
            ColumnDescriptor::new("rack_count", "Racks", &["rack_count"])
                .kind(CellKind::Count {
                    list_path: "dcim/rack",
                    filter_param: "role_id",
                })
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

pub static RACK_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "dcim.rack",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("dcim/rack", &["id"])
                .default_visible(),
            ColumnDescriptor::new("site", "Site", &["site", "name"])
                .linked("dcim/site", &["site", "id"])
                .default_visible(),
            ColumnDescriptor::new("status", "Status", &["status"]).default_visible(),
            ColumnDescriptor::new("role", "Role", &["role", "name"])
                .linked("dcim/rack_role", &["role", "id"])
                .default_visible(),
            ColumnDescriptor::new("u_height", "Height", &["u_height"]).default_visible(),
            ColumnDescriptor::new("device_count", "Devices", &["device_count"])
                .kind(CellKind::Count {
                    list_path: "dcim/device",
                    filter_param: "rack_id",
                })
                .default_visible(),
            ColumnDescriptor::new("comments", "Comments", &["comments"]),
        ],
    )
});

pub static DEVICE_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "dcim.device",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("dcim/device", &["id"])
                .default_visible(),
            ColumnDescriptor::new("site", "Site", &["site", "name"])
                .linked("dcim/site", &["site", "id"])
                .default_visible(),
            ColumnDescriptor::new("rack", "Rack", &["rack", "name"])
                .linked("dcim/rack", &["rack", "id"])
                .default_visible(),
            ColumnDescriptor::new("cluster", "Cluster", &["cluster", "name"])
                .linked("virtualization/cluster", &["cluster", "id"])
                .default_visible(),
        ],
    )
});

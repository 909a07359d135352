use std::sync::LazyLock;

use crate::server::table::column::{CellKind, ColumnDescriptor};
use crate::server::table::schema::TableSchema;

pub static CLUSTER_TYPE_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "virtualization.cluster_type",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("virtualization/cluster_type", &["id"])
                .default_visible(),
            ColumnDescriptor::new("cluster_count", "Clusters", &["cluster_count"])
                .kind(CellKind::Count {
                    list_path: "virtualization/cluster",
                    filter_param: "cluster_type_id",
                })
                .default_visible(),
            ColumnDescriptor::new("description", "Description", &["description"])
                .default_visible(),
            ColumnDescriptor::new("slug", "Slug", &["slug"]),
        ],
    )
});

pub static CLUSTER_GROUP_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "virtualization.cluster_group",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("virtualization/cluster_group", &["id"])
                .default_visible(),
            ColumnDescriptor::new("cluster_count", "Clusters", &["cluster_count"])
                .kind(CellKind::Count {
                    list_path: "virtualization/cluster",
                    filter_param: "cluster_group_id",
                })
                .default_visible(),
            ColumnDescriptor::new("description", "Description", &["description"])
                .default_visible(),
            ColumnDescriptor::new("slug", "Slug", &["slug"]),
        ],
    )
});

pub static CLUSTER_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "virtualization.cluster",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("virtualization/cluster", &["id"])
                .default_visible(),
            ColumnDescriptor::new("type", "Type", &["cluster_type", "name"])
                .linked("virtualization/cluster_type", &["cluster_type", "id"])
                .default_visible(),
            ColumnDescriptor::new("group", "Group", &["cluster_group", "name"])
                .linked("virtualization/cluster_group", &["cluster_group", "id"])
                .default_visible(),
            ColumnDescriptor::new("status", "Status", &["status"]).default_visible(),
            ColumnDescriptor::new("device_count", "Devices", &["device_count"])
                .kind(CellKind::Count {
                    list_path: "dcim/device",
                    filter_param: "cluster_id",
                })
                .default_visible(),
            ColumnDescriptor::new("vm_count", "VMs", &["vm_count"])
                .kind(CellKind::Count {
                    list_path: "virtualization/virtual_machine",
                    filter_param: "cluster_id",
                })
                .default_visible(),
            ColumnDescriptor::new("comments", "Comments", &["comments"]),
        ],
    )
});

pub static VIRTUAL_MACHINE_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "virtualization.virtual_machine",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("virtualization/virtual_machine", &["id"])
                .default_visible(),
            ColumnDescriptor::new("status", "Status", &["status"]).default_visible(),
            ColumnDescriptor::new("cluster", "Cluster", &["cluster", "name"])
                .linked("virtualization/cluster", &["cluster", "id"])
                .default_visible(),
            ColumnDescriptor::new("vcpus", "vCPUs", &["vcpus"]).default_visible(),
            ColumnDescriptor::new("memory_mb", "Memory (MB)", &["memory_mb"]).default_visible(),
            ColumnDescriptor::new("disk_gb", "Disk (GB)", &["disk_gb"]).default_visible(),
            ColumnDescriptor::new("interface_count", "Interfaces", &["interface_count"]).kind(
                CellKind::Count {
                    list_path: "virtualization/vm_interface",
                    filter_param: "virtual_machine_id",
                },
            ),
            ColumnDescriptor::new("comments", "Comments", &["comments"]),
        ],
    )
});

pub static VM_INTERFACE_TABLE: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::new(
        "virtualization.vm_interface",
        vec![
            ColumnDescriptor::new("name", "Name", &["name"])
                .linked("virtualization/vm_interface", &["id"])
                .default_visible(),
            ColumnDescriptor::new(
                "virtual_machine",
                "Virtual Machine",
                &["virtual_machine", "name"],
            )
            .linked("virtualization/virtual_machine", &["virtual_machine", "id"])
            .default_visible(),
            ColumnDescriptor::new("enabled", "Enabled", &["enabled"])
                .kind(CellKind::Boolean)
                .default_visible(),
            ColumnDescriptor::new("mtu", "MTU", &["mtu"]).default_visible(),
            ColumnDescriptor::new("mac_address", "MAC Address", &["mac_address"])
                .default_visible(),
            ColumnDescriptor::new("description", "Description", &["description"]),
        ],
    )
});

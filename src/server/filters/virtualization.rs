use std::sync::LazyLock;

use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, Condition};

use crate::server::query::filter::{self, FilterField, FilterSchema};

pub static CLUSTER_TYPE_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![FilterField::new("slug", |values| {
        filter::string(entity::cluster_type::Column::Slug, values)
    })])
});

pub static CLUSTER_GROUP_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![FilterField::new("slug", |values| {
        filter::string(entity::cluster_group::Column::Slug, values)
    })])
});

pub static CLUSTER_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("cluster_type_id", |values| {
            filter::integer(entity::cluster::Column::ClusterTypeId, values)
        }),
        // Filter by cluster type slug, e.g. `type=core`.
        FilterField::new("type", |values| {
            let subquery = Query::select()
                .column(entity::cluster_type::Column::Id)
                .from(entity::cluster_type::Entity)
                .and_where(entity::cluster_type::Column::Slug.is_in(values.to_vec()))
                .to_owned();

            Ok(Condition::all()
                .add(entity::cluster::Column::ClusterTypeId.in_subquery(subquery)))
        }),
        FilterField::new("cluster_group_id", |values| {
            filter::integer(entity::cluster::Column::ClusterGroupId, values)
        }),
        // Filter by cluster group slug.
        FilterField::new("group", |values| {
            let subquery = Query::select()
                .column(entity::cluster_group::Column::Id)
                .from(entity::cluster_group::Entity)
                .and_where(entity::cluster_group::Column::Slug.is_in(values.to_vec()))
                .to_owned();

            Ok(Condition::all()
                .add(entity::cluster::Column::ClusterGroupId.in_subquery(subquery)))
        }),
        FilterField::new("status", |values| {
            filter::string(entity::cluster::Column::Status, values)
        }),
    ])
});

pub static VIRTUAL_MACHINE_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("cluster_id", |values| {
            filter::integer(entity::virtual_machine::Column::ClusterId, values)
        }),
        FilterField::new("status", |values| {
            filter::string(entity::virtual_machine::Column::Status, values)
        }),
        FilterField::new("name", |values| {
            filter::string(entity::virtual_machine::Column::Name, values)
        }),
    ])
});

pub static VM_INTERFACE_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("virtual_machine_id", |values| {
            filter::integer(entity::vm_interface::Column::VirtualMachineId, values)
        }),
        FilterField::new("enabled", |values| {
            filter::boolean(entity::vm_interface::Column::Enabled, values)
        }),
        FilterField::new("name", |values| {
            filter::string(entity::vm_interface::Column::Name, values)
        }),
    ])
});

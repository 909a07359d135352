use std::sync::LazyLock;

use crate::server::query::filter::{self, FilterField, FilterSchema};

pub static SITE_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("slug", |values| {
            filter::string(entity::site::Column::Slug, values)
        }),
        FilterField::new("name", |values| {
            filter::string(entity::site::Column::Name, values)
        }),
    ])
});

pub static RACK_ROLE_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("slug", |values| {
            filter::string(entity::rack_role::Column::Slug, values)
        }),
        FilterField::new("color", |values| {
            filter::string(entity::rack_role::Column::Color, values)
        }),
    ])
});

pub static RACK_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("site_id", |values| {
            filter::integer(entity::rack::Column::SiteId, values)
        }),
        FilterField::new("role_id", |values| {
            filter::integer(entity::rack::Column::RoleId, values)
        }),
        FilterField::new("status", |values| {
            filter::string(entity::rack::Column::Status, values)
        }),
        FilterField::new("u_height", |values| {
            filter::integer(entity::rack::Column::UHeight, values)
        }),
    ])
});

pub static DEVICE_FILTERS: LazyLock<FilterSchema> = LazyLock::new(|| {
    FilterSchema::new(vec![
        FilterField::new("site_id", |values| {
            filter::integer(entity::device::Column::SiteId, values)
        }),
        FilterField::new("rack_id", |values| {
            filter::integer(entity::device::Column::RackId, values)
        }),
        FilterField::new("cluster_id", |values| {
            filter::integer(entity::device::Column::ClusterId, values)
        }),
    ])
});

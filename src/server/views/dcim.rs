//! View configuration for the dcim application: sites, rack roles, racks,
//! and devices.

use std::sync::LazyLock;

use async_trait::async_trait;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QuerySelect,
};
use serde_json::{Map, Value};

use crate::server::error::{Dependent, Error, ValidationErrors};
use crate::server::filters::dcim as filters;
use crate::server::generic::form::{require_present, FieldMap};
use crate::server::generic::ObjectType;
use crate::server::query::annotate::{self, CountAnnotation};
use crate::server::query::embed::{self, RelatedEmbed};
use crate::server::query::filter;
use crate::server::query::filter::FilterSchema;
use crate::server::table::schema::TableSchema;
use crate::server::tables::dcim as tables;
use crate::server::views::check_choice;

pub static RACK_STATUSES: &[&str] = &["active", "planned", "reserved", "available", "deprecated"];

pub struct Sites;

static SITE_ANNOTATIONS: LazyLock<Vec<CountAnnotation>> = LazyLock::new(|| {
    vec![
        CountAnnotation::new("rack_count", |db| {
            Box::pin(annotate::count_by::<entity::rack::Entity, _>(
                db,
                entity::rack::Column::SiteId,
            ))
        }),
        CountAnnotation::new("device_count", |db| {
            Box::pin(annotate::count_by::<entity::device::Entity, _>(
                db,
                entity::device::Column::SiteId,
            ))
        }),
    ]
});

#[async_trait]
impl ObjectType for Sites {
    type Entity = entity::site::Entity;
    type ActiveModel = entity::site::ActiveModel;

    const APP: &'static str = "dcim";
    const NAME: &'static str = "site";
    const VERBOSE_NAME: &'static str = "site";
    const VERBOSE_NAME_PLURAL: &'static str = "sites";

    fn table() -> &'static TableSchema {
        &tables::SITE_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::SITE_FILTERS
    }

    fn annotations() -> &'static [CountAnnotation] {
        SITE_ANNOTATIONS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::site::Column::Name,
                entity::site::Column::Slug,
                entity::site::Column::Description,
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
        if let Some(slug) = fields.string("slug") {
            model.slug = ActiveValue::Set(slug);
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
            let duplicate = entity::prelude::Site::find()
                .filter(entity::site::Column::Name.eq(name))
                .one(db)
                .await?;
            if duplicate.is_some_and(|found| Some(found.id) != existing) {
                errors.add("name", "A site with this name already exists.");
            }
        }

        errors.into_result()
    }

    async fn dependents(db: &DatabaseTransaction, id: i32) -> Result<Vec<Dependent>, DbErr> {
        let mut dependents = Vec::new();

        for rack in entity::prelude::Rack::find()
            .filter(entity::rack::Column::SiteId.eq(id))
            .limit(10)
            .all(db)
            .await?
        {
            dependents.push(Dependent {
                object_type: "dcim.rack".to_string(),
                id: rack.id,
                repr: rack.name,
            });
        }
        for device in entity::prelude::Device::find()
            .filter(entity::device::Column::SiteId.eq(id))
            .limit(10)
            .all(db)
            .await?
        {
            dependents.push(Dependent {
                object_type: "dcim.device".to_string(),
                id: device.id,
                repr: device.name,
            });
        }

        Ok(dependents)
    }
}

pub struct RackRoles;

static RACK_ROLE_ANNOTATIONS: LazyLock<Vec<CountAnnotation>> = LazyLock::new(|| {
    vec![CountAnnotation::new("rack_count", |db| {
        Box::pin(annotate::count_by::<entity::rack::Entity, _>(
            db,
            entity::rack::Column::RoleId,
        ))
    })]
});

#[async_trait]
impl ObjectType for RackRoles {
    type Entity = entity::rack_role::Entity;
    type ActiveModel = entity::rack_role::ActiveModel;

    const APP: &'static str = "dcim";
    const NAME: &'static str = "rack_role";
    const VERBOSE_NAME: &'static str = "rack role";
    const VERBOSE_NAME_PLURAL: &'static str = "rack roles";

    fn table() -> &'static TableSchema {
        &tables::RACK_ROLE_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::RACK_ROLE_FILTERS
    }

    fn annotations() -> &'static [CountAnnotation] {
        RACK_ROLE_ANNOTATIONS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::rack_role::Column::Name,
                entity::rack_role::Column::Description,
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
        _db: &DatabaseTransaction,
        input: &Map<String, Value>,
        existing: Option<i32>,
    ) -> Result<(), Error> {
        let mut errors = ValidationErrors::new();

        if existing.is_none() {
            require_present(input, &["name", "slug"], &mut errors);
        }

        errors.into_result()
    }
}

pub struct Racks;

static RACK_ANNOTATIONS: LazyLock<Vec<CountAnnotation>> = LazyLock::new(|| {
    vec![CountAnnotation::new("device_count", |db| {
        Box::pin(annotate::count_by::<entity::device::Entity, _>(
            db,
            entity::device::Column::RackId,
        ))
    })]
});

static RACK_EMBEDS: LazyLock<Vec<RelatedEmbed>> = LazyLock::new(|| {
    vec![
        RelatedEmbed::new("site", "site_id", |db, ids| {
            Box::pin(embed::by_id::<entity::site::Entity>(db, ids))
        }),
        RelatedEmbed::new("role", "role_id", |db, ids| {
            Box::pin(embed::by_id::<entity::rack_role::Entity>(db, ids))
        }),
    ]
});

#[async_trait]
impl ObjectType for Racks {
    type Entity = entity::rack::Entity;
    type ActiveModel = entity::rack::ActiveModel;

    const APP: &'static str = "dcim";
    const NAME: &'static str = "rack";
    const VERBOSE_NAME: &'static str = "rack";
    const VERBOSE_NAME_PLURAL: &'static str = "racks";

    fn table() -> &'static TableSchema {
        &tables::RACK_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::RACK_FILTERS
    }

    fn annotations() -> &'static [CountAnnotation] {
        RACK_ANNOTATIONS.as_slice()
    }

    fn embeds() -> &'static [RelatedEmbed] {
        RACK_EMBEDS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[entity::rack::Column::Name, entity::rack::Column::Comments],
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
        if let Some(site_id) = fields.integer("site_id") {
            model.site_id = ActiveValue::Set(site_id);
        }
        if let Some(role_id) = fields.opt_integer("role_id") {
            model.role_id = ActiveValue::Set(role_id);
        }
        if let Some(status) = fields.string("status") {
            model.status = ActiveValue::Set(status);
        }
        if let Some(u_height) = fields.integer("u_height") {
            model.u_height = ActiveValue::Set(u_height);
        }
        if let Some(comments) = fields.string("comments") {
            model.comments = ActiveValue::Set(comments);
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
            require_present(input, &["name", "site_id"], &mut errors);
        }
        check_choice(input, "status", RACK_STATUSES, &mut errors);

        if let Some(site_id) = input.get("site_id").and_then(Value::as_i64) {
            let site = entity::prelude::Site::find_by_id(site_id as i32)
                .one(db)
                .await?;
            if site.is_none() {
                errors.add("site_id", format!("Site {site_id} does not exist."));
            }
        }

        // Rack names are unique within a site.
        let site_scope = match input.get("site_id").and_then(Value::as_i64) {
            Some(site_id) => Some(site_id as i32),
            None => match existing {
                Some(id) => entity::prelude::Rack::find_by_id(id)
                    .one(db)
                    .await?
                    .map(|rack| rack.site_id),
                None => None,
            },
        };
        if let (Some(name), Some(site_id)) =
            (input.get("name").and_then(Value::as_str), site_scope)
        {
            let duplicate = entity::prelude::Rack::find()
                .filter(entity::rack::Column::SiteId.eq(site_id))
                .filter(entity::rack::Column::Name.eq(name))
                .one(db)
                .await?;
            if duplicate.is_some_and(|found| Some(found.id) != existing) {
                errors.add("name", "A rack with this name already exists in the site.");
            }
        }

        errors.into_result()
    }

    async fn dependents(db: &DatabaseTransaction, id: i32) -> Result<Vec<Dependent>, DbErr> {
        let devices = entity::prelude::Device::find()
            .filter(entity::device::Column::RackId.eq(id))
            .limit(10)
            .all(db)
            .await?;

        Ok(devices
            .into_iter()
            .map(|device| Dependent {
                object_type: "dcim.device".to_string(),
                id: device.id,
                repr: device.name,
            })
            .collect())
    }
}

pub struct Devices;

static DEVICE_EMBEDS: LazyLock<Vec<RelatedEmbed>> = LazyLock::new(|| {
    vec![
        RelatedEmbed::new("site", "site_id", |db, ids| {
            Box::pin(embed::by_id::<entity::site::Entity>(db, ids))
        }),
        RelatedEmbed::new("rack", "rack_id", |db, ids| {
            Box::pin(embed::by_id::<entity::rack::Entity>(db, ids))
        }),
        RelatedEmbed::new("cluster", "cluster_id", |db, ids| {
            Box::pin(embed::by_id::<entity::cluster::Entity>(db, ids))
        }),
    ]
});

#[async_trait]
impl ObjectType for Devices {
    type Entity = entity::device::Entity;
    type ActiveModel = entity::device::ActiveModel;

    const APP: &'static str = "dcim";
    const NAME: &'static str = "device";
    const VERBOSE_NAME: &'static str = "device";
    const VERBOSE_NAME_PLURAL: &'static str = "devices";

    fn table() -> &'static TableSchema {
        &tables::DEVICE_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::DEVICE_FILTERS
    }

    fn embeds() -> &'static [RelatedEmbed] {
        DEVICE_EMBEDS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(&[entity::device::Column::Name], term))
    }

    fn apply(
        model: &mut Self::ActiveModel,
        input: &Map<String, Value>,
    ) -> Result<(), ValidationErrors> {
        let mut fields = FieldMap::new(input);

        if let Some(name) = fields.string("name") {
            model.name = ActiveValue::Set(name);
        }
        if let Some(site_id) = fields.integer("site_id") {
            model.site_id = ActiveValue::Set(site_id);
        }
        if let Some(rack_id) = fields.opt_integer("rack_id") {
            model.rack_id = ActiveValue::Set(rack_id);
        }
        if let Some(cluster_id) = fields.opt_integer("cluster_id") {
            model.cluster_id = ActiveValue::Set(cluster_id);
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
            require_present(input, &["name", "site_id"], &mut errors);
        }

        if let Some(site_id) = input.get("site_id").and_then(Value::as_i64) {
            let site = entity::prelude::Site::find_by_id(site_id as i32)
                .one(db)
                .await?;
            if site.is_none() {
                errors.add("site_id", format!("Site {site_id} does not exist."));
            }
        }

        errors.into_result()
    }
}

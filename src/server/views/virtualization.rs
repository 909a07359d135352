//! View configuration for the virtualization application: cluster types,
//! cluster groups, clusters, virtual machines, and VM interfaces.

use std::sync::LazyLock;

use async_trait::async_trait;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QuerySelect,
};
use serde_json::{Map, Value};

use crate::server::error::{Dependent, Error, ValidationErrors};
use crate::server::filters::virtualization as filters;
use crate::server::generic::form::{require_present, FieldMap};
use crate::server::generic::ObjectType;
use crate::server::query::annotate::{self, CountAnnotation};
use crate::server::query::embed::{self, RelatedEmbed};
use crate::server::query::filter;
use crate::server::query::filter::FilterSchema;
use crate::server::table::schema::TableSchema;
use crate::server::tables::virtualization as tables;
use crate::server::views::check_choice;

pub static CLUSTER_STATUSES: &[&str] =
    &["active", "planned", "staging", "decommissioning", "offline"];
pub static VIRTUAL_MACHINE_STATUSES: &[&str] = &["active", "offline", "staged"];

pub struct ClusterTypes;

static CLUSTER_TYPE_ANNOTATIONS: LazyLock<Vec<CountAnnotation>> = LazyLock::new(|| {
    vec![CountAnnotation::new("cluster_count", |db| {
        Box::pin(annotate::count_by::<entity::cluster::Entity, _>(
            db,
            entity::cluster::Column::ClusterTypeId,
        ))
    })]
});

#[async_trait]
impl ObjectType for ClusterTypes {
    type Entity = entity::cluster_type::Entity;
    type ActiveModel = entity::cluster_type::ActiveModel;

    const APP: &'static str = "virtualization";
    const NAME: &'static str = "cluster_type";
    const VERBOSE_NAME: &'static str = "cluster type";
    const VERBOSE_NAME_PLURAL: &'static str = "cluster types";

    fn table() -> &'static TableSchema {
        &tables::CLUSTER_TYPE_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::CLUSTER_TYPE_FILTERS
    }

    fn annotations() -> &'static [CountAnnotation] {
        CLUSTER_TYPE_ANNOTATIONS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::cluster_type::Column::Name,
                entity::cluster_type::Column::Description,
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
            let duplicate = entity::prelude::ClusterType::find()
                .filter(entity::cluster_type::Column::Name.eq(name))
                .one(db)
                .await?;
            if duplicate.is_some_and(|found| Some(found.id) != existing) {
                errors.add("name", "A cluster type with this name already exists.");
            }
        }

        errors.into_result()
    }

    async fn dependents(db: &DatabaseTransaction, id: i32) -> Result<Vec<Dependent>, DbErr> {
        let clusters = entity::prelude::Cluster::find()
            .filter(entity::cluster::Column::ClusterTypeId.eq(id))
            .limit(10)
            .all(db)
            .await?;

        Ok(clusters
            .into_iter()
            .map(|cluster| Dependent {
                object_type: "virtualization.cluster".to_string(),
                id: cluster.id,
                repr: cluster.name,
            })
            .collect())
    }
}

pub struct ClusterGroups;

static CLUSTER_GROUP_ANNOTATIONS: LazyLock<Vec<CountAnnotation>> = LazyLock::new(|| {
    vec![CountAnnotation::new("cluster_count", |db| {
        Box::pin(annotate::count_by::<entity::cluster::Entity, _>(
            db,
            entity::cluster::Column::ClusterGroupId,
        ))
    })]
});

#[async_trait]
impl ObjectType for ClusterGroups {
    type Entity = entity::cluster_group::Entity;
    type ActiveModel = entity::cluster_group::ActiveModel;

    const APP: &'static str = "virtualization";
    const NAME: &'static str = "cluster_group";
    const VERBOSE_NAME: &'static str = "cluster group";
    const VERBOSE_NAME_PLURAL: &'static str = "cluster groups";

    fn table() -> &'static TableSchema {
        &tables::CLUSTER_GROUP_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::CLUSTER_GROUP_FILTERS
    }

    fn annotations() -> &'static [CountAnnotation] {
        CLUSTER_GROUP_ANNOTATIONS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::cluster_group::Column::Name,
                entity::cluster_group::Column::Description,
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

pub struct Clusters;

static CLUSTER_ANNOTATIONS: LazyLock<Vec<CountAnnotation>> = LazyLock::new(|| {
    vec![
        CountAnnotation::new("device_count", |db| {
            Box::pin(annotate::count_by::<entity::device::Entity, _>(
                db,
                entity::device::Column::ClusterId,
            ))
        }),
        CountAnnotation::new("vm_count", |db| {
            Box::pin(annotate::count_by::<entity::virtual_machine::Entity, _>(
                db,
                entity::virtual_machine::Column::ClusterId,
            ))
        }),
    ]
});

static CLUSTER_EMBEDS: LazyLock<Vec<RelatedEmbed>> = LazyLock::new(|| {
    vec![
        RelatedEmbed::new("cluster_type", "cluster_type_id", |db, ids| {
            Box::pin(embed::by_id::<entity::cluster_type::Entity>(db, ids))
        }),
        RelatedEmbed::new("cluster_group", "cluster_group_id", |db, ids| {
            Box::pin(embed::by_id::<entity::cluster_group::Entity>(db, ids))
        }),
    ]
});

#[async_trait]
impl ObjectType for Clusters {
    type Entity = entity::cluster::Entity;
    type ActiveModel = entity::cluster::ActiveModel;

    const APP: &'static str = "virtualization";
    const NAME: &'static str = "cluster";
    const VERBOSE_NAME: &'static str = "cluster";
    const VERBOSE_NAME_PLURAL: &'static str = "clusters";

    fn table() -> &'static TableSchema {
        &tables::CLUSTER_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::CLUSTER_FILTERS
    }

    fn annotations() -> &'static [CountAnnotation] {
        CLUSTER_ANNOTATIONS.as_slice()
    }

    fn embeds() -> &'static [RelatedEmbed] {
        CLUSTER_EMBEDS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::cluster::Column::Name,
                entity::cluster::Column::Comments,
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
        if let Some(cluster_type_id) = fields.integer("cluster_type_id") {
            model.cluster_type_id = ActiveValue::Set(cluster_type_id);
        }
        if let Some(cluster_group_id) = fields.opt_integer("cluster_group_id") {
            model.cluster_group_id = ActiveValue::Set(cluster_group_id);
        }
        if let Some(status) = fields.string("status") {
            model.status = ActiveValue::Set(status);
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
            require_present(input, &["name", "cluster_type_id"], &mut errors);
        }
        check_choice(input, "status", CLUSTER_STATUSES, &mut errors);

        if let Some(type_id) = input.get("cluster_type_id").and_then(Value::as_i64) {
            let cluster_type = entity::prelude::ClusterType::find_by_id(type_id as i32)
                .one(db)
                .await?;
            if cluster_type.is_none() {
                errors.add(
                    "cluster_type_id",
                    format!("Cluster type {type_id} does not exist."),
                );
            }
        }
        if let Some(group_id) = input.get("cluster_group_id").and_then(Value::as_i64) {
            let group = entity::prelude::ClusterGroup::find_by_id(group_id as i32)
                .one(db)
                .await?;
            if group.is_none() {
                errors.add(
                    "cluster_group_id",
                    format!("Cluster group {group_id} does not exist."),
                );
            }
        }

        if let Some(name) = input.get("name").and_then(Value::as_str) {
            let duplicate = entity::prelude::Cluster::find()
                .filter(entity::cluster::Column::Name.eq(name))
                .one(db)
                .await?;
            if duplicate.is_some_and(|found| Some(found.id) != existing) {
                errors.add("name", "A cluster with this name already exists.");
            }
        }

        errors.into_result()
    }

    async fn dependents(db: &DatabaseTransaction, id: i32) -> Result<Vec<Dependent>, DbErr> {
        let machines = entity::prelude::VirtualMachine::find()
            .filter(entity::virtual_machine::Column::ClusterId.eq(id))
            .limit(10)
            .all(db)
            .await?;

        Ok(machines
            .into_iter()
            .map(|machine| Dependent {
                object_type: "virtualization.virtual_machine".to_string(),
                id: machine.id,
                repr: machine.name,
            })
            .collect())
    }
}

pub struct VirtualMachines;

static VIRTUAL_MACHINE_ANNOTATIONS: LazyLock<Vec<CountAnnotation>> = LazyLock::new(|| {
    vec![CountAnnotation::new("interface_count", |db| {
        Box::pin(annotate::count_by::<entity::vm_interface::Entity, _>(
            db,
            entity::vm_interface::Column::VirtualMachineId,
        ))
    })]
});

static VIRTUAL_MACHINE_EMBEDS: LazyLock<Vec<RelatedEmbed>> = LazyLock::new(|| {
    vec![RelatedEmbed::new("cluster", "cluster_id", |db, ids| {
        Box::pin(embed::by_id::<entity::cluster::Entity>(db, ids))
    })]
});

#[async_trait]
impl ObjectType for VirtualMachines {
    type Entity = entity::virtual_machine::Entity;
    type ActiveModel = entity::virtual_machine::ActiveModel;

    const APP: &'static str = "virtualization";
    const NAME: &'static str = "virtual_machine";
    const VERBOSE_NAME: &'static str = "virtual machine";
    const VERBOSE_NAME_PLURAL: &'static str = "virtual machines";

    fn table() -> &'static TableSchema {
        &tables::VIRTUAL_MACHINE_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::VIRTUAL_MACHINE_FILTERS
    }

    fn annotations() -> &'static [CountAnnotation] {
        VIRTUAL_MACHINE_ANNOTATIONS.as_slice()
    }

    fn embeds() -> &'static [RelatedEmbed] {
        VIRTUAL_MACHINE_EMBEDS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::virtual_machine::Column::Name,
                entity::virtual_machine::Column::Comments,
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
        if let Some(cluster_id) = fields.integer("cluster_id") {
            model.cluster_id = ActiveValue::Set(cluster_id);
        }
        if let Some(status) = fields.string("status") {
            model.status = ActiveValue::Set(status);
        }
        if let Some(vcpus) = fields.opt_integer("vcpus") {
            model.vcpus = ActiveValue::Set(vcpus);
        }
        if let Some(memory_mb) = fields.opt_integer("memory_mb") {
            model.memory_mb = ActiveValue::Set(memory_mb);
        }
        if let Some(disk_gb) = fields.opt_integer("disk_gb") {
            model.disk_gb = ActiveValue::Set(disk_gb);
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
            require_present(input, &["name", "cluster_id"], &mut errors);
        }
        check_choice(input, "status", VIRTUAL_MACHINE_STATUSES, &mut errors);

        if let Some(cluster_id) = input.get("cluster_id").and_then(Value::as_i64) {
            let cluster = entity::prelude::Cluster::find_by_id(cluster_id as i32)
                .one(db)
                .await?;
            if cluster.is_none() {
                errors.add("cluster_id", format!("Cluster {cluster_id} does not exist."));
            }
        }

        // VM names are unique within a cluster.
        let cluster_scope = match input.get("cluster_id").and_then(Value::as_i64) {
            Some(cluster_id) => Some(cluster_id as i32),
            None => match existing {
                Some(id) => entity::prelude::VirtualMachine::find_by_id(id)
                    .one(db)
                    .await?
                    .map(|machine| machine.cluster_id),
                None => None,
            },
        };
        if let (Some(name), Some(cluster_id)) =
            (input.get("name").and_then(Value::as_str), cluster_scope)
        {
            let duplicate = entity::prelude::VirtualMachine::find()
                .filter(entity::virtual_machine::Column::ClusterId.eq(cluster_id))
                .filter(entity::virtual_machine::Column::Name.eq(name))
                .one(db)
                .await?;
            if duplicate.is_some_and(|found| Some(found.id) != existing) {
                errors.add(
                    "name",
                    "A virtual machine with this name already exists in the cluster.",
                );
            }
        }

        errors.into_result()
    }
}

pub struct VmInterfaces;

static VM_INTERFACE_EMBEDS: LazyLock<Vec<RelatedEmbed>> = LazyLock::new(|| {
    vec![RelatedEmbed::new(
        "virtual_machine",
        "virtual_machine_id",
        |db, ids| Box::pin(embed::by_id::<entity::virtual_machine::Entity>(db, ids)),
    )]
});

#[async_trait]
impl ObjectType for VmInterfaces {
    type Entity = entity::vm_interface::Entity;
    type ActiveModel = entity::vm_interface::ActiveModel;

    const APP: &'static str = "virtualization";
    const NAME: &'static str = "vm_interface";
    const VERBOSE_NAME: &'static str = "interface";
    const VERBOSE_NAME_PLURAL: &'static str = "interfaces";

    fn table() -> &'static TableSchema {
        &tables::VM_INTERFACE_TABLE
    }

    fn filters() -> &'static FilterSchema {
        &filters::VM_INTERFACE_FILTERS
    }

    fn embeds() -> &'static [RelatedEmbed] {
        VM_INTERFACE_EMBEDS.as_slice()
    }

    fn search(term: &str) -> Option<Condition> {
        Some(filter::contains_any(
            &[
                entity::vm_interface::Column::Name,
                entity::vm_interface::Column::Description,
            ],
            term,
        ))
    }

    fn apply(
        model: &mut Self::ActiveModel,
        input: &Map<String, Value>,
    ) -> Result<(), ValidationErrors> {
        let mut fields = FieldMap::new(input);

        if let Some(virtual_machine_id) = fields.integer("virtual_machine_id") {
            model.virtual_machine_id = ActiveValue::Set(virtual_machine_id);
        }
        if let Some(name) = fields.string("name") {
            model.name = ActiveValue::Set(name);
        }
        if let Some(enabled) = fields.boolean("enabled") {
            model.enabled = ActiveValue::Set(enabled);
        }
        if let Some(mtu) = fields.opt_integer("mtu") {
            model.mtu = ActiveValue::Set(mtu);
        }
        if let Some(mac_address) = fields.opt_string("mac_address") {
            model.mac_address = ActiveValue::Set(mac_address);
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
            require_present(input, &["name", "virtual_machine_id"], &mut errors);
        }

        if let Some(mtu) = input.get("mtu").and_then(Value::as_i64) {
            if !(1..=65536).contains(&mtu) {
                errors.add("mtu", "MTU must be between 1 and 65536.");
            }
        }

        if let Some(machine_id) = input.get("virtual_machine_id").and_then(Value::as_i64) {
            let machine = entity::prelude::VirtualMachine::find_by_id(machine_id as i32)
                .one(db)
                .await?;
            if machine.is_none() {
                errors.add(
                    "virtual_machine_id",
                    format!("Virtual machine {machine_id} does not exist."),
                );
            }
        }

        // Interface names are unique within a virtual machine.
        let machine_scope = match input.get("virtual_machine_id").and_then(Value::as_i64) {
            Some(machine_id) => Some(machine_id as i32),
            None => match existing {
                Some(id) => entity::prelude::VmInterface::find_by_id(id)
                    .one(db)
                    .await?
                    .map(|interface| interface.virtual_machine_id),
                None => None,
            },
        };
        if let (Some(name), Some(machine_id)) =
            (input.get("name").and_then(Value::as_str), machine_scope)
        {
            let duplicate = entity::prelude::VmInterface::find()
                .filter(entity::vm_interface::Column::VirtualMachineId.eq(machine_id))
                .filter(entity::vm_interface::Column::Name.eq(name))
                .one(db)
                .await?;
            if duplicate.is_some_and(|found| Some(found.id) != existing) {
                errors.add(
                    "name",
                    "An interface with this name already exists on the virtual machine.",
                );
            }
        }

        errors.into_result()
    }
}

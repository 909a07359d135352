//! Per-application view configuration: one [`ObjectType`] implementation
//! per inventory type, plus registry assembly.
//!
//! [`ObjectType`]: crate::server::generic::ObjectType

pub mod dcim;
pub mod extras;
pub mod virtualization;

use sea_orm::{ColumnTrait, Condition};
use serde_json::{Map, Value};

use crate::server::error::ValidationErrors;
use crate::server::generic::children::ChildCollection;
use crate::server::generic::registry::ViewRegistry;

/// Records an error when a submitted field is not one of the allowed values.
pub(crate) fn check_choice(
    input: &Map<String, Value>,
    field: &str,
    allowed: &[&str],
    errors: &mut ValidationErrors,
) {
    if let Some(value) = input.get(field).and_then(Value::as_str) {
        if !allowed.contains(&value) {
            errors.add(
                field,
                format!("Invalid value {value:?}; expected one of {allowed:?}."),
            );
        }
    }
}

/// Builds the full view registry: every inventory type and child tab.
pub fn registry() -> ViewRegistry {
    let mut registry = ViewRegistry::new();

    registry.register::<dcim::Sites>();
    registry.register::<dcim::RackRoles>();
    registry.register::<dcim::Racks>();
    registry.register::<dcim::Devices>();
    registry.register::<virtualization::ClusterTypes>();
    registry.register::<virtualization::ClusterGroups>();
    registry.register::<virtualization::Clusters>();
    registry.register::<virtualization::VirtualMachines>();
    registry.register::<virtualization::VmInterfaces>();
    registry.register::<extras::Tags>();
    registry.register::<extras::CustomFields>();
    registry.register::<extras::Webhooks>();
    registry.register::<extras::JournalEntries>();
    registry.register::<extras::ObjectChanges>();

    registry.register_children(ChildCollection::new::<
        virtualization::Clusters,
        virtualization::VirtualMachines,
    >("virtual-machines", |cluster_id| {
        Condition::all().add(entity::virtual_machine::Column::ClusterId.eq(cluster_id))
    }));
    registry.register_children(ChildCollection::new::<virtualization::Clusters, dcim::Devices>(
        "devices",
        |cluster_id| Condition::all().add(entity::device::Column::ClusterId.eq(cluster_id)),
    ));
    registry.register_children(ChildCollection::new::<
        virtualization::VirtualMachines,
        virtualization::VmInterfaces,
    >("interfaces", |virtual_machine_id| {
        Condition::all()
            .add(entity::vm_interface::Column::VirtualMachineId.eq(virtual_machine_id))
    }));

    registry
}

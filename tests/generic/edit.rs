use gantry::server::error::Error;
use gantry::server::generic::views::Views;
use gantry::server::views::virtualization::{Clusters, VirtualMachines, VmInterfaces};
use gantry_test_utils::fixtures::virtualization;
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{json, Map, Value};

use crate::util::admin;

fn input(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Expect create to persist the record and write a change-log row
#[tokio::test]
async fn test_create_cluster_persists_and_logs() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;

    let dto = Views::<Clusters>::new(&test.db)
        .create(
            &admin(),
            input(&[
                ("name", json!("compute-1")),
                ("cluster_type_id", json!(core.id)),
                ("status", json!("planned")),
            ]),
        )
        .await
        .expect("create succeeds");

    assert_eq!(dto.count, 1);
    assert_eq!(dto.notice.level, "success");

    let id = dto.id.expect("created id");
    let stored = entity::prelude::Cluster::find_by_id(id)
        .one(&test.db)
        .await?
        .expect("cluster persisted");
    assert_eq!(stored.name, "compute-1");
    assert_eq!(stored.status, "planned");

    let change = entity::prelude::ObjectChange::find()
        .filter(entity::object_change::Column::ChangedObjectId.eq(id))
        .one(&test.db)
        .await?
        .expect("change logged");
    assert_eq!(change.action, "create");
    assert_eq!(change.changed_object_type, "cluster");
    assert_eq!(change.user_name, "admin");

    Ok(())
}

/// Expect missing required fields to fail with per-field errors and no row
#[tokio::test]
async fn test_create_requires_fields() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let result = Views::<Clusters>::new(&test.db)
        .create(&admin(), input(&[]))
        .await;

    match result {
        Err(Error::Validation(errors)) => {
            assert!(errors.errors.contains_key("name"));
            assert!(errors.errors.contains_key("cluster_type_id"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let count = entity::prelude::Cluster::find().count(&test.db).await?;
    assert_eq!(count, 0);

    Ok(())
}

/// Expect a duplicate interface name within one VM to fail on `name`
/// with nothing persisted
#[tokio::test]
async fn test_create_duplicate_interface_name_fails_validation() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let machine = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-1").await?;
    virtualization::create_vm_interface(&test.db, machine.id, "eth0").await?;

    let result = Views::<VmInterfaces>::new(&test.db)
        .create(
            &admin(),
            input(&[
                ("virtual_machine_id", json!(machine.id)),
                ("name", json!("eth0")),
            ]),
        )
        .await;

    match result {
        Err(Error::Validation(errors)) => {
            assert!(errors.errors.contains_key("name"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let count = entity::prelude::VmInterface::find().count(&test.db).await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Expect the same interface name on a different VM to be accepted
#[tokio::test]
async fn test_create_same_interface_name_on_other_machine() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let first = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-1").await?;
    let second = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-2").await?;
    virtualization::create_vm_interface(&test.db, first.id, "eth0").await?;

    let result = Views::<VmInterfaces>::new(&test.db)
        .create(
            &admin(),
            input(&[
                ("virtual_machine_id", json!(second.id)),
                ("name", json!("eth0")),
            ]),
        )
        .await;

    assert!(result.is_ok());

    Ok(())
}

/// Expect update to modify supplied fields and leave the rest untouched
#[tokio::test]
async fn test_update_touches_only_supplied_fields() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let machine = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-1").await?;

    let dto = Views::<VirtualMachines>::new(&test.db)
        .update(&admin(), machine.id, input(&[("status", json!("offline"))]))
        .await
        .expect("update succeeds");
    assert_eq!(dto.id, Some(machine.id));

    let stored = entity::prelude::VirtualMachine::find_by_id(machine.id)
        .one(&test.db)
        .await?
        .expect("machine persisted");
    assert_eq!(stored.status, "offline");
    assert_eq!(stored.name, "vm-1");
    assert_eq!(stored.vcpus, machine.vcpus);

    Ok(())
}

/// Expect mutating operations on a read-only type to be rejected
#[tokio::test]
async fn test_create_read_only_type_is_unsupported() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let result = Views::<gantry::server::views::extras::ObjectChanges>::new(&test.db)
        .create(&admin(), input(&[("action", json!("create"))]))
        .await;

    assert!(matches!(
        result,
        Err(Error::UnsupportedAction {
            action: "create",
            ..
        })
    ));

    Ok(())
}

/// Expect an invalid status choice to fail and persist nothing
#[tokio::test]
async fn test_update_rejects_invalid_status() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let machine = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-1").await?;

    let result = Views::<VirtualMachines>::new(&test.db)
        .update(&admin(), machine.id, input(&[("status", json!("haunted"))]))
        .await;

    match result {
        Err(Error::Validation(errors)) => {
            assert!(errors.errors.contains_key("status"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let stored = entity::prelude::VirtualMachine::find_by_id(machine.id)
        .one(&test.db)
        .await?
        .expect("machine persisted");
    assert_eq!(stored.status, "active");

    Ok(())
}

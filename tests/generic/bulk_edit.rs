use gantry::server::error::Error;
use gantry::server::generic::views::Views;
use gantry::server::views::virtualization::VirtualMachines;
use gantry_test_utils::fixtures::virtualization;
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};
use sea_orm::EntityTrait;
use serde_json::{json, Map, Value};

use crate::util::admin;

fn input(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Expect one field map applied to every selected record
#[tokio::test]
async fn test_bulk_edit_applies_to_all_selected() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let vm1 = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-1").await?;
    let vm2 = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-2").await?;

    let dto = Views::<VirtualMachines>::new(&test.db)
        .bulk_edit(
            &admin(),
            &[vm1.id, vm2.id],
            input(&[("status", json!("offline"))]),
        )
        .await
        .expect("bulk edit succeeds");
    assert_eq!(dto.count, 2);

    for id in [vm1.id, vm2.id] {
        let stored = entity::prelude::VirtualMachine::find_by_id(id)
            .one(&test.db)
            .await?
            .expect("machine persisted");
        assert_eq!(stored.status, "offline");
    }

    Ok(())
}

/// Expect a record-level failure mid-batch to leave every record unchanged
#[tokio::test]
async fn test_bulk_edit_aborts_whole_transaction_on_failure() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let vm1 = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-1").await?;
    let vm2 = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-2").await?;
    let vm3 = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-3").await?;

    // Renaming every VM in the cluster to the same name succeeds for the
    // first record and collides on the second.
    let result = Views::<VirtualMachines>::new(&test.db)
        .bulk_edit(
            &admin(),
            &[vm1.id, vm2.id, vm3.id],
            input(&[("name", json!("clone"))]),
        )
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));

    for (id, name) in [(vm1.id, "vm-1"), (vm2.id, "vm-2"), (vm3.id, "vm-3")] {
        let stored = entity::prelude::VirtualMachine::find_by_id(id)
            .one(&test.db)
            .await?
            .expect("machine persisted");
        assert_eq!(stored.name, name);
    }

    Ok(())
}

/// Expect a missing selected record to abort the whole transaction
#[tokio::test]
async fn test_bulk_edit_missing_record_aborts() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let vm1 = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-1").await?;

    let result = Views::<VirtualMachines>::new(&test.db)
        .bulk_edit(
            &admin(),
            &[vm1.id, 999],
            input(&[("status", json!("offline"))]),
        )
        .await;

    assert!(matches!(result, Err(Error::NotFound { id: 999, .. })));

    let stored = entity::prelude::VirtualMachine::find_by_id(vm1.id)
        .one(&test.db)
        .await?
        .expect("machine persisted");
    assert_eq!(stored.status, "active");

    Ok(())
}

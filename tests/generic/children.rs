use gantry::server::error::Error;
use gantry::server::generic::ListParams;
use gantry::server::views;
use gantry_test_utils::fixtures::{dcim, virtualization};
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};

use crate::util::{admin, row_ids};

/// Expect the child listing scoped to the parent with the active tab set
#[tokio::test]
async fn test_cluster_virtual_machines_tab() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let parent = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let other = virtualization::create_cluster(&test.db, core.id, "compute-2").await?;
    let vm1 = virtualization::create_virtual_machine(&test.db, parent.id, "vm-1").await?;
    virtualization::create_virtual_machine(&test.db, other.id, "vm-2").await?;

    let registry = views::registry();
    let collection = registry
        .child("virtualization", "cluster", "virtual-machines")
        .expect("tab registered");

    let dto = collection
        .list(&test.db, &admin(), parent.id, &ListParams::default())
        .await
        .expect("child list succeeds");

    assert_eq!(row_ids(&dto), vec![vm1.id]);
    assert_eq!(dto.active_tab.as_deref(), Some("virtual-machines"));

    Ok(())
}

/// Expect the devices tab to list only the parent cluster's devices
#[tokio::test]
async fn test_cluster_devices_tab() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let parent = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let site = dcim::create_site(&test.db, "fra1", "fra1").await?;
    let attached = dcim::create_device(&test.db, site.id, "node-a", None, Some(parent.id)).await?;
    dcim::create_device(&test.db, site.id, "node-b", None, None).await?;

    let registry = views::registry();
    let collection = registry
        .child("virtualization", "cluster", "devices")
        .expect("tab registered");

    let dto = collection
        .list(&test.db, &admin(), parent.id, &ListParams::default())
        .await
        .expect("child list succeeds");

    assert_eq!(row_ids(&dto), vec![attached.id]);
    assert_eq!(dto.active_tab.as_deref(), Some("devices"));

    Ok(())
}

/// Expect NotFound when the parent record does not exist
#[tokio::test]
async fn test_children_missing_parent_is_not_found() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let registry = views::registry();
    let collection = registry
        .child("virtualization", "cluster", "virtual-machines")
        .expect("tab registered");

    let result = collection
        .list(&test.db, &admin(), 404, &ListParams::default())
        .await;

    assert!(matches!(result, Err(Error::NotFound { id: 404, .. })));

    Ok(())
}

/// Expect an unregistered tab to be rejected
#[tokio::test]
async fn test_unknown_child_collection_is_rejected() -> Result<(), TestError> {
    let registry = views::registry();

    let result = registry.child("virtualization", "cluster", "snapshots");

    assert!(matches!(
        result,
        Err(Error::UnknownChildCollection { .. })
    ));

    Ok(())
}

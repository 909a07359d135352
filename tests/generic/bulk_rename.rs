use gantry::server::error::Error;
use gantry::server::generic::views::Views;
use gantry::server::generic::ListParams;
use gantry::model::api::BulkRenameRequest;
use gantry::server::views::extras::JournalEntries;
use gantry::server::views::virtualization::VmInterfaces;
use gantry_test_utils::fixtures::virtualization;
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};
use sea_orm::EntityTrait;

use crate::util::{admin, cell_value, row_ids};

fn request(ids: Vec<i32>, pattern: &str, replacement: &str, commit: bool) -> BulkRenameRequest {
    BulkRenameRequest {
        ids,
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
        commit,
    }
}

/// Expect preview to report the would-be names without writing anything
#[tokio::test]
async fn test_bulk_rename_preview_then_commit_round_trip() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let machine = virtualization::create_virtual_machine(&test.db, cluster.id, "vm-1").await?;
    let eth0 = virtualization::create_vm_interface(&test.db, machine.id, "eth0").await?;
    let eth1 = virtualization::create_vm_interface(&test.db, machine.id, "eth1").await?;

    let views = Views::<VmInterfaces>::new(&test.db);

    let preview = views
        .bulk_rename(
            &admin(),
            &request(vec![eth0.id, eth1.id], r"eth(\d+)", "Ethernet$1", false),
        )
        .await
        .expect("preview succeeds");

    assert!(!preview.committed);
    let previewed: Vec<(&str, &str)> = preview
        .entries
        .iter()
        .map(|entry| (entry.current_name.as_str(), entry.new_name.as_str()))
        .collect();
    assert_eq!(
        previewed,
        vec![("eth0", "Ethernet0"), ("eth1", "Ethernet1")]
    );

    // Nothing was written by the preview.
    let stored = entity::prelude::VmInterface::find_by_id(eth0.id)
        .one(&test.db)
        .await?
        .expect("interface persisted");
    assert_eq!(stored.name, "eth0");

    let committed = views
        .bulk_rename(
            &admin(),
            &request(vec![eth0.id, eth1.id], r"eth(\d+)", "Ethernet$1", true),
        )
        .await
        .expect("commit succeeds");
    assert!(committed.committed);

    // Re-listing returns exactly the renamed records.
    let dto = views
        .list(&admin(), &ListParams::default())
        .await
        .expect("list succeeds");
    assert_eq!(row_ids(&dto), vec![eth0.id, eth1.id]);
    assert_eq!(cell_value(&dto, eth0.id, "name"), serde_json::json!("Ethernet0"));
    assert_eq!(cell_value(&dto, eth1.id, "name"), serde_json::json!("Ethernet1"));

    Ok(())
}

/// Expect an invalid pattern to fail validation on `pattern`
#[tokio::test]
async fn test_bulk_rename_rejects_invalid_pattern() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let result = Views::<VmInterfaces>::new(&test.db)
        .bulk_rename(&admin(), &request(vec![1], "eth(", "x", false))
        .await;

    match result {
        Err(Error::Validation(errors)) => {
            assert!(errors.errors.contains_key("pattern"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    Ok(())
}

/// Expect types without a name-like field to reject the operation
#[tokio::test]
async fn test_bulk_rename_unsupported_without_name_field() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let result = Views::<JournalEntries>::new(&test.db)
        .bulk_rename(&admin(), &request(vec![1], "a", "b", false))
        .await;

    assert!(matches!(
        result,
        Err(Error::UnsupportedAction {
            action: "bulk_rename",
            ..
        })
    ));

    Ok(())
}

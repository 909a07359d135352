use gantry::server::error::Error;
use gantry::server::generic::views::Views;
use gantry::server::views::virtualization::VirtualMachines;
use gantry_test_utils::fixtures::virtualization;
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Map, Value};

use crate::util::admin;

fn row(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Expect every parsed row to be persisted in one batch
#[tokio::test]
async fn test_bulk_import_persists_all_rows() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;

    let dto = Views::<VirtualMachines>::new(&test.db)
        .bulk_import(
            &admin(),
            vec![
                row(&[("name", json!("vm-1")), ("cluster_id", json!(cluster.id))]),
                row(&[("name", json!("vm-2")), ("cluster_id", json!(cluster.id))]),
            ],
        )
        .await
        .expect("import succeeds");
    assert_eq!(dto.count, 2);

    let count = entity::prelude::VirtualMachine::find()
        .count(&test.db)
        .await?;
    assert_eq!(count, 2);

    Ok(())
}

/// Expect one failing row to abort the whole batch, reported by row index
#[tokio::test]
async fn test_bulk_import_is_all_or_nothing() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;

    let result = Views::<VirtualMachines>::new(&test.db)
        .bulk_import(
            &admin(),
            vec![
                row(&[("name", json!("vm-1")), ("cluster_id", json!(cluster.id))]),
                // Missing cluster_id.
                row(&[("name", json!("vm-2"))]),
            ],
        )
        .await;

    match result {
        Err(Error::Validation(errors)) => {
            assert!(errors.errors.contains_key("rows[1].cluster_id"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let count = entity::prelude::VirtualMachine::find()
        .count(&test.db)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}

/// Expect an intra-batch duplicate to fail against already-imported rows
#[tokio::test]
async fn test_bulk_import_detects_intra_batch_duplicates() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;

    let result = Views::<VirtualMachines>::new(&test.db)
        .bulk_import(
            &admin(),
            vec![
                row(&[("name", json!("vm-1")), ("cluster_id", json!(cluster.id))]),
                row(&[("name", json!("vm-1")), ("cluster_id", json!(cluster.id))]),
            ],
        )
        .await;

    match result {
        Err(Error::Validation(errors)) => {
            assert!(errors.errors.contains_key("rows[1].name"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let count = entity::prelude::VirtualMachine::find()
        .count(&test.db)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}

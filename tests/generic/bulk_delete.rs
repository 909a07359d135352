use gantry::server::error::Error;
use gantry::server::generic::views::Views;
use gantry::server::views::virtualization::ClusterTypes;
use gantry_test_utils::fixtures::virtualization;
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::util::admin;

/// Expect the whole selection to be deleted in one transaction
#[tokio::test]
async fn test_bulk_delete_removes_selection() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let a = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let b = virtualization::create_cluster_type(&test.db, "Edge", "edge").await?;

    let dto = Views::<ClusterTypes>::new(&test.db)
        .bulk_delete(&admin(), &[a.id, b.id])
        .await
        .expect("bulk delete succeeds");
    assert_eq!(dto.count, 2);

    let count = entity::prelude::ClusterType::find().count(&test.db).await?;
    assert_eq!(count, 0);

    Ok(())
}

/// Expect one protected record to abort the entire selection, including
/// records that could have been deleted on their own
#[tokio::test]
async fn test_bulk_delete_protected_record_aborts_all() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let unused = virtualization::create_cluster_type(&test.db, "Edge", "edge").await?;
    let in_use = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    virtualization::create_cluster(&test.db, in_use.id, "compute-1").await?;

    let result = Views::<ClusterTypes>::new(&test.db)
        .bulk_delete(&admin(), &[unused.id, in_use.id])
        .await;

    assert!(matches!(result, Err(Error::Protected { .. })));

    // All-or-nothing: the unused type survives as well.
    let count = entity::prelude::ClusterType::find().count(&test.db).await?;
    assert_eq!(count, 2);

    Ok(())
}

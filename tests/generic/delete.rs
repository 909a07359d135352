use gantry::server::error::Error;
use gantry::server::generic::views::Views;
use gantry::server::views::virtualization::{ClusterTypes, Clusters};
use gantry_test_utils::fixtures::virtualization;
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::util::admin;

/// Expect delete to remove the record and write a change-log row
#[tokio::test]
async fn test_delete_removes_record_and_logs() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;

    let dto = Views::<Clusters>::new(&test.db)
        .delete(&admin(), cluster.id)
        .await
        .expect("delete succeeds");
    assert_eq!(dto.count, 1);

    let stored = entity::prelude::Cluster::find_by_id(cluster.id)
        .one(&test.db)
        .await?;
    assert!(stored.is_none());

    let change = entity::prelude::ObjectChange::find()
        .filter(entity::object_change::Column::Action.eq("delete"))
        .one(&test.db)
        .await?
        .expect("change logged");
    assert_eq!(change.changed_object_id, cluster.id);
    assert_eq!(change.object_repr, "compute-1");

    Ok(())
}

/// Expect a protected relation to block deletion, listing the blockers,
/// with the record loading identically afterwards
#[tokio::test]
async fn test_delete_in_use_cluster_type_is_protected() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;

    let views = Views::<ClusterTypes>::new(&test.db);
    let before = views
        .detail(&admin(), core.id)
        .await
        .expect("detail succeeds");

    let result = views.delete(&admin(), core.id).await;
    match result {
        Err(Error::Protected { id, dependents, .. }) => {
            assert_eq!(id, core.id);
            assert_eq!(dependents.len(), 1);
            assert_eq!(dependents[0].id, cluster.id);
            assert_eq!(dependents[0].repr, "compute-1");
            assert_eq!(dependents[0].object_type, "virtualization.cluster");
        }
        other => panic!("expected protected error, got {other:?}"),
    }

    let after = views
        .detail(&admin(), core.id)
        .await
        .expect("detail still succeeds");
    assert_eq!(before.record, after.record);

    Ok(())
}

/// Expect NotFound when deleting a missing record
#[tokio::test]
async fn test_delete_missing_record_is_not_found() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let result = Views::<Clusters>::new(&test.db).delete(&admin(), 404).await;

    assert!(matches!(result, Err(Error::NotFound { id: 404, .. })));

    Ok(())
}

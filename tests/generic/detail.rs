use gantry::server::error::Error;
use gantry::server::generic::views::Views;
use gantry::server::model::principal::Principal;
use gantry::server::views::virtualization::Clusters;
use gantry_test_utils::fixtures::{dcim, virtualization};
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};

use crate::util::admin;

/// Expect the record with annotations and embedded relations attached
#[tokio::test]
async fn test_detail_returns_record_with_annotations() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let site = dcim::create_site(&test.db, "fra1", "fra1").await?;
    dcim::create_device(&test.db, site.id, "node-a", None, Some(cluster.id)).await?;

    let dto = Views::<Clusters>::new(&test.db)
        .detail(&admin(), cluster.id)
        .await
        .expect("detail succeeds");

    assert_eq!(dto.id, cluster.id);
    assert_eq!(dto.record["name"], serde_json::json!("compute-1"));
    assert_eq!(dto.record["device_count"], serde_json::json!(1));
    assert_eq!(dto.record["cluster_type"]["slug"], serde_json::json!("core"));

    Ok(())
}

/// Expect NotFound for a missing key
#[tokio::test]
async fn test_detail_missing_record_is_not_found() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let result = Views::<Clusters>::new(&test.db).detail(&admin(), 999).await;

    assert!(matches!(result, Err(Error::NotFound { id: 999, .. })));

    Ok(())
}

/// Expect Forbidden when the principal lacks the view permission token
#[tokio::test]
async fn test_detail_requires_view_permission() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let cluster = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;

    let principal = Principal::with_permissions("intern", &[]);
    let result = Views::<Clusters>::new(&test.db)
        .detail(&principal, cluster.id)
        .await;

    assert!(matches!(result, Err(Error::Forbidden { .. })));

    Ok(())
}

/// Expect NotFound, not Forbidden, when an object-level constraint hides
/// an existing record
#[tokio::test]
async fn test_detail_constrained_record_is_not_found() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let visible = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let hidden = virtualization::create_cluster(&test.db, core.id, "compute-2").await?;

    let principal = Principal::with_permissions("reader", &["virtualization.view_cluster"])
        .constrain("virtualization.cluster", vec![visible.id]);

    let views = Views::<Clusters>::new(&test.db);
    assert!(views.detail(&principal, visible.id).await.is_ok());

    let result = views.detail(&principal, hidden.id).await;
    assert!(matches!(result, Err(Error::NotFound { .. })));

    Ok(())
}

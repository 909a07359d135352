use gantry::server::error::Error;
use gantry::server::generic::views::Views;
use gantry::server::generic::ListParams;
use gantry::server::model::principal::Principal;
use gantry::server::views::dcim::Sites;
use gantry::server::views::extras::ObjectChanges;
use gantry::server::views::virtualization::Clusters;
use gantry_test_utils::fixtures::{dcim, virtualization};
use gantry_test_utils::{test_setup_with_inventory_tables, TestError, TestSetup};

use crate::util::{admin, cell_value, row_ids};

fn params(pairs: &[(&str, &str)]) -> ListParams {
    ListParams::from_pairs(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    )
    .expect("valid parameters")
}

/// Expect one rendered row per record, each with the full resolved column set
#[tokio::test]
async fn test_list_renders_one_row_per_record() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    dcim::create_site(&test.db, "fra1", "fra1").await?;
    dcim::create_site(&test.db, "ams1", "ams1").await?;
    dcim::create_site(&test.db, "sin1", "sin1").await?;

    let dto = Views::<Sites>::new(&test.db)
        .list(&admin(), &params(&[]))
        .await
        .expect("list succeeds");

    assert_eq!(dto.table.rows.len(), 3);
    for row in &dto.table.rows {
        assert_eq!(row.cells.len(), dto.table.columns.len());
    }

    Ok(())
}

/// Expect empty table, not an error, when nothing matches
#[tokio::test]
async fn test_list_empty_result_is_not_an_error() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let dto = Views::<Sites>::new(&test.db)
        .list(&admin(), &params(&[]))
        .await
        .expect("list succeeds");

    assert!(dto.table.rows.is_empty());
    assert_eq!(dto.page.total_count, 0);

    Ok(())
}

/// Expect type-slug filtering combined with exact per-cluster device counts
#[tokio::test]
async fn test_list_clusters_filtered_by_type_with_device_counts() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let edge = virtualization::create_cluster_type(&test.db, "Edge", "edge").await?;
    let c1 = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let c2 = virtualization::create_cluster(&test.db, edge.id, "edge-1").await?;
    let c3 = virtualization::create_cluster(&test.db, core.id, "compute-2").await?;

    let site = dcim::create_site(&test.db, "fra1", "fra1").await?;
    dcim::create_device(&test.db, site.id, "node-a", None, Some(c1.id)).await?;
    dcim::create_device(&test.db, site.id, "node-b", None, Some(c1.id)).await?;
    dcim::create_device(&test.db, site.id, "node-c", None, Some(c2.id)).await?;

    let dto = Views::<Clusters>::new(&test.db)
        .list(&admin(), &params(&[("type", "core")]))
        .await
        .expect("list succeeds");

    assert_eq!(row_ids(&dto), vec![c1.id, c3.id]);
    assert_eq!(cell_value(&dto, c1.id, "device_count"), serde_json::json!(2));
    assert_eq!(cell_value(&dto, c3.id, "device_count"), serde_json::json!(0));

    Ok(())
}

/// Expect unknown filter fields to fail with a field-keyed validation error
#[tokio::test]
async fn test_list_rejects_unknown_filter_field() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let result = Views::<Clusters>::new(&test.db)
        .list(&admin(), &params(&[("flavor", "large")]))
        .await;

    match result {
        Err(Error::Validation(errors)) => {
            assert!(errors.errors.contains_key("flavor"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    Ok(())
}

/// Expect Forbidden when the principal lacks the view permission
#[tokio::test]
async fn test_list_requires_view_permission() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let principal = Principal::with_permissions("intern", &["dcim.view_rack"]);
    let result = Views::<Clusters>::new(&test.db)
        .list(&principal, &params(&[]))
        .await;

    assert!(matches!(result, Err(Error::Forbidden { .. })));

    Ok(())
}

/// Expect object-level constraints to AND-combine with user filters
#[tokio::test]
async fn test_list_restriction_composes_with_filters() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let core = virtualization::create_cluster_type(&test.db, "Core", "core").await?;
    let c1 = virtualization::create_cluster(&test.db, core.id, "compute-1").await?;
    let c2 = virtualization::create_cluster(&test.db, core.id, "compute-2").await?;

    let principal = Principal::with_permissions("reader", &["virtualization.view_cluster"])
        .constrain("virtualization.cluster", vec![c1.id]);

    let dto = Views::<Clusters>::new(&test.db)
        .list(&principal, &params(&[("type", "core")]))
        .await
        .expect("list succeeds");

    assert_eq!(row_ids(&dto), vec![c1.id]);
    assert_ne!(c1.id, c2.id);

    Ok(())
}

/// Expect sort parameters to order the rendered rows
#[tokio::test]
async fn test_list_sorts_by_requested_columns() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let b = dcim::create_site(&test.db, "bravo", "bravo").await?;
    let a = dcim::create_site(&test.db, "alpha", "alpha").await?;
    let c = dcim::create_site(&test.db, "charlie", "charlie").await?;

    let dto = Views::<Sites>::new(&test.db)
        .list(&admin(), &params(&[("sort", "-name")]))
        .await
        .expect("list succeeds");

    assert_eq!(row_ids(&dto), vec![c.id, b.id, a.id]);

    Ok(())
}

/// Expect sorting by a non-orderable column to leave the base order intact
#[tokio::test]
async fn test_list_ignores_sort_on_non_orderable_column() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    // Creating sites through the view layer writes change-log rows whose
    // reprs are deliberately out of alphabetical order.
    let views = Views::<Sites>::new(&test.db);
    for (name, slug) in [("zulu", "zulu"), ("alpha", "alpha"), ("mike", "mike")] {
        let mut input = serde_json::Map::new();
        input.insert("name".to_string(), serde_json::json!(name));
        input.insert("slug".to_string(), serde_json::json!(slug));
        views
            .create(&admin(), input)
            .await
            .expect("create succeeds");
    }

    let unsorted = Views::<ObjectChanges>::new(&test.db)
        .list(&admin(), &params(&[]))
        .await
        .expect("list succeeds");
    let sorted = Views::<ObjectChanges>::new(&test.db)
        .list(&admin(), &params(&[("sort", "object_repr")]))
        .await
        .expect("list succeeds");

    assert_eq!(row_ids(&sorted), row_ids(&unsorted));

    Ok(())
}

/// Expect free-text search to narrow the result set
#[tokio::test]
async fn test_list_search_narrows_results() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    let fra = dcim::create_site(&test.db, "frankfurt-1", "fra1").await?;
    dcim::create_site(&test.db, "amsterdam-1", "ams1").await?;

    let dto = Views::<Sites>::new(&test.db)
        .list(&admin(), &params(&[("q", "frank")]))
        .await
        .expect("list succeeds");

    assert_eq!(row_ids(&dto), vec![fra.id]);

    Ok(())
}

/// Expect pagination to slice after sorting
#[tokio::test]
async fn test_list_paginates_after_sort() -> Result<(), TestError> {
    let test = test_setup_with_inventory_tables!()?;

    for name in ["delta", "alpha", "charlie", "bravo"] {
        dcim::create_site(&test.db, name, name).await?;
    }

    let dto = Views::<Sites>::new(&test.db)
        .list(
            &admin(),
            &params(&[("sort", "name"), ("page", "2"), ("per_page", "2")]),
        )
        .await
        .expect("list succeeds");

    assert_eq!(dto.page.total_count, 4);
    assert_eq!(dto.table.rows.len(), 2);
    assert_eq!(
        cell_value(&dto, dto.table.rows[0].id, "name"),
        serde_json::json!("charlie")
    );

    Ok(())
}

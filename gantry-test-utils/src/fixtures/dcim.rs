//! Persisted dcim fixtures: sites, rack roles, racks, and devices.
//!
//! Each factory inserts one row with standard test values and returns the
//! persisted model.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};

use crate::error::TestError;

pub async fn create_site(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<entity::site::Model, TestError> {
    let now = Utc::now().naive_utc();
    let site = entity::site::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        slug: ActiveValue::Set(slug.to_string()),
        description: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(site.insert(db).await?)
}

pub async fn create_rack_role(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<entity::rack_role::Model, TestError> {
    let now = Utc::now().naive_utc();
    let role = entity::rack_role::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        slug: ActiveValue::Set(slug.to_string()),
        color: ActiveValue::Set("9e9e9e".to_string()),
        description: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(role.insert(db).await?)
}

pub async fn create_rack(
    db: &DatabaseConnection,
    site_id: i32,
    name: &str,
) -> Result<entity::rack::Model, TestError> {
    let now = Utc::now().naive_utc();
    let rack = entity::rack::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        site_id: ActiveValue::Set(site_id),
        role_id: ActiveValue::Set(None),
        status: ActiveValue::Set("active".to_string()),
        u_height: ActiveValue::Set(42),
        comments: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(rack.insert(db).await?)
}

pub async fn create_device(
    db: &DatabaseConnection,
    site_id: i32,
    name: &str,
    rack_id: Option<i32>,
    cluster_id: Option<i32>,
) -> Result<entity::device::Model, TestError> {
    let now = Utc::now().naive_utc();
    let device = entity::device::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        site_id: ActiveValue::Set(site_id),
        rack_id: ActiveValue::Set(rack_id),
        cluster_id: ActiveValue::Set(cluster_id),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(device.insert(db).await?)
}

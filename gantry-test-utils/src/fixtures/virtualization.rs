//! Persisted virtualization fixtures: cluster types, cluster groups,
//! clusters, virtual machines, and VM interfaces.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};

use crate::error::TestError;

pub async fn create_cluster_type(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<entity::cluster_type::Model, TestError> {
    let now = Utc::now().naive_utc();
    let cluster_type = entity::cluster_type::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        slug: ActiveValue::Set(slug.to_string()),
        description: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(cluster_type.insert(db).await?)
}

pub async fn create_cluster_group(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<entity::cluster_group::Model, TestError> {
    let now = Utc::now().naive_utc();
    let group = entity::cluster_group::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        slug: ActiveValue::Set(slug.to_string()),
        description: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(group.insert(db).await?)
}

pub async fn create_cluster(
    db: &DatabaseConnection,
    cluster_type_id: i32,
    name: &str,
) -> Result<entity::cluster::Model, TestError> {
    let now = Utc::now().naive_utc();
    let cluster = entity::cluster::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        cluster_type_id: ActiveValue::Set(cluster_type_id),
        cluster_group_id: ActiveValue::Set(None),
        status: ActiveValue::Set("active".to_string()),
        comments: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(cluster.insert(db).await?)
}

pub async fn create_virtual_machine(
    db: &DatabaseConnection,
    cluster_id: i32,
    name: &str,
) -> Result<entity::virtual_machine::Model, TestError> {
    let now = Utc::now().naive_utc();
    let machine = entity::virtual_machine::ActiveModel {
        name: ActiveValue::Set(name.to_string()),
        cluster_id: ActiveValue::Set(cluster_id),
        status: ActiveValue::Set("active".to_string()),
        vcpus: ActiveValue::Set(Some(2)),
        memory_mb: ActiveValue::Set(Some(4096)),
        disk_gb: ActiveValue::Set(Some(40)),
        comments: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(machine.insert(db).await?)
}

pub async fn create_vm_interface(
    db: &DatabaseConnection,
    virtual_machine_id: i32,
    name: &str,
) -> Result<entity::vm_interface::Model, TestError> {
    let now = Utc::now().naive_utc();
    let interface = entity::vm_interface::ActiveModel {
        virtual_machine_id: ActiveValue::Set(virtual_machine_id),
        name: ActiveValue::Set(name.to_string()),
        enabled: ActiveValue::Set(true),
        mtu: ActiveValue::Set(Some(1500)),
        mac_address: ActiveValue::Set(None),
        description: ActiveValue::Set(String::new()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    };

    Ok(interface.insert(db).await?)
}

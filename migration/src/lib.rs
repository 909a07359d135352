pub use sea_orm_migration::prelude::*;

mod m20260801_000001_site;
mod m20260801_000002_rack_role;
mod m20260801_000003_rack;
mod m20260801_000004_cluster_type;
mod m20260801_000005_cluster_group;
mod m20260801_000006_cluster;
mod m20260801_000007_device;
mod m20260801_000008_virtual_machine;
mod m20260801_000009_vm_interface;
mod m20260801_000010_tag;
mod m20260801_000011_custom_field;
mod m20260801_000012_webhook;
mod m20260801_000013_journal_entry;
mod m20260801_000014_object_change;
mod m20260801_000015_user_preference;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_site::Migration),
            Box::new(m20260801_000002_rack_role::Migration),
            Box::new(m20260801_000003_rack::Migration),
            Box::new(m20260801_000004_cluster_type::Migration),
            Box::new(m20260801_000005_cluster_group::Migration),
            Box::new(m20260801_000006_cluster::Migration),
            Box::new(m20260801_000007_device::Migration),
            Box::new(m20260801_000008_virtual_machine::Migration),
            Box::new(m20260801_000009_vm_interface::Migration),
            Box::new(m20260801_000010_tag::Migration),
            Box::new(m20260801_000011_custom_field::Migration),
            Box::new(m20260801_000012_webhook::Migration),
            Box::new(m20260801_000013_journal_entry::Migration),
            Box::new(m20260801_000014_object_change::Migration),
            Box::new(m20260801_000015_user_preference::Migration),
        ]
    }
}

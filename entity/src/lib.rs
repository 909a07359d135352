//! SeaORM entity definitions for the gantry inventory schema.

pub mod prelude;

pub mod cluster;
pub mod cluster_group;
pub mod cluster_type;
pub mod custom_field;
pub mod device;
pub mod journal_entry;
pub mod object_change;
pub mod rack;
pub mod rack_role;
pub mod site;
pub mod tag;
pub mod user_preference;
pub mod virtual_machine;
pub mod vm_interface;
pub mod webhook;

//! Gantry: a web-based infrastructure resource inventory.
//!
//! Racks, clusters, virtual machines, interfaces, and their supporting
//! types are all served through one generic CRUD view framework; see
//! [`server::generic`] for the operation templates and [`server::views`]
//! for the per-type configuration.

pub mod model;
pub mod server;

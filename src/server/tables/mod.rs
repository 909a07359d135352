//! Declarative table schemas, one module per application.

pub mod dcim;
pub mod extras;
pub mod virtualization;

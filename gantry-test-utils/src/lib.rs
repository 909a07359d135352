//! Test support for the gantry workspace: in-memory database setup and
//! persisted inventory fixtures.

pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::TestSetup;

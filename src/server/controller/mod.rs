pub mod objects;
pub mod preference;

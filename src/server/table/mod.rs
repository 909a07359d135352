//! Table rendering: shared column descriptors per object type, bound to a
//! record collection and the acting user's column preferences per request.

pub mod column;
pub mod schema;
pub mod table;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::generic::registry::ViewRegistry;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub registry: Arc<ViewRegistry>,
}

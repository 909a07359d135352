use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

pub struct TestSetup {
    pub db: DatabaseConnection,
}

impl TestSetup {
    pub async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup { db })
    }

    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}

#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        TestSetup::new().await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

/// Creates every inventory table, the change log, and the preference store.
#[macro_export]
macro_rules! test_setup_with_inventory_tables {
    () => {{
        async {
            let setup = TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                schema.create_table_from_entity(entity::prelude::Site),
                schema.create_table_from_entity(entity::prelude::RackRole),
                schema.create_table_from_entity(entity::prelude::Rack),
                schema.create_table_from_entity(entity::prelude::ClusterType),
                schema.create_table_from_entity(entity::prelude::ClusterGroup),
                schema.create_table_from_entity(entity::prelude::Cluster),
                schema.create_table_from_entity(entity::prelude::Device),
                schema.create_table_from_entity(entity::prelude::VirtualMachine),
                schema.create_table_from_entity(entity::prelude::VmInterface),
                schema.create_table_from_entity(entity::prelude::Tag),
                schema.create_table_from_entity(entity::prelude::CustomField),
                schema.create_table_from_entity(entity::prelude::Webhook),
                schema.create_table_from_entity(entity::prelude::JournalEntry),
                schema.create_table_from_entity(entity::prelude::ObjectChange),
                schema.create_table_from_entity(entity::prelude::UserPreference),
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }.await
    }};
}

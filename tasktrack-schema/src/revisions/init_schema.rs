/// Initial schema: users, tasks and comments
///
/// Upgrade creates the tables in dependency order (`users`, `tasks`,
/// `comments`) because each later table declares foreign keys into earlier
/// ones. Downgrade drops them in exactly the reverse order because a table
/// cannot be dropped while another table still references it.
///
/// ```text
/// absent --upgrade--> present
/// present --downgrade--> absent
/// ```
///
/// Calling either direction from the wrong state fails with the
/// storage-engine error (`DuplicateObject` / `UndefinedTable`).

use super::Migration;
use crate::error::SchemaError;
use crate::schema::TABLES;
use async_trait::async_trait;
use sqlx::PgConnection;
use tracing::info;

/// The `init_schema` migration
#[derive(Debug, Clone, Copy, Default)]
pub struct InitSchema;

impl InitSchema {
    pub const REVISION: &'static str = "init_schema";
}

#[async_trait]
impl Migration for InitSchema {
    fn revision(&self) -> &'static str {
        Self::REVISION
    }

    fn down_revision(&self) -> Option<&'static str> {
        None
    }

    async fn upgrade(&self, conn: &mut PgConnection) -> Result<(), SchemaError> {
        for table in TABLES.iter() {
            sqlx::query(&table.create_sql()).execute(&mut *conn).await?;
            info!(table = table.name, "Created table");
        }

        Ok(())
    }

    async fn downgrade(&self, conn: &mut PgConnection) -> Result<(), SchemaError> {
        for table in TABLES.iter().rev() {
            sqlx::query(&table.drop_sql()).execute(&mut *conn).await?;
            info!(table = table.name, "Dropped table");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_metadata() {
        let migration = InitSchema;
        assert_eq!(migration.revision(), "init_schema");
        assert_eq!(migration.down_revision(), None);
    }
}

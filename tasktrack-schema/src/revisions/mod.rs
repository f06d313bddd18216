/// Migration units for the TaskTrack schema
///
/// A migration unit is a directional schema change: `upgrade` moves the
/// schema forward, `downgrade` reverses it. Units receive a connection from
/// the runner and only issue statements on it. They never open connections,
/// begin transactions or retry; transaction handling belongs to the caller
/// (see `db::migrations`).
///
/// Units form a linear chain: each declares its own revision identifier and
/// the revision it follows (`None` for the first one).
///
/// # Example
///
/// ```no_run
/// use tasktrack_schema::revisions::{Migration, InitSchema};
/// use sqlx::{Connection, PgConnection};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut conn = PgConnection::connect("postgresql://localhost/tasktrack").await?;
///
/// let migration = InitSchema;
/// migration.upgrade(&mut conn).await?;
/// migration.downgrade(&mut conn).await?;
/// # Ok(())
/// # }
/// ```

mod init_schema;

pub use init_schema::InitSchema;

use crate::error::SchemaError;
use async_trait::async_trait;
use sqlx::PgConnection;

/// A directional schema change
#[async_trait]
pub trait Migration: Send + Sync {
    /// Unique identifier of this migration
    fn revision(&self) -> &'static str;

    /// Identifier of the migration this one follows, None if it is the first
    fn down_revision(&self) -> Option<&'static str>;

    /// Applies the change
    ///
    /// # Errors
    ///
    /// Fails if the schema is not in the state this migration starts from;
    /// the storage-engine error is returned unchanged (classified).
    async fn upgrade(&self, conn: &mut PgConnection) -> Result<(), SchemaError>;

    /// Reverses the change, destroying any data it created
    ///
    /// # Errors
    ///
    /// Fails if the schema is not in the state `upgrade` leaves behind.
    async fn downgrade(&self, conn: &mut PgConnection) -> Result<(), SchemaError>;
}

/// All known migrations, ordered from first to last
pub fn all() -> Vec<Box<dyn Migration>> {
    vec![Box::new(InitSchema)]
}

/// Finds a migration by revision identifier
pub fn find(revision: &str) -> Option<Box<dyn Migration>> {
    all().into_iter().find(|m| m.revision() == revision)
}

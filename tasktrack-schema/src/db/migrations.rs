/// Migration invocation and schema inspection
///
/// This module is the thin runner side of a migration: it supplies a
/// connection to a migration unit and decides the transaction boundary.
/// Both directions run inside a single transaction, so on PostgreSQL
/// (transactional DDL) a failure part way through leaves the schema exactly
/// as it was.
///
/// There is no version table and no locking. The state of the schema is
/// derived from which tables exist in the connection's current schema.
///
/// # Example
///
/// ```no_run
/// use tasktrack_schema::db::pool::{create_pool, DatabaseConfig};
/// use tasktrack_schema::db::migrations::{schema_state, upgrade, SchemaState};
/// use tasktrack_schema::revisions::InitSchema;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// if schema_state(&pool).await? == SchemaState::Absent {
///     upgrade(&pool, &InitSchema).await?;
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::SchemaError;
use crate::revisions::Migration;
use crate::schema::TABLES;
use sqlx::{migrate::MigrateDatabase, postgres::PgPool, PgExecutor, Postgres};
use std::fmt;
use tracing::{debug, info, warn};

/// Presence of the schema's tables in the current schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaState {
    /// None of the tables exist
    Absent,

    /// All tables exist
    Present,

    /// Some tables exist; holds the names of the missing ones
    ///
    /// Only reachable when a non-transactional run was interrupted.
    /// Requires manual inspection before running either direction.
    Partial(Vec<&'static str>),
}

impl fmt::Display for SchemaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaState::Absent => write!(f, "absent"),
            SchemaState::Present => write!(f, "present"),
            SchemaState::Partial(missing) => write!(f, "partial (missing: {})", missing.join(", ")),
        }
    }
}

impl SchemaState {
    /// Derives the state from the set of table names that exist
    pub fn from_existing<S: AsRef<str>>(existing: &[S]) -> Self {
        let missing: Vec<&'static str> = TABLES
            .iter()
            .map(|t| t.name)
            .filter(|name| !existing.iter().any(|e| e.as_ref() == *name))
            .collect();

        if missing.is_empty() {
            SchemaState::Present
        } else if missing.len() == TABLES.len() {
            SchemaState::Absent
        } else {
            SchemaState::Partial(missing)
        }
    }
}

/// Inspects which of the schema's tables exist in the current schema
///
/// # Errors
///
/// Returns an error if the catalog query fails
pub async fn schema_state<'c, E>(executor: E) -> Result<SchemaState, SchemaError>
where
    E: PgExecutor<'c>,
{
    debug!("Inspecting schema state");

    let names: Vec<&str> = TABLES.iter().map(|t| t.name).collect();

    let existing: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text
         FROM information_schema.tables
         WHERE table_schema = current_schema()
         AND table_name::text = ANY($1)",
    )
    .bind(&names)
    .fetch_all(executor)
    .await?;

    let state = SchemaState::from_existing(existing.as_slice());
    debug!(state = %state, "Schema state retrieved");
    Ok(state)
}

/// Applies a migration's upgrade inside one transaction
///
/// # Errors
///
/// Returns the migration's error unchanged after rolling back, or an error
/// if the transaction cannot be started or committed.
pub async fn upgrade(pool: &PgPool, migration: &dyn Migration) -> Result<(), SchemaError> {
    info!(revision = migration.revision(), "Upgrading schema");

    let mut tx = pool.begin().await?;

    if let Err(e) = migration.upgrade(&mut *tx).await {
        warn!(revision = migration.revision(), error = %e, "Upgrade failed, rolling back");
        if let Err(rollback_err) = tx.rollback().await {
            warn!(error = %rollback_err, "Rollback failed");
        }
        return Err(e);
    }

    tx.commit().await?;

    info!(revision = migration.revision(), "Upgrade committed");
    Ok(())
}

/// Applies a migration's downgrade inside one transaction
///
/// ⚠️  Destroys every row stored in the tables the migration created.
///
/// # Errors
///
/// Returns the migration's error unchanged after rolling back, or an error
/// if the transaction cannot be started or committed.
pub async fn downgrade(pool: &PgPool, migration: &dyn Migration) -> Result<(), SchemaError> {
    warn!(revision = migration.revision(), "Downgrading schema, table data will be lost");

    let mut tx = pool.begin().await?;

    if let Err(e) = migration.downgrade(&mut *tx).await {
        warn!(revision = migration.revision(), error = %e, "Downgrade failed, rolling back");
        if let Err(rollback_err) = tx.rollback().await {
            warn!(error = %rollback_err, "Rollback failed");
        }
        return Err(e);
    }

    tx.commit().await?;

    info!(revision = migration.revision(), "Downgrade committed");
    Ok(())
}

/// Creates the database if it doesn't exist
///
/// Useful for development; in production the database should already exist.
///
/// # Errors
///
/// Returns an error if the server is unreachable or the role may not create
/// databases.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    info!("Checking if database exists");

    if !Postgres::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
        info!("Database created successfully");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}

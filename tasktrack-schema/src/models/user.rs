/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     username VARCHAR(50) NOT NULL UNIQUE,
///     password VARCHAR(100) NOT NULL,
///     created_at TIMESTAMP DEFAULT now()
/// );
/// ```
///
/// Deleting a user cascades to its tasks, the comments on those tasks and
/// the comments the user wrote.
///
/// # Example
///
/// ```no_run
/// use tasktrack_schema::models::user::{User, CreateUser};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     password: "$2b$10$...".to_string(),
/// })
/// .await?;
///
/// let found = User::find_by_username(&pool, "alice").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use crate::error::SchemaError;
use chrono::NaiveDateTime;
use sqlx::PgExecutor;

/// User account row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Auto-assigned ID
    pub id: i32,

    /// Unique login name (at most 50 characters)
    pub username: String,

    /// Password as stored (already hashed by the caller)
    pub password: String,

    /// Set by the database when the row is inserted
    pub created_at: Option<NaiveDateTime>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,

    /// Hashed password, never plaintext
    pub password: String,
}

impl User {
    /// Inserts a user; `id` and `created_at` are assigned by the database
    ///
    /// # Errors
    ///
    /// - `UniqueViolation` if the username is taken
    /// - `StringLengthExceeded` if username or password are too long
    pub async fn create<'c, E>(executor: E, data: CreateUser) -> Result<Self, SchemaError>
    where
        E: PgExecutor<'c>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.password)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id<'c, E>(executor: E, id: i32) -> Result<Option<Self>, SchemaError>
    where
        E: PgExecutor<'c>,
    {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    pub async fn find_by_username<'c, E>(
        executor: E,
        username: &str,
    ) -> Result<Option<Self>, SchemaError>
    where
        E: PgExecutor<'c>,
    {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Deletes a user and, through ON DELETE CASCADE, everything it owns
    ///
    /// Returns true if a row was deleted.
    pub async fn delete<'c, E>(executor: E, id: i32) -> Result<bool, SchemaError>
    where
        E: PgExecutor<'c>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

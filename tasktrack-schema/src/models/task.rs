/// Task model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id SERIAL PRIMARY KEY,
///     user_id INTEGER REFERENCES users (id) ON DELETE CASCADE,
///     title VARCHAR(100) NOT NULL,
///     description TEXT,
///     status VARCHAR(20) DEFAULT 'pending',
///     created_at TIMESTAMP DEFAULT now()
/// );
/// ```
///
/// `status` has no application-side default: when `CreateTask::status` is
/// None the column is left out of the INSERT and the server default
/// (`'pending'`) applies.

use crate::error::SchemaError;
use chrono::NaiveDateTime;
use sqlx::PgExecutor;

/// Task row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Task {
    pub id: i32,

    /// Owning user; None for unowned tasks
    pub user_id: Option<i32>,

    pub title: String,

    pub description: Option<String>,

    /// Free-form status, `pending` unless written otherwise
    pub status: Option<String>,

    pub created_at: Option<NaiveDateTime>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub user_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,

    /// None leaves the column to its server default
    pub status: Option<String>,
}

impl Task {
    /// Inserts a task
    ///
    /// # Errors
    ///
    /// - `ForeignKeyViolation` if `user_id` names a missing user
    /// - `StringLengthExceeded` if title or status are too long
    pub async fn create<'c, E>(executor: E, data: CreateTask) -> Result<Self, SchemaError>
    where
        E: PgExecutor<'c>,
    {
        // Build the column list so an omitted status is not written as NULL
        let mut columns = String::from("user_id, title, description");
        let mut values = String::from("$1, $2, $3");
        if data.status.is_some() {
            columns.push_str(", status");
            values.push_str(", $4");
        }

        let query = format!(
            "INSERT INTO tasks ({}) VALUES ({}) \
             RETURNING id, user_id, title, description, status, created_at",
            columns, values
        );

        let mut q = sqlx::query_as::<_, Task>(&query)
            .bind(data.user_id)
            .bind(data.title)
            .bind(data.description);

        if let Some(status) = data.status {
            q = q.bind(status);
        }

        let task = q.fetch_one(executor).await?;

        Ok(task)
    }

    pub async fn find_by_id<'c, E>(executor: E, id: i32) -> Result<Option<Self>, SchemaError>
    where
        E: PgExecutor<'c>,
    {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(task)
    }
}

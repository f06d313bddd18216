/// Comment model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id SERIAL PRIMARY KEY,
///     task_id INTEGER REFERENCES tasks (id) ON DELETE CASCADE,
///     user_id INTEGER REFERENCES users (id) ON DELETE CASCADE,
///     content TEXT NOT NULL,
///     created_at TIMESTAMP DEFAULT now()
/// );
/// ```

use crate::error::SchemaError;
use chrono::NaiveDateTime;
use sqlx::PgExecutor;

/// Comment row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    pub id: i32,
    pub task_id: Option<i32>,

    /// Author
    pub user_id: Option<i32>,

    pub content: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Input for creating a new comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub task_id: Option<i32>,
    pub user_id: Option<i32>,
    pub content: String,
}

impl Comment {
    /// Inserts a comment
    ///
    /// # Errors
    ///
    /// `ForeignKeyViolation` if the task or the author does not exist
    pub async fn create<'c, E>(executor: E, data: CreateComment) -> Result<Self, SchemaError>
    where
        E: PgExecutor<'c>,
    {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (task_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, task_id, user_id, content, created_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.user_id)
        .bind(data.content)
        .fetch_one(executor)
        .await?;

        Ok(comment)
    }

    pub async fn find_by_id<'c, E>(executor: E, id: i32) -> Result<Option<Self>, SchemaError>
    where
        E: PgExecutor<'c>,
    {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, task_id, user_id, content, created_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(comment)
    }
}

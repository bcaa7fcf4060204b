/// Task model and database operations
///
/// A task is a unit of work on exactly one board, owned by exactly one user.
/// Tasks move between boards by changing `board_id` and can be deleted
/// without touching their board.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     created_on TIMESTAMPTZ NOT NULL,
///     owner_id UUID NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     board_id INTEGER NOT NULL REFERENCES boards (id) ON DELETE RESTRICT
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_data::models::task::{CreateTask, Task};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, owner_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let task = Task::create(&pool, CreateTask {
///     title: "Style CSS".to_string(),
///     description: "Poprawić wygląd interfejsu".to_string(),
///     owner_id,
///     board_id: 1,
///     created_on: None,
/// }).await?;
///
/// // Move it to "W trakcie realizacji"
/// Task::move_to_board(&pool, task.id, 2).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::StoreResult;

/// Task model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Task ID
    pub id: i32,

    /// Short title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// When the task was created
    pub created_on: DateTime<Utc>,

    /// Owning user
    pub owner_id: Uuid,

    /// Board the task currently sits on
    pub board_id: i32,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTask {
    /// Short title
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Free-form description
    #[validate(length(max = 4000))]
    pub description: String,

    /// Owning user
    pub owner_id: Uuid,

    /// Target board
    pub board_id: i32,

    /// Creation time (None = now)
    pub created_on: Option<DateTime<Utc>>,
}

/// Input for editing a task
///
/// Only non-None fields are updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    /// New title
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl Task {
    /// Creates a task
    ///
    /// # Errors
    ///
    /// - `Validation` for an empty title
    /// - `ConstraintViolation` if the owner or board doesn't exist
    pub async fn create(pool: &PgPool, data: CreateTask) -> StoreResult<Self> {
        data.validate()?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, created_on, owner_id, board_id)
            VALUES ($1, $2, COALESCE($3, NOW()), $4, $5)
            RETURNING id, title, description, created_on, owner_id, board_id
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.created_on)
        .bind(data.owner_id)
        .bind(data.board_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> StoreResult<Option<Self>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, created_on, owner_id, board_id
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists the tasks on a board, newest first
    pub async fn list_by_board(pool: &PgPool, board_id: i32) -> StoreResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, created_on, owner_id, board_id
            FROM tasks
            WHERE board_id = $1
            ORDER BY created_on DESC, id
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists the tasks owned by a user, newest first
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> StoreResult<Vec<Self>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, created_on, owner_id, board_id
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_on DESC, id
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Edits title and/or description
    ///
    /// Returns the updated task, or None if it doesn't exist.
    pub async fn update(pool: &PgPool, id: i32, data: UpdateTask) -> StoreResult<Option<Self>> {
        data.validate()?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, title, description, created_on, owner_id, board_id
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Moves a task to another board
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the target board doesn't exist.
    pub async fn move_to_board(pool: &PgPool, id: i32, board_id: i32) -> StoreResult<Option<Self>> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET board_id = $2
            WHERE id = $1
            RETURNING id, title, description, created_on, owner_id, board_id
            "#,
        )
        .bind(id)
        .bind(board_id)
        .fetch_optional(pool)
        .await?;

        if let Some(ref t) = task {
            tracing::debug!(task_id = t.id, board_id = t.board_id, "Task moved");
        }

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all tasks
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_validation() {
        let valid = CreateTask {
            title: "Klient dla Windowsa".to_string(),
            description: String::new(),
            owner_id: Uuid::new_v4(),
            board_id: 2,
            created_on: None,
        };
        assert!(valid.validate().is_ok());

        let untitled = CreateTask {
            title: String::new(),
            ..valid
        };
        assert!(untitled.validate().is_err());
    }

    #[test]
    fn test_update_task_validation() {
        assert!(UpdateTask::default().validate().is_ok());

        let blank_title = UpdateTask {
            title: Some(String::new()),
            description: None,
        };
        assert!(blank_title.validate().is_err());
    }
}

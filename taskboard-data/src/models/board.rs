/// Board model and database operations
///
/// A board is a named lane that groups tasks ("Nowe zadanie", "Gotowe", ...).
/// Boards own their tasks one-to-many, and a board that still has tasks
/// cannot be deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
///     name TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_data::models::board::{Board, CreateBoard};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let backlog = Board::create(&pool, CreateBoard { name: "Backlog".to_string() }).await?;
/// println!("Backlog is board {}", backlog.id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use crate::error::StoreResult;

/// Board model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    /// Board ID, assigned by the store unless seeded
    pub id: i32,

    /// Display name
    pub name: String,
}

/// Input for creating a board
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBoard {
    /// Display name
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl Board {
    /// Creates a board; the store assigns its ID
    ///
    /// # Errors
    ///
    /// `Validation` for an empty or overlong name.
    pub async fn create(pool: &PgPool, data: CreateBoard) -> StoreResult<Self> {
        data.validate()?;

        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(board)
    }

    /// Finds a board by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> StoreResult<Option<Self>> {
        let board = sqlx::query_as::<_, Board>("SELECT id, name FROM boards WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(board)
    }

    /// Lists all boards in ID order
    pub async fn list(pool: &PgPool) -> StoreResult<Vec<Self>> {
        let boards = sqlx::query_as::<_, Board>("SELECT id, name FROM boards ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(boards)
    }

    /// Renames a board
    ///
    /// Returns the updated board, or None if it doesn't exist.
    pub async fn rename(pool: &PgPool, id: i32, name: &str) -> StoreResult<Option<Self>> {
        CreateBoard {
            name: name.to_string(),
        }
        .validate()?;

        let board = sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET name = $2
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Deletes a board
    ///
    /// Returns true if a row was deleted.
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` while any task still references the board.
    pub async fn delete(pool: &PgPool, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all boards
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts the tasks on a board
    pub async fn task_count(pool: &PgPool, id: i32) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE board_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

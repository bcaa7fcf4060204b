/// Database models for TaskBoard
///
/// # Models
///
/// - `board`: lanes that group tasks
/// - `task`: units of work, each on one board and owned by one user
/// - `user`: accounts that own tasks
///
/// # Example
///
/// ```no_run
/// use taskboard_data::models::board::{Board, CreateBoard};
/// use taskboard_data::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// }).await?;
///
/// for board in Board::list(&pool).await? {
///     println!("{}: {}", board.id, board.name);
/// }
/// # Ok(())
/// # }
/// ```

pub mod board;
pub mod task;
pub mod user;

pub use board::{Board, CreateBoard};
pub use task::{CreateTask, Task, UpdateTask};
pub use user::{normalize_key, CreateUser, User};

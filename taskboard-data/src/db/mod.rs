/// Database layer for TaskBoard
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health checks
/// - `migrations`: embedded schema migrations and database creation
/// - `relationships`: foreign key registry with explicit delete policies
/// - `retry`: bounded backoff for store creation and connection
///
/// Entity CRUD lives in the `models` module at the crate root.

pub mod migrations;
pub mod pool;
pub mod relationships;
pub mod retry;

//! # TaskBoard Data Layer
//!
//! Relational mapping and first-run initialization for the TaskBoard
//! application: boards, tasks and the users who own them.
//!
//! ## Module Organization
//!
//! - `models`: Board, Task and User rows with their CRUD operations
//! - `db`: connection pool, migrations, relationship registry, retry
//! - `auth`: pluggable credential hashing
//! - `seed`: `SchemaSeeder` and the demo fixtures
//! - `error`: `StoreError` taxonomy

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod seed;

pub use error::{StoreError, StoreResult};
pub use seed::{SchemaSeeder, SeedOutcome};

/// Current version of the TaskBoard data library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

/// Error types for the TaskBoard data layer
///
/// Every store operation returns [`StoreResult`]. Raw `sqlx` errors are
/// classified on conversion so callers can tell a transient outage from a
/// broken constraint without inspecting SQLSTATE codes themselves.
///
/// # Taxonomy
///
/// - `StoreUnavailable`: the store cannot be reached or created (transient)
/// - `ConstraintViolation`: a key or relationship rule rejected the write (fatal)
/// - `DuplicateSeed`: the seed set is already present (benign)

use crate::auth::password::PasswordError;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Unified data layer error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store is unreachable or could not be created
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    /// A key, foreign key or relationship rule was violated
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        /// Constraint name reported by the store, if any
        constraint: Option<String>,
        /// Human-readable description
        message: String,
    },

    /// The seed dataset has already been applied
    #[error("Seed data already present")]
    DuplicateSeed,

    /// Input rejected before reaching the store
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Credential hashing failed
    #[error("Credential error: {0}")]
    Credential(#[from] PasswordError),

    /// Any other database error
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

/// Coarse classification of a SQLSTATE code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlStateClass {
    /// Class 23: integrity constraint violation
    IntegrityConstraint,

    /// Unique key violation (23505)
    UniqueViolation,

    /// Class 08 or 57P03: connection problems
    Connection,

    /// Anything else
    Other,
}

/// Classifies a PostgreSQL SQLSTATE code
///
/// Unique violations get their own class so callers can report duplicate
/// keys separately from other class-23 codes.
pub fn classify_sqlstate(code: &str) -> SqlStateClass {
    match code {
        "23505" => SqlStateClass::UniqueViolation,
        c if c.starts_with("23") => SqlStateClass::IntegrityConstraint,
        c if c.starts_with("08") || c == "57P03" => SqlStateClass::Connection,
        _ => SqlStateClass::Other,
    }
}

impl StoreError {
    /// Builds a constraint violation that did not come from the store itself
    pub fn constraint(message: impl Into<String>) -> Self {
        StoreError::ConstraintViolation {
            constraint: None,
            message: message.into(),
        }
    }

    /// True for `ConstraintViolation`
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation { .. })
    }

    /// True for errors worth retrying at process level
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::StoreUnavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let class = match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => SqlStateClass::Connection,
            sqlx::Error::Database(db_err) => {
                let class = db_err
                    .code()
                    .map(|code| classify_sqlstate(&code))
                    .unwrap_or(SqlStateClass::Other);

                if matches!(
                    class,
                    SqlStateClass::IntegrityConstraint | SqlStateClass::UniqueViolation
                ) {
                    return StoreError::ConstraintViolation {
                        constraint: db_err.constraint().map(str::to_string),
                        message: db_err.message().to_string(),
                    };
                }
                class
            }
            _ => SqlStateClass::Other,
        };

        match class {
            SqlStateClass::Connection => StoreError::StoreUnavailable(err),
            _ => StoreError::Database(err),
        }
    }
}

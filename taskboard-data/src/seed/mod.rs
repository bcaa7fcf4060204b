/// Store initialization and demo seeding
///
/// [`SchemaSeeder`] takes a store from "uninitialized" to "initialized" in one
/// idempotent step:
///
/// 1. create the database if it doesn't exist (retried)
/// 2. connect the pool (retried)
/// 3. apply migrations
/// 4. verify foreign keys against the relationship registry
/// 5. if seeding is enabled and no seed marker exists, insert the demo set
///
/// Step 5 runs in a single transaction and is never retried. The
/// `seed_history` primary key guarantees at most one seeder wins, even when
/// two processes start at once.
///
/// # Example
///
/// ```no_run
/// use taskboard_data::auth::password::Argon2Hasher;
/// use taskboard_data::db::pool::DatabaseConfig;
/// use taskboard_data::db::retry::RetryPolicy;
/// use taskboard_data::seed::SchemaSeeder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// };
///
/// let seeder = SchemaSeeder::new(Argon2Hasher::default());
/// let (pool, outcome) = seeder
///     .connect_and_initialize(&config, &RetryPolicy::default(), true)
///     .await?;
/// println!("{outcome}");
/// # drop(pool);
/// # Ok(())
/// # }
/// ```

pub mod fixtures;

use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::password::CredentialHasher;
use crate::db::migrations::{
    ensure_database_exists_with_retry, get_migration_status, run_migrations,
};
use crate::db::pool::{create_pool_with_retry, DatabaseConfig};
use crate::db::relationships::verify_relationships;
use crate::db::retry::RetryPolicy;
use crate::error::{StoreError, StoreResult};

pub use fixtures::{SeedData, SEED_NAME};

/// What initialization did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Seeding was disabled; only the schema was ensured
    SchemaOnly,

    /// The demo set was inserted by this call
    Seeded {
        boards: usize,
        users: usize,
        tasks: usize,
    },

    /// The demo set was already present
    AlreadySeeded,
}

impl fmt::Display for SeedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedOutcome::SchemaOnly => write!(f, "schema ready, seeding disabled"),
            SeedOutcome::Seeded {
                boards,
                users,
                tasks,
            } => write!(
                f,
                "seeded {} boards, {} users, {} tasks",
                boards, users, tasks
            ),
            SeedOutcome::AlreadySeeded => write!(f, "schema ready, seed already present"),
        }
    }
}

/// Ensures the schema exists and applies the demo seed once
#[derive(Clone)]
pub struct SchemaSeeder {
    hasher: Arc<dyn CredentialHasher>,
}

impl fmt::Debug for SchemaSeeder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSeeder").finish_non_exhaustive()
    }
}

impl SchemaSeeder {
    /// Creates a seeder that hashes the guest password with `hasher`
    pub fn new(hasher: impl CredentialHasher + 'static) -> Self {
        Self {
            hasher: Arc::new(hasher),
        }
    }

    /// Creates the database if needed, connects, then runs [`initialize`]
    ///
    /// Database creation and connection are retried under `retry`.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` once the retry budget is exhausted
    /// - anything [`initialize`] returns
    ///
    /// [`initialize`]: SchemaSeeder::initialize
    pub async fn connect_and_initialize(
        &self,
        config: &DatabaseConfig,
        retry: &RetryPolicy,
        seed_enabled: bool,
    ) -> StoreResult<(PgPool, SeedOutcome)> {
        ensure_database_exists_with_retry(&config.url, retry).await?;
        let pool = create_pool_with_retry(config, retry).await?;
        let outcome = self.initialize(&pool, seed_enabled).await?;
        Ok((pool, outcome))
    }

    /// Ensures the schema on an open pool and seeds if enabled
    ///
    /// Safe to call any number of times.
    ///
    /// # Errors
    ///
    /// - `Migration` if the schema cannot be applied
    /// - `ConstraintViolation` if the live foreign keys differ from the
    ///   registry, or a seed row breaks a constraint
    pub async fn initialize(&self, pool: &PgPool, seed_enabled: bool) -> StoreResult<SeedOutcome> {
        info!(seed_enabled, "Initializing TaskBoard store");

        run_migrations(pool).await?;
        let status = get_migration_status(pool).await?;
        debug!(
            applied_migrations = status.applied_migrations,
            latest_version = ?status.latest_version,
            "Schema version"
        );
        verify_relationships(pool).await?;

        let outcome = if seed_enabled {
            self.seed(pool).await?
        } else {
            SeedOutcome::SchemaOnly
        };

        info!(outcome = %outcome, "TaskBoard store initialized");
        Ok(outcome)
    }

    /// Inserts the demo set unless the seed marker is already present
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if an existing row occupies a seed key, for
    /// example a board the application created before seeding was enabled.
    /// Nothing is written and the marker stays unclaimed.
    pub async fn seed(&self, pool: &PgPool) -> StoreResult<SeedOutcome> {
        if is_seeded(pool).await? {
            debug!(seed = SEED_NAME, "Seed marker present, skipping");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let data = SeedData::build(Utc::now(), self.hasher.as_ref())?;

        let mut tx = pool.begin().await?;

        match insert_seed(&mut *tx, &data).await {
            Ok(()) => {}
            Err(StoreError::DuplicateSeed) => {
                tx.rollback().await?;
                info!(seed = SEED_NAME, "Seed marker claimed by another seeder");
                return Ok(SeedOutcome::AlreadySeeded);
            }
            Err(e) => {
                warn!(error = %e, "Seeding failed, rolling back");
                tx.rollback().await?;
                return Err(e);
            }
        }

        tx.commit().await?;

        let outcome = SeedOutcome::Seeded {
            boards: data.boards.len(),
            users: 1,
            tasks: data.tasks.len(),
        };
        info!(outcome = %outcome, "Demo data inserted");
        Ok(outcome)
    }
}

/// True if the demo seed marker has been recorded
pub async fn is_seeded(pool: &PgPool) -> StoreResult<bool> {
    let seeded: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM seed_history WHERE name = $1)")
            .bind(SEED_NAME)
            .fetch_one(pool)
            .await?;

    Ok(seeded)
}

/// Claims the seed marker, then writes every row on the same connection
///
/// Only a marker conflict means the seed is already applied. Any rejection
/// of the seed rows themselves surfaces as the classified store error.
async fn insert_seed(conn: &mut PgConnection, data: &SeedData) -> StoreResult<()> {
    // A concurrent seeder blocks here until the other transaction ends, then
    // sees the conflict.
    let claimed: Option<String> = sqlx::query_scalar(
        r#"
        INSERT INTO seed_history (name)
        VALUES ($1)
        ON CONFLICT (name) DO NOTHING
        RETURNING name
        "#,
    )
    .bind(SEED_NAME)
    .fetch_optional(&mut *conn)
    .await?;

    if claimed.is_none() {
        return Err(StoreError::DuplicateSeed);
    }

    insert_seed_rows(conn, data).await?;
    Ok(())
}

async fn insert_seed_rows(conn: &mut PgConnection, data: &SeedData) -> Result<(), sqlx::Error> {
    for board in &data.boards {
        sqlx::query("INSERT INTO boards (id, name) VALUES ($1, $2)")
            .bind(board.id)
            .bind(&board.name)
            .execute(&mut *conn)
            .await?;
    }

    let guest = &data.guest;
    sqlx::query(
        r#"
        INSERT INTO users (id, user_name, normalized_user_name, email, normalized_email,
                           first_name, last_name, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(guest.id)
    .bind(&guest.user_name)
    .bind(&guest.normalized_user_name)
    .bind(&guest.email)
    .bind(&guest.normalized_email)
    .bind(&guest.first_name)
    .bind(&guest.last_name)
    .bind(&guest.password_hash)
    .execute(&mut *conn)
    .await?;

    for task in &data.tasks {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, created_on, owner_id, board_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.created_on)
        .bind(task.owner_id)
        .bind(task.board_id)
        .execute(&mut *conn)
        .await?;
    }

    // Explicit IDs don't advance identity sequences
    for table in ["boards", "tasks"] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
             (SELECT COALESCE(MAX(id), 0) + 1 FROM {table}), false)"
        ))
        .execute(&mut *conn)
        .await?;
    }

    debug!(
        boards = data.boards.len(),
        excluded_boards = data.excluded_boards.len(),
        tasks = data.tasks.len(),
        "Seed rows written"
    );
    Ok(())
}

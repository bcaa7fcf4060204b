/// Startup initialization sequence
///
/// Connects to the store, ensures the schema, seeds if configured, then
/// releases the pool. The web application opens its own pool afterwards.

use anyhow::Context;
use taskboard_data::auth::password::Argon2Hasher;
use taskboard_data::db::pool::{close_pool, get_pool_stats};
use taskboard_data::{SchemaSeeder, SeedOutcome, StoreError};
use tracing::{error, info};

use crate::config::Config;

/// Runs initialization once and reports what happened
///
/// # Errors
///
/// Fails on `StoreUnavailable` after the retry budget, and on any
/// `ConstraintViolation`, which indicates a schema or fixture defect.
pub async fn run(config: &Config) -> anyhow::Result<SeedOutcome> {
    let seeder = SchemaSeeder::new(Argon2Hasher::default());

    let result = seeder
        .connect_and_initialize(
            &config.database_config(),
            &config.retry_policy(),
            config.seed.enabled,
        )
        .await;

    let (pool, outcome) = match result {
        Ok(ok) => ok,
        Err(e) => {
            log_failure(&e);
            return Err(e).context("TaskBoard store initialization failed");
        }
    };

    let stats = get_pool_stats(&pool);
    info!(
        total_connections = stats.total_connections,
        idle_connections = stats.idle_connections,
        "Initialization finished, releasing pool"
    );
    close_pool(pool).await;

    Ok(outcome)
}

fn log_failure(err: &StoreError) {
    match err {
        StoreError::StoreUnavailable(_) => {
            error!(error = %err, "Store unreachable, giving up after retries")
        }
        StoreError::ConstraintViolation { constraint, .. } => error!(
            error = %err,
            constraint = constraint.as_deref().unwrap_or("-"),
            "Schema or seed data is inconsistent"
        ),
        _ => error!(error = %err, "Initialization failed"),
    }
}

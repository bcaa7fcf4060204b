/// Configuration management for the seeder
///
/// This module loads configuration from environment variables (and a `.env`
/// file when present) into a type-safe struct.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `TASKBOARD_SEED`: insert the demo data set (default: false)
/// - `TASKBOARD_INIT_MAX_RETRIES`: retries for store creation/connection (default: 5)
/// - `TASKBOARD_INIT_RETRY_DELAY_MS`: first retry delay (default: 200)
/// - `TASKBOARD_LOG_FORMAT`: `text` or `json` (default: text)
/// - `RUST_LOG`: log filter (default: info for taskboard crates)
///
/// # Example
///
/// ```no_run
/// use taskboard_seeder::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Seeding enabled: {}", config.seed.enabled);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use taskboard_data::db::pool::DatabaseConfig;
use taskboard_data::db::retry::RetryPolicy;

/// Complete seeder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseSettings,

    /// Seeding configuration
    pub seed: SeedSettings,

    /// Retry configuration for store creation
    pub retry: RetrySettings,

    /// Log output format
    pub log_format: LogFormat,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Seeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Whether the demo data set is inserted on first start
    pub enabled: bool,
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Delay before the first retry, doubled on each further retry
    pub base_delay_ms: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    Text,

    /// One JSON object per line
    Json,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable has an
    /// invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("DATABASE_MAX_CONNECTIONS: {}", e))?;

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let enabled = match lookup("TASKBOARD_SEED") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| anyhow::anyhow!("TASKBOARD_SEED: invalid boolean '{}'", value))?,
            None => false,
        };

        let max_retries = lookup("TASKBOARD_INIT_MAX_RETRIES")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("TASKBOARD_INIT_MAX_RETRIES: {}", e))?;

        let base_delay_ms = lookup("TASKBOARD_INIT_RETRY_DELAY_MS")
            .unwrap_or_else(|| "200".to_string())
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("TASKBOARD_INIT_RETRY_DELAY_MS: {}", e))?;

        let log_format = match lookup("TASKBOARD_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("TASKBOARD_LOG_FORMAT: expected text or json, got '{}'", other),
        };

        Ok(Self {
            database: DatabaseSettings {
                url,
                max_connections,
            },
            seed: SeedSettings { enabled },
            retry: RetrySettings {
                max_retries,
                base_delay_ms,
            },
            log_format,
        })
    }

    /// Pool configuration for the data layer
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.max_connections.min(2),
            ..Default::default()
        }
    }

    /// Retry policy for store creation
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.retry.max_retries,
            base_delay_ms: self.retry.base_delay_ms,
            ..Default::default()
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// User model and database operations
///
/// Users own tasks. User name and email each have a normalized twin column
/// used for case-insensitive lookup. Passwords are stored only as the output
/// of a [`CredentialHasher`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY,
///     user_name TEXT NOT NULL UNIQUE,
///     normalized_user_name TEXT NOT NULL UNIQUE,
///     email TEXT NOT NULL,
///     normalized_email TEXT NOT NULL,
///     first_name TEXT NOT NULL,
///     last_name TEXT NOT NULL,
///     password_hash TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskboard_data::auth::password::{Argon2Hasher, CredentialHasher};
/// use taskboard_data::models::user::{CreateUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = Argon2Hasher::default();
/// let user = User::create(&pool, CreateUser {
///     user_name: "anna".to_string(),
///     email: "anna@example.com".to_string(),
///     first_name: "Anna".to_string(),
///     last_name: "Nowak".to_string(),
///     password_hash: hasher.hash("s3cret")?,
/// }).await?;
///
/// let found = User::find_by_user_name(&pool, "ANNA").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::CredentialHasher;
use crate::error::StoreResult;

/// User model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Login name as entered
    pub user_name: String,

    /// Lookup key for `user_name`
    pub normalized_user_name: String,

    /// Email address as entered
    pub email: String,

    /// Lookup key for `email`
    pub normalized_email: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// One-way credential hash
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Input for creating a new user
///
/// Normalized columns are derived with [`normalize_key`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUser {
    /// Login name
    #[validate(length(min = 1, max = 256))]
    pub user_name: String,

    /// Email address
    #[validate(email)]
    pub email: String,

    /// Given name
    #[validate(length(max = 100))]
    pub first_name: String,

    /// Family name
    #[validate(length(max = 100))]
    pub last_name: String,

    /// Credential hash (NOT plaintext password!)
    pub password_hash: String,
}

/// Derives the lookup key stored in the normalized columns
pub fn normalize_key(value: &str) -> String {
    value.trim().to_uppercase()
}

impl User {
    /// Creates a new user with a fresh UUID
    ///
    /// # Errors
    ///
    /// - `Validation` for a blank user name or malformed email
    /// - `ConstraintViolation` if the user name is already taken
    pub async fn create(pool: &PgPool, data: CreateUser) -> StoreResult<Self> {
        data.validate()?;

        let normalized_user_name = normalize_key(&data.user_name);
        let normalized_email = normalize_key(&data.email);

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, user_name, normalized_user_name, email, normalized_email,
                               first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_name, normalized_user_name, email, normalized_email,
                      first_name, last_name, password_hash
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_name)
        .bind(normalized_user_name)
        .bind(data.email)
        .bind(normalized_email)
        .bind(data.first_name)
        .bind(data.last_name)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> StoreResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, normalized_user_name, email, normalized_email,
                   first_name, last_name, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by login name, ignoring case
    pub async fn find_by_user_name(pool: &PgPool, user_name: &str) -> StoreResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, normalized_user_name, email, normalized_email,
                   first_name, last_name, password_hash
            FROM users
            WHERE UPPER(normalized_user_name) = $1
            "#,
        )
        .bind(normalize_key(user_name))
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email, ignoring case
    ///
    /// Email is not unique, so the earliest match by ID wins.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> StoreResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, normalized_user_name, email, normalized_email,
                   first_name, last_name, password_hash
            FROM users
            WHERE UPPER(normalized_email) = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(normalize_key(email))
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Replaces the stored credential hash
    ///
    /// Returns true if the user exists.
    pub async fn update_password_hash(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user together with the tasks they own
    pub async fn delete(pool: &PgPool, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all users
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Checks a plaintext password against this user's stored hash
    pub fn verify_password(
        &self,
        hasher: &dyn CredentialHasher,
        plaintext: &str,
    ) -> StoreResult<bool> {
        Ok(hasher.verify(plaintext, &self.password_hash)?)
    }
}

/// Credential hashing for TaskBoard users
///
/// Passwords are never stored in plaintext. The data layer only ever sees the
/// output of a [`CredentialHasher`], which lets callers plug in their own
/// security collaborator. [`Argon2Hasher`] is the default.
///
/// # Security
///
/// - **Algorithm**: Argon2id
/// - **Memory**: 64 MB (65536 KB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash, PHC string encoding
///
/// # Example
///
/// ```
/// use taskboard_data::auth::password::{Argon2Hasher, CredentialHasher};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = Argon2Hasher::default();
/// let hash = hasher.hash("gosc")?;
///
/// assert!(hasher.verify("gosc", &hash)?);
/// assert!(!hasher.verify("guest", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// One-way credential hashing capability
///
/// Implementations must be salted: hashing the same plaintext twice should
/// produce different strings that both verify.
pub trait CredentialHasher: Send + Sync {
    /// Hashes a plaintext credential into its storable form
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Checks a plaintext credential against a stored hash
    ///
    /// Returns `Ok(false)` for a mismatch and `Err` only when the stored hash
    /// cannot be parsed.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError>;
}

/// Argon2id parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB
    pub m_cost: u32,

    /// Number of passes
    pub t_cost: u32,

    /// Degree of parallelism
    pub p_cost: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            m_cost: 65536, // 64 MB
            t_cost: 3,
            p_cost: 4,
        }
    }
}

/// Argon2id implementation of [`CredentialHasher`]
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher {
    params: Argon2Params,
}

impl Argon2Hasher {
    /// Creates a hasher with explicit cost parameters
    pub fn with_params(params: Argon2Params) -> Self {
        Self { params }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        hash_password_with(plaintext, self.params)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
        verify_password(plaintext, hash)
    }
}

/// Hashes a password using Argon2id with the default parameters
///
/// Output is a PHC string, e.g.
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with(password, Argon2Params::default())
}

fn hash_password_with(password: &str, params: Argon2Params) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(params.m_cost)
        .t_cost(params.t_cost)
        .p_cost(params.p_cost)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a PHC-encoded hash
///
/// Parameters are read from the hash itself, so hashes produced with
/// non-default [`Argon2Params`] verify here too. Comparison is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Authentication utilities for TaskBoard
///
/// Only credential hashing lives here. Sign-in flows and identity endpoints
/// belong to the web application.
///
/// # Example
///
/// ```
/// use taskboard_data::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("gosc")?;
/// assert!(verify_password("gosc", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod password;

pub use password::{Argon2Hasher, CredentialHasher, PasswordError};

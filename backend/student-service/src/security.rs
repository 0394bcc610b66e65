/// Password hashing using Argon2id
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Hash a password for storage. Verification happens in the auth service at
/// login time.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AppError::Internal("Failed to hash password".to_string()))
}

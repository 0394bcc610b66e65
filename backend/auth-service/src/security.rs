/// Password verification using Argon2id
use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::error::AppError;

/// Verify a password against a stored hash. Both a bad hash and a wrong
/// password collapse to the same failure: login errors must not reveal
/// which record field was at fault.
pub fn verify_password(password: &str, hash: &str) -> Result<(), AppError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

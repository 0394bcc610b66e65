use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A student record.
///
/// `password` holds an Argon2 hash, never plaintext. Listings include it on
/// purpose: the auth service matches login credentials against the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudent {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudent {
    pub name: Option<String>,
    pub password: Option<String>,
}

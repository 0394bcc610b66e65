use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// What this service needs from a student or professor record to check a
/// login; the owning services send more fields, the rest are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PrincipalRecord {
    pub id: Uuid,
    pub email: String,
    /// Argon2 hash.
    pub password: String,
}

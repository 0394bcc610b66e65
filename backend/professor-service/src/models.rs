use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A professor record. Listings include the Argon2 hash so the auth service
/// can check login credentials; the single-record profile strips it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professor {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProfessor {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Password-free view for profile reads.
#[derive(Debug, Serialize)]
pub struct ProfessorProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Professor> for ProfessorProfile {
    fn from(professor: &Professor) -> Self {
        Self {
            id: professor.id,
            name: professor.name.clone(),
            email: professor.email.clone(),
            phone: professor.phone.clone(),
        }
    }
}

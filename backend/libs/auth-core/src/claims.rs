//! Token payload types shared by every service.

use serde::{Deserialize, Serialize};

/// Role tags carried in a token's `roles` claim.
///
/// The payload field is always `roles` and always a non-empty array; service
/// principals carry exactly one service role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Professor,
    Student,
    AuthService,
    EnrollmentService,
}

/// What kind of entity a token represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Human,
    Service,
}

/// Verified token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject id: a user id for human principals, the service name for
    /// service principals.
    pub sub: String,
    pub principal: PrincipalKind,
    pub roles: Vec<Role>,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Carried for human logins so resource services can match email-keyed
    /// records without a directory lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, required: &[Role]) -> bool {
        self.roles.iter().any(|r| required.contains(r))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

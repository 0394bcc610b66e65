//! Authenticated-principal context attached to guarded requests.

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

use auth_core::{Claims, PrincipalKind, Role};

/// Who the verified token represents. Inserted by the role guard, read-only
/// for downstream handlers, dropped with the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject: String,
    pub principal: PrincipalKind,
    pub roles: Vec<Role>,
}

impl AuthContext {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

impl From<&Claims> for AuthContext {
    fn from(claims: &Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            principal: claims.principal,
            roles: claims.roles.clone(),
        }
    }
}

impl FromRequest for AuthContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthContext>() {
            Some(context) => ready(Ok(context.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "User not authenticated",
            ))),
        }
    }
}

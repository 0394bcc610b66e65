//! Role/ownership authorization middleware.
//!
//! Wraps a route with the full verification pipeline: bearer extraction,
//! token verification through the service's `TokenVerifier`, role
//! intersection against the route's required set, and an optional ownership
//! predicate with an ADMIN override. On success the authenticated principal
//! is attached to the request as an [`AuthContext`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, StatusCode};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures::future::{ready, Ready};

use auth_core::{AuthError, Claims, Role, TokenVerifier};

use crate::auth_context::AuthContext;

/// Decides whether the authenticated principal owns the requested resource.
/// Evaluated only for principals without the ADMIN role.
pub type OwnershipPredicate = Arc<dyn Fn(&Claims, &ServiceRequest) -> bool + Send + Sync>;

/// Route guard: admits a request iff the token's roles intersect the
/// required set (and the ownership predicate passes, when configured).
pub struct RequireRole {
    required: Arc<Vec<Role>>,
    ownership: Option<OwnershipPredicate>,
}

impl RequireRole {
    pub fn any_of(required: &[Role]) -> Self {
        Self {
            required: Arc::new(required.to_vec()),
            ownership: None,
        }
    }

    /// Restrict non-ADMIN principals to resources they own.
    pub fn with_ownership<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Claims, &ServiceRequest) -> bool + Send + Sync + 'static,
    {
        self.ownership = Some(Arc::new(predicate));
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RoleGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGuardService {
            service: Rc::new(service),
            required: Arc::clone(&self.required),
            ownership: self.ownership.clone(),
        }))
    }
}

pub struct RoleGuardService<S> {
    service: Rc<S>,
    required: Arc<Vec<Role>>,
    ownership: Option<OwnershipPredicate>,
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = Arc::clone(&self.required);
        let ownership = self.ownership.clone();

        Box::pin(async move {
            // The verifier is constructed once at startup and shared through
            // app data; a guarded route without one is a wiring bug.
            let verifier = req
                .app_data::<web::Data<TokenVerifier>>()
                .cloned()
                .ok_or_else(|| {
                    tracing::error!("TokenVerifier missing from app data on a guarded route");
                    actix_web::error::ErrorInternalServerError("Internal server error")
                })?;

            let token = bearer_token(&req).ok_or_else(|| reject(AuthError::AuthHeaderMissing))?;

            let claims = verifier.verify(&token).await.map_err(reject)?;

            if !claims.has_any_role(&required) {
                return Err(reject(AuthError::InsufficientRole));
            }

            if let Some(predicate) = &ownership {
                if !claims.is_admin() && !predicate(&claims, &req) {
                    return Err(reject(AuthError::OwnershipViolation));
                }
            }

            req.extensions_mut().insert(AuthContext::from(&claims));
            service.call(req).await
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

fn reject(error: AuthError) -> Error {
    tracing::warn!(error = %error, "request rejected by role guard");
    AuthRejection(error).into()
}

/// Response mapping for [`AuthError`] at the middleware boundary.
///
/// Bodies carry only the coarse public message; which verification step
/// failed stays in the logs.
#[derive(Debug)]
pub struct AuthRejection(pub AuthError);

impl fmt::Display for AuthRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl actix_web::error::ResponseError for AuthRejection {
    fn status_code(&self) -> StatusCode {
        match self.0.status_code() {
            400 => StatusCode::BAD_REQUEST,
            401 => StatusCode::UNAUTHORIZED,
            403 => StatusCode::FORBIDDEN,
            503 => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "message": self.0.public_message() }))
    }
}

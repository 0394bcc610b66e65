//! Token minting.
//!
//! One issuer per service, bound to the service's [`KeyStore`] and its own
//! advertised JWKS URL. The same signing path serves human logins and
//! service-identity tokens; only TTL, principal kind, and roles differ.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, Header};

use crate::claims::{Claims, PrincipalKind, Role};
use crate::error::AuthError;
use crate::keys::KeyStore;

/// Human login tokens are short-lived.
const HUMAN_TOKEN_TTL_HOURS: i64 = 1;
/// Service-identity tokens live longer; peers re-verify on every call anyway.
const SERVICE_TOKEN_TTL_HOURS: i64 = 6;

/// Mints RS256 tokens carrying this service's `kid` and JWKS endpoint.
#[derive(Debug)]
pub struct TokenIssuer {
    keys: Arc<KeyStore>,
    jwks_url: String,
}

impl TokenIssuer {
    pub fn new(keys: Arc<KeyStore>, jwks_url: impl Into<String>) -> Self {
        Self {
            keys,
            jwks_url: jwks_url.into(),
        }
    }

    /// The discovery endpoint embedded in every issued token.
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Sign a token for an arbitrary principal.
    ///
    /// The role set must be non-empty; an empty set is a caller bug and is
    /// refused rather than signed.
    pub fn issue(
        &self,
        subject: &str,
        principal: PrincipalKind,
        roles: Vec<Role>,
        email: Option<String>,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        if roles.is_empty() {
            tracing::error!(subject, "refusing to sign a token with an empty role set");
            return Err(AuthError::Signing);
        }

        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            principal,
            roles,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            email,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.keys.kid().to_string());
        header.jku = Some(self.jwks_url.clone());

        encode(&header, &claims, self.keys.encoding_key()).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            AuthError::Signing
        })
    }

    /// 1 h token for a logged-in person.
    pub fn issue_human(
        &self,
        subject: &str,
        roles: Vec<Role>,
        email: Option<String>,
    ) -> Result<String, AuthError> {
        self.issue(
            subject,
            PrincipalKind::Human,
            roles,
            email,
            Duration::hours(HUMAN_TOKEN_TTL_HOURS),
        )
    }

    /// 6 h token identifying this service to a peer. Carries exactly one
    /// fixed service role.
    pub fn issue_service_token(
        &self,
        service_name: &str,
        role: Role,
    ) -> Result<String, AuthError> {
        self.issue(
            service_name,
            PrincipalKind::Service,
            vec![role],
            None,
            Duration::hours(SERVICE_TOKEN_TTL_HOURS),
        )
    }
}

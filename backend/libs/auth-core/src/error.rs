//! Error taxonomy for the trust protocol.
//!
//! [`KeyLoadError`] is fatal and only surfaces at startup; everything else is
//! an [`AuthError`] and maps onto the status contract shared by all guarded
//! routes. Display strings never carry upstream bodies or key material.

use thiserror::Error;

/// A service's key pair could not be loaded.
///
/// Unrecoverable: a service without its keys can neither issue nor publish,
/// so startup must abort instead of accepting traffic.
#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("failed to read key material from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid RSA private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid RSA public key: {0}")]
    InvalidPublicKey(String),
}

/// Any failure on the issue/verify/authorize path.
///
/// `Clone` is required so the resolver's single-flight cache can hand one
/// fetch failure to every coalesced waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Token could not be signed.
    #[error("token signing failed")]
    Signing,

    /// The compact token or its header is structurally unusable, or a
    /// required header/payload field is absent.
    #[error("malformed token")]
    MalformedToken,

    /// The header declares anything other than the single allowed
    /// asymmetric algorithm.
    #[error("unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The header's `jku` is not in the verifier's allow-list.
    #[error("untrusted issuer endpoint: {0}")]
    UntrustedIssuer(String),

    /// The issuer answered, but its document has no entry for the kid.
    #[error("no usable key {kid} in JWKS document at {jwks_url}")]
    KeyNotFound { jwks_url: String, kid: String },

    /// The key-discovery endpoint (or a peer service) could not be reached
    /// within the timeout.
    #[error("upstream unavailable: {url}")]
    UpstreamUnavailable { url: String, reason: String },

    /// Signature did not verify against the resolved key.
    #[error("invalid token signature")]
    InvalidSignature,

    /// `exp` is in the past.
    #[error("token expired")]
    ExpiredToken,

    /// No `Authorization: Bearer …` header on a guarded route.
    #[error("authorization header missing or malformed")]
    AuthHeaderMissing,

    /// Authenticated, but the token's roles do not intersect the route's
    /// required roles.
    #[error("insufficient role")]
    InsufficientRole,

    /// Authenticated with an eligible role, but the ownership check failed.
    #[error("ownership violation")]
    OwnershipViolation,
}

impl AuthError {
    /// HTTP status for the shared route contract.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MalformedToken
            | AuthError::UnsupportedAlgorithm(_)
            | AuthError::UntrustedIssuer(_)
            | AuthError::KeyNotFound { .. }
            | AuthError::InvalidSignature
            | AuthError::ExpiredToken
            | AuthError::AuthHeaderMissing => 401,
            AuthError::InsufficientRole | AuthError::OwnershipViolation => 403,
            AuthError::UpstreamUnavailable { .. } => 503,
            AuthError::Signing => 500,
        }
    }

    /// Client-safe message. Deliberately coarse: response bodies never say
    /// which verification step failed.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::AuthHeaderMissing => {
                "Authorization token is missing or malformed (Bearer token expected)"
            }
            AuthError::MalformedToken
            | AuthError::UnsupportedAlgorithm(_)
            | AuthError::UntrustedIssuer(_)
            | AuthError::KeyNotFound { .. }
            | AuthError::InvalidSignature
            | AuthError::ExpiredToken => "Invalid or expired token",
            AuthError::InsufficientRole => "Access forbidden: insufficient role",
            AuthError::OwnershipViolation => {
                "Access forbidden: you can only access your own data"
            }
            AuthError::UpstreamUnavailable { .. } => "Upstream service unavailable",
            AuthError::Signing => "Internal server error",
        }
    }
}

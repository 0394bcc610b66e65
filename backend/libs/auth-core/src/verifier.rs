//! Token verification.
//!
//! The verifier is a pure function of (token, trusted-issuer set, resolvable
//! key) and runs fully in parallel across requests. Order of checks matters:
//! the header is parsed untrusted, the algorithm and issuer endpoint are
//! pinned, and only then does any network activity happen.

use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::resolver::JwksResolver;

/// The single allowed signing algorithm. Symmetric algorithms and unsigned
/// tokens are rejected regardless of configuration.
const ALLOWED_ALG: &str = "RS256";

/// Header fields read before anything about the token is trusted.
#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
    #[serde(default)]
    kid: Option<String>,
    #[serde(default)]
    jku: Option<String>,
}

/// Validates signature, algorithm, issuer trust, and expiry.
#[derive(Debug)]
pub struct TokenVerifier {
    trusted_issuers: HashSet<String>,
    resolver: JwksResolver,
}

impl TokenVerifier {
    /// `trusted_issuers` is the static allow-list of JWKS endpoints this
    /// service accepts tokens from. A token naming any other endpoint is
    /// rejected before a single byte goes over the network.
    pub fn new(
        trusted_issuers: impl IntoIterator<Item = String>,
        resolver: JwksResolver,
    ) -> Self {
        Self {
            trusted_issuers: trusted_issuers.into_iter().collect(),
            resolver,
        }
    }

    pub fn trusts(&self, jwks_url: &str) -> bool {
        self.trusted_issuers.contains(jwks_url)
    }

    /// Verify a bearer token and return its claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_raw_header(token)?;

        if header.alg != ALLOWED_ALG {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        let kid = header
            .kid
            .filter(|k| !k.is_empty())
            .ok_or(AuthError::MalformedToken)?;
        let jku = header
            .jku
            .filter(|j| !j.is_empty())
            .ok_or(AuthError::MalformedToken)?;

        // Issuer pinning happens before resolution: a token is never trusted
        // merely because it asserts its own issuer endpoint.
        if !self.trusts(&jku) {
            tracing::warn!(jku = %jku, "token names an issuer outside the allow-list");
            return Err(AuthError::UntrustedIssuer(jku));
        }

        let was_cached = self.resolver.is_cached(&jku, &kid);
        let key = self.resolver.resolve(&jku, &kid).await?;

        match check_signed_claims(token, &key) {
            Err(AuthError::InvalidSignature) if was_cached => {
                // The cached key may predate a rotation at the issuer; allow
                // exactly one forced refetch before giving up.
                tracing::debug!(jku = %jku, kid = %kid, "signature failed against cached key, refreshing once");
                let key = self.resolver.refresh(&jku, &kid).await?;
                check_signed_claims(token, &key)
            }
            other => other,
        }
    }
}

fn decode_raw_header(token: &str) -> Result<RawHeader, AuthError> {
    let mut segments = token.split('.');
    let header_segment = segments.next().ok_or(AuthError::MalformedToken)?;
    // A compact JWT is exactly header.payload.signature.
    if segments.count() != 2 {
        return Err(AuthError::MalformedToken);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(header_segment)
        .map_err(|_| AuthError::MalformedToken)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)
}

fn check_signed_claims(token: &str, key: &DecodingKey) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.validate_exp = true;
    // Expiry is exact: a token is Valid strictly while now < exp.
    validation.leeway = 0;
    validation.required_spec_claims = HashSet::from(["exp".to_string()]);

    let data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::Json(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken,
        _ => AuthError::MalformedToken,
    })?;

    // The role set is non-empty by protocol invariant; an empty one can only
    // come from a foreign or hand-rolled issuer.
    if data.claims.roles.is_empty() {
        return Err(AuthError::MalformedToken);
    }

    Ok(data.claims)
}

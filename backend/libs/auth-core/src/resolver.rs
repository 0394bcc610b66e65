//! Runtime key discovery.
//!
//! Resolves `(jwks_url, kid)` to a verification key by fetching the issuer's
//! JWKS document over HTTP. Resolved keys are cached for the process
//! lifetime; concurrent resolutions of the same key coalesce into a single
//! upstream fetch, so a burst of verifications against a cold cache costs one
//! network call, not one per request.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::DecodingKey;
use moka::future::Cache;

use crate::error::AuthError;
use crate::jwks::JwksDocument;

type CacheKey = (String, String);

/// Explicit bound on every JWKS fetch. The upstream either answers in time
/// or the verification fails as `UpstreamUnavailable`.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// More than any realistic number of (issuer, kid) pairs in this deployment.
const CACHE_CAPACITY: u64 = 256;

/// Shared, process-wide JWKS key cache with single-flight fetching.
#[derive(Clone)]
pub struct JwksResolver {
    http: reqwest::Client,
    fetch_timeout: Duration,
    cache: Cache<CacheKey, Arc<DecodingKey>>,
}

impl std::fmt::Debug for JwksResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Cached key material has no useful (or safe) Debug form.
        f.debug_struct("JwksResolver")
            .field("fetch_timeout", &self.fetch_timeout)
            .field("cached_keys", &self.cache.entry_count())
            .finish()
    }
}

impl JwksResolver {
    pub fn new(fetch_timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            fetch_timeout,
            // No time-to-live: entries stay until a verification failure
            // forces a refresh.
            cache: Cache::new(CACHE_CAPACITY),
        }
    }

    /// Look up a verification key, fetching the issuer's document on a cache
    /// miss.
    ///
    /// Misses for the same `(jwks_url, kid)` are coalesced: while one fetch
    /// is in flight every other caller waits for its result instead of
    /// issuing another request. A failed fetch is handed to all coalesced
    /// waiters and is not cached.
    pub async fn resolve(
        &self,
        jwks_url: &str,
        kid: &str,
    ) -> Result<Arc<DecodingKey>, AuthError> {
        let key = (jwks_url.to_string(), kid.to_string());
        self.cache
            .try_get_with(key, self.fetch_key(jwks_url, kid))
            .await
            .map_err(|e: Arc<AuthError>| (*e).clone())
    }

    /// Whether a key is already cached. Used by the verifier to decide if a
    /// signature failure may be explained by a stale cache entry.
    pub fn is_cached(&self, jwks_url: &str, kid: &str) -> bool {
        self.cache
            .contains_key(&(jwks_url.to_string(), kid.to_string()))
    }

    /// Drop one cached entry and re-resolve it from upstream.
    ///
    /// This is the single bounded retry the protocol allows: a verification
    /// failure against a cached key triggers exactly one forced refetch, which
    /// tolerates key rotation without letting bad tokens refetch unboundedly.
    pub async fn refresh(
        &self,
        jwks_url: &str,
        kid: &str,
    ) -> Result<Arc<DecodingKey>, AuthError> {
        self.cache
            .invalidate(&(jwks_url.to_string(), kid.to_string()))
            .await;
        self.resolve(jwks_url, kid).await
    }

    async fn fetch_key(&self, jwks_url: &str, kid: &str) -> Result<Arc<DecodingKey>, AuthError> {
        tracing::debug!(jwks_url, kid, "fetching JWKS document");

        let response = self
            .http
            .get(jwks_url)
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| AuthError::UpstreamUnavailable {
                url: jwks_url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::UpstreamUnavailable {
                url: jwks_url.to_string(),
                reason: format!("status {}", response.status()),
            });
        }

        let document: JwksDocument =
            response
                .json()
                .await
                .map_err(|e| AuthError::UpstreamUnavailable {
                    url: jwks_url.to_string(),
                    reason: e.to_string(),
                })?;

        let jwk = document.find(kid).ok_or_else(|| AuthError::KeyNotFound {
            jwks_url: jwks_url.to_string(),
            kid: kid.to_string(),
        })?;

        let decoding_key = jwk.decoding_key().map_err(|_| AuthError::KeyNotFound {
            jwks_url: jwks_url.to_string(),
            kid: kid.to_string(),
        })?;

        tracing::debug!(jwks_url, kid, "JWKS key resolved and cached");
        Ok(Arc::new(decoding_key))
    }
}

impl Default for JwksResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}

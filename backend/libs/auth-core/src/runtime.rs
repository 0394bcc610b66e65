//! Explicit per-service protocol construction.
//!
//! Every service builds one [`AuthRuntime`] at startup from its own
//! configuration: its key pair, its advertised JWKS endpoint, and the set of
//! peer issuers it trusts. There is no ambient key state anywhere in the
//! workspace; whatever needs the keys holds a reference into this value.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::KeyLoadError;
use crate::issuer::TokenIssuer;
use crate::keys::KeyStore;
use crate::resolver::{JwksResolver, DEFAULT_FETCH_TIMEOUT};
use crate::verifier::TokenVerifier;

/// Where a service's PEM pair comes from.
#[derive(Clone)]
pub enum KeySource {
    Files {
        private_key_path: PathBuf,
        public_key_path: PathBuf,
    },
    Pem {
        private_key_pem: String,
        public_key_pem: String,
    },
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material never reaches logs, only where it came from.
        match self {
            KeySource::Files {
                private_key_path,
                public_key_path,
            } => f
                .debug_struct("Files")
                .field("private_key_path", private_key_path)
                .field("public_key_path", public_key_path)
                .finish(),
            KeySource::Pem { .. } => f.debug_struct("Pem").finish_non_exhaustive(),
        }
    }
}

/// Everything one service needs to participate in the trust protocol.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Key id published for this service's active pair.
    pub key_id: String,
    pub keys: KeySource,
    /// This service's own discovery endpoint, embedded in every token it
    /// signs.
    pub jwks_url: String,
    /// JWKS endpoints of issuers whose tokens this service accepts.
    pub trusted_issuers: Vec<String>,
    /// Bound on JWKS fetches.
    pub fetch_timeout: Duration,
}

impl AuthConfig {
    pub fn new(
        key_id: impl Into<String>,
        keys: KeySource,
        jwks_url: impl Into<String>,
        trusted_issuers: Vec<String>,
    ) -> Self {
        Self {
            key_id: key_id.into(),
            keys,
            jwks_url: jwks_url.into(),
            trusted_issuers,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

/// A service's constructed protocol instance.
#[derive(Debug, Clone)]
pub struct AuthRuntime {
    pub keys: Arc<KeyStore>,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl AuthRuntime {
    /// Load keys and wire issuer + verifier.
    ///
    /// A [`KeyLoadError`] here means the service must refuse to start.
    pub fn initialize(config: AuthConfig) -> Result<Self, KeyLoadError> {
        let keys = Arc::new(match &config.keys {
            KeySource::Files {
                private_key_path,
                public_key_path,
            } => KeyStore::load(private_key_path, public_key_path, &config.key_id)?,
            KeySource::Pem {
                private_key_pem,
                public_key_pem,
            } => KeyStore::from_pem(private_key_pem, public_key_pem, &config.key_id)?,
        });

        let issuer = Arc::new(TokenIssuer::new(Arc::clone(&keys), &config.jwks_url));
        let verifier = Arc::new(TokenVerifier::new(
            config.trusted_issuers,
            JwksResolver::new(config.fetch_timeout),
        ));

        tracing::info!(kid = %keys.kid(), jwks_url = %config.jwks_url, "auth runtime initialized");

        Ok(Self {
            keys,
            issuer,
            verifier,
        })
    }
}

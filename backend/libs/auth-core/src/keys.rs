//! Per-service RSA key pair.
//!
//! Loaded once at startup and held immutable for the process lifetime. The
//! private half never leaves the [`KeyStore`]; the public half is exported as
//! a JWK for the service's discovery document.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::EncodingKey;
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;

use crate::error::KeyLoadError;
use crate::jwks::Jwk;

/// A service's active signing key pair plus its published descriptor.
pub struct KeyStore {
    kid: String,
    encoding_key: EncodingKey,
    public_jwk: Jwk,
}

impl KeyStore {
    /// Load a key pair from PEM files on disk.
    ///
    /// Failure is fatal for the owning service: without its keys it can
    /// neither issue tokens nor publish a discovery document, so callers
    /// must abort startup.
    pub fn load(
        private_key_path: impl AsRef<Path>,
        public_key_path: impl AsRef<Path>,
        kid: impl Into<String>,
    ) -> Result<Self, KeyLoadError> {
        let private_pem = read_pem(private_key_path.as_ref())?;
        let public_pem = read_pem(public_key_path.as_ref())?;
        Self::from_pem(&private_pem, &public_pem, kid)
    }

    /// Build a key pair from in-memory PEM strings (env-provided keys,
    /// tests). Accepts PKCS#8 and PKCS#1 encodings for both halves.
    pub fn from_pem(
        private_pem: &str,
        public_pem: &str,
        kid: impl Into<String>,
    ) -> Result<Self, KeyLoadError> {
        let kid = kid.into();

        let encoding_key = EncodingKey::from_rsa_pem(private_pem.as_bytes())
            .map_err(|e| KeyLoadError::InvalidPrivateKey(e.to_string()))?;

        let public_key = RsaPublicKey::from_public_key_pem(public_pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(public_pem))
            .map_err(|e| KeyLoadError::InvalidPublicKey(e.to_string()))?;

        let public_jwk = Jwk {
            kty: "RSA".to_string(),
            kid: kid.clone(),
            alg: "RS256".to_string(),
            key_use: "sig".to_string(),
            n: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        };

        Ok(Self {
            kid,
            encoding_key,
            public_jwk,
        })
    }

    /// Key id embedded in every token this service signs.
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// Published descriptor of the public half.
    pub fn public_jwk(&self) -> &Jwk {
        &self.public_jwk
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Private key material is intentionally absent.
        f.debug_struct("KeyStore").field("kid", &self.kid).finish()
    }
}

fn read_pem(path: &Path) -> Result<String, KeyLoadError> {
    fs::read_to_string(path).map_err(|source| KeyLoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

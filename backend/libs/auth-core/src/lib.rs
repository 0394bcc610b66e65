//! # Auth Core
//!
//! Shared trust protocol for the campus services: every service signs its
//! outbound tokens with its own RSA key pair, publishes the public half as a
//! JWKS document, and verifies inbound tokens by resolving the signer's key
//! from a statically trusted discovery endpoint.
//!
//! ## Modules
//! - `keys`: per-service key pair, loaded once at startup
//! - `claims`: token payload, roles, principal kinds
//! - `jwks`: JWKS document wire types
//! - `issuer`: RS256 token minting with `kid`/`jku` headers
//! - `resolver`: cached, single-flight JWKS key resolution
//! - `verifier`: full verification pipeline with issuer pinning
//! - `runtime`: explicit per-service protocol construction
//!
//! ## Security design
//!
//! - RS256 only; symmetric algorithms and unsigned tokens are rejected
//!   unconditionally to close algorithm-confusion attacks.
//! - A token's `jku` header is only ever dereferenced after it has been
//!   matched against the verifying service's trusted-issuer allow-list.
//! - No global key state: keys live in a [`KeyStore`] owned by the service
//!   and passed by reference into the issuer and verifier.

pub mod claims;
pub mod error;
pub mod issuer;
pub mod jwks;
pub mod keys;
pub mod resolver;
pub mod runtime;
pub mod verifier;

#[cfg(feature = "test-keys")]
pub mod test_keys;

pub use claims::{Claims, PrincipalKind, Role};
pub use error::{AuthError, KeyLoadError};
pub use issuer::TokenIssuer;
pub use jwks::{Jwk, JwksDocument};
pub use keys::KeyStore;
pub use resolver::JwksResolver;
pub use runtime::{AuthConfig, AuthRuntime, KeySource};
pub use verifier::TokenVerifier;

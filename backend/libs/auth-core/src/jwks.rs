//! JWKS document wire types.
//!
//! Published by each service at `/.well-known/jwks.json` and consumed by the
//! resolver. Entry order is irrelevant; lookup is always by `kid`.

use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::keys::KeyStore;

/// One published key. Self-sufficient: holds everything a verifier needs to
/// reconstruct the RSA public key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    pub alg: String,
    #[serde(rename = "use")]
    pub key_use: String,
    /// Modulus, base64url without padding.
    pub n: String,
    /// Public exponent, base64url without padding.
    pub e: String,
}

impl Jwk {
    /// Rebuild a verification key from the published components.
    pub fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        DecodingKey::from_rsa_components(&self.n, &self.e)
            .map_err(|_| AuthError::MalformedToken)
    }
}

/// The discovery document: every active key of one issuer.
///
/// Within one issuer, `kid` is unique at any instant; rotation publishes a
/// new kid rather than overwriting an existing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwksDocument {
    pub keys: Vec<Jwk>,
}

impl JwksDocument {
    /// Document for a service's single active key.
    pub fn for_keystore(keys: &KeyStore) -> Self {
        Self {
            keys: vec![keys.public_jwk().clone()],
        }
    }

    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_keys;

    #[test]
    fn document_round_trips_and_finds_by_kid() {
        let keys = KeyStore::from_pem(
            test_keys::TEST_PRIVATE_KEY_PEM,
            test_keys::TEST_PUBLIC_KEY_PEM,
            "1",
        )
        .unwrap();
        let doc = JwksDocument::for_keystore(&keys);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"use\":\"sig\""));

        let parsed: JwksDocument = serde_json::from_str(&json).unwrap();
        assert!(parsed.find("1").is_some());
        assert!(parsed.find("2").is_none());
        parsed.find("1").unwrap().decoding_key().unwrap();
    }

    #[test]
    fn unusable_components_are_rejected() {
        let jwk = Jwk {
            kty: "RSA".into(),
            kid: "1".into(),
            alg: "RS256".into(),
            key_use: "sig".into(),
            n: "!!!not-base64url!!!".into(),
            e: "AQAB".into(),
        };
        assert!(jwk.decoding_key().is_err());
    }
}

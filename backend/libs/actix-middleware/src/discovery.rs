//! Key-discovery route.

use actix_web::{web, HttpResponse, Responder};

use auth_core::{JwksDocument, KeyStore};

/// Stable path every service publishes its keys at.
pub const WELL_KNOWN_JWKS_PATH: &str = "/.well-known/jwks.json";

/// Serves this service's JWKS document. The route is unauthenticated; the
/// document only ever contains public key material.
pub async fn jwks_document(keys: web::Data<KeyStore>) -> impl Responder {
    HttpResponse::Ok().json(JwksDocument::for_keystore(&keys))
}

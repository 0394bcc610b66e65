/// Enrollment Service - HTTP server
use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;

use actix_middleware::{discovery, WELL_KNOWN_JWKS_PATH};
use auth_core::{AuthRuntime, Role};
use enrollment_service::{config::Config, peers::PeerDirectory, routes, store::EnrollmentStore};
use service_clients::ServiceClient;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env().context("failed to load configuration from environment")?;

    let auth = AuthRuntime::initialize(config.auth_config())
        .context("failed to initialize auth runtime")?;

    let peers = web::Data::new(PeerDirectory::new(
        ServiceClient::new(
            auth.issuer.clone(),
            "enrollment-service",
            Role::EnrollmentService,
        )
        .with_timeout(config.call_timeout()),
        &config.student_service_url,
        &config.course_service_url,
    ));
    let store = web::Data::new(EnrollmentStore::default());

    tracing::info!(host = %config.host, port = config.port, "enrollment service starting");

    let keys = auth.keys.clone();
    let verifier = auth.verifier.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(keys.clone()))
            .app_data(web::Data::from(verifier.clone()))
            .app_data(store.clone())
            .app_data(peers.clone())
            .route(WELL_KNOWN_JWKS_PATH, web::get().to(discovery::jwks_document))
            .route("/health", web::get().to(health))
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

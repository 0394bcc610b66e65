//! Route-level tests for the role guard: status contract, role gate,
//! ownership policy, and context propagation.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header;
use actix_web::{test, web, App, HttpResponse, Responder};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use actix_middleware::{AuthContext, RequireRole};
use auth_core::test_keys;
use auth_core::{JwksDocument, JwksResolver, KeyStore, Role, TokenIssuer, TokenVerifier};

const JWKS_PATH: &str = "/.well-known/jwks.json";

struct TestAuth {
    // Held so the mock JWKS endpoint outlives the test app.
    _server: MockServer,
    issuer: TokenIssuer,
    verifier: Arc<TokenVerifier>,
}

async fn test_auth() -> TestAuth {
    let keys = Arc::new(
        KeyStore::from_pem(
            test_keys::TEST_PRIVATE_KEY_PEM,
            test_keys::TEST_PUBLIC_KEY_PEM,
            "1",
        )
        .unwrap(),
    );

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(JwksDocument::for_keystore(&keys)))
        .mount(&server)
        .await;

    let jwks_url = format!("{}{JWKS_PATH}", server.uri());
    let issuer = TokenIssuer::new(keys, &jwks_url);
    let verifier = Arc::new(TokenVerifier::new(
        vec![jwks_url.clone()],
        JwksResolver::new(Duration::from_secs(2)),
    ));

    TestAuth {
        _server: server,
        issuer,
        verifier,
    }
}

async fn ok_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

async fn whoami(context: AuthContext) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "subject": context.subject,
        "principal": context.principal,
        "roles": context.roles,
    }))
}

macro_rules! guarded_app {
    ($verifier:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from(Arc::clone(&$verifier)))
                .service(
                    web::resource("/api/courses")
                        .wrap(RequireRole::any_of(&[Role::Admin, Role::Professor]))
                        .route(web::get().to(ok_handler)),
                )
                .service(
                    web::resource("/api/enrollments/student/{id}")
                        .wrap(
                            RequireRole::any_of(&[Role::Admin, Role::Professor, Role::Student])
                                .with_ownership(|claims, req| {
                                    req.match_info()
                                        .get("id")
                                        .map(|id| claims.sub == id)
                                        .unwrap_or(false)
                                }),
                        )
                        .route(web::get().to(whoami)),
                ),
        )
        .await
    };
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn missing_or_malformed_header_is_401() {
    let auth = test_auth().await;
    let app = guarded_app!(auth.verifier);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/courses").to_request())
        .await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Authorization token is missing or malformed (Bearer token expected)"
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header((header::AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn student_token_on_professor_route_is_403() {
    let auth = test_auth().await;
    let app = guarded_app!(auth.verifier);

    let token = auth
        .issuer
        .issue_human("u1", vec![Role::Student], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Access forbidden: insufficient role");
}

#[actix_web::test]
async fn professor_token_is_admitted() {
    let auth = test_auth().await;
    let app = guarded_app!(auth.verifier);

    let token = auth
        .issuer
        .issue_human("p1", vec![Role::Professor], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn ownership_restricts_students_to_their_own_resources() {
    let auth = test_auth().await;
    let app = guarded_app!(auth.verifier);

    let student = auth
        .issuer
        .issue_human("u1", vec![Role::Student], None)
        .unwrap();

    // Own resource: admitted.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/enrollments/student/u1")
            .insert_header(bearer(&student))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // Someone else's resource: ownership violation.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/enrollments/student/u2")
            .insert_header(bearer(&student))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Access forbidden: you can only access your own data"
    );
}

#[actix_web::test]
async fn admin_overrides_ownership() {
    let auth = test_auth().await;
    let app = guarded_app!(auth.verifier);

    let admin = auth
        .issuer
        .issue_human("root", vec![Role::Admin], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/enrollments/student/u2")
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn expired_token_is_401() {
    let auth = test_auth().await;
    let app = guarded_app!(auth.verifier);

    let token = auth
        .issuer
        .issue(
            "u1",
            auth_core::PrincipalKind::Human,
            vec![Role::Professor],
            None,
            chrono::Duration::seconds(-5),
        )
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[actix_web::test]
async fn token_from_untrusted_issuer_is_401() {
    let auth = test_auth().await;
    let app = guarded_app!(auth.verifier);

    // Same key pair, but the token advertises a discovery endpoint outside
    // the verifier's allow-list.
    let keys = Arc::new(
        KeyStore::from_pem(
            test_keys::TEST_PRIVATE_KEY_PEM,
            test_keys::TEST_PUBLIC_KEY_PEM,
            "1",
        )
        .unwrap(),
    );
    let rogue = TokenIssuer::new(keys, "http://evil.example/.well-known/jwks.json");
    let token = rogue.issue_human("u1", vec![Role::Admin], None).unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn unreachable_key_discovery_is_503() {
    // Verifier trusts an endpoint nobody listens on.
    let dead_jwks = "http://127.0.0.1:9/.well-known/jwks.json".to_string();
    let verifier = Arc::new(TokenVerifier::new(
        vec![dead_jwks.clone()],
        JwksResolver::new(Duration::from_millis(300)),
    ));
    let app = guarded_app!(verifier);

    let keys = Arc::new(
        KeyStore::from_pem(
            test_keys::TEST_PRIVATE_KEY_PEM,
            test_keys::TEST_PUBLIC_KEY_PEM,
            "1",
        )
        .unwrap(),
    );
    let issuer = TokenIssuer::new(keys, &dead_jwks);
    let token = issuer.issue_human("p1", vec![Role::Professor], None).unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 503);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Upstream service unavailable");
}

#[actix_web::test]
async fn auth_context_reaches_the_handler() {
    let auth = test_auth().await;
    let app = guarded_app!(auth.verifier);

    let token = auth
        .issuer
        .issue_human("u1", vec![Role::Student], Some("u1@campus.dev".into()))
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/enrollments/student/u1")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["subject"], "u1");
    assert_eq!(body["principal"], "human");
    assert_eq!(body["roles"], serde_json::json!(["STUDENT"]));
}

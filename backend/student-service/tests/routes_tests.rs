//! Guarded-route tests with a real verifier against a mock JWKS upstream.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header;
use actix_web::{test, web, App};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_core::test_keys;
use auth_core::{JwksDocument, JwksResolver, KeyStore, Role, TokenIssuer, TokenVerifier};
use student_service::{routes, store::StudentStore};

const JWKS_PATH: &str = "/.well-known/jwks.json";

struct TestAuth {
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
    TestAuth {
        _server: server,
        issuer: TokenIssuer::new(keys, &jwks_url),
        verifier: Arc::new(TokenVerifier::new(
            vec![jwks_url],
            JwksResolver::new(Duration::from_secs(2)),
        )),
    }
}

macro_rules! student_app {
    ($auth:expr, $store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from(Arc::clone(&$auth.verifier)))
                .app_data($store.clone())
                .configure(routes::configure),
        )
        .await
    };
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

fn register(name: &str, email: &str) -> serde_json::Value {
    serde_json::json!({ "name": name, "email": email, "password": "Sup3rSecret!" })
}

#[actix_web::test]
async fn registration_is_open_and_stores_a_hash() {
    let auth = test_auth().await;
    let store = web::Data::new(StudentStore::default());
    let app = student_app!(auth, store);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/students")
            .set_json(register("Ada", "ada@campus.dev"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let stored_password = body["password"].as_str().unwrap();
    assert_ne!(stored_password, "Sup3rSecret!");
    assert!(stored_password.starts_with("$argon2"));

    // Duplicate email is refused.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/students")
            .set_json(register("Ada", "ada@campus.dev"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn empty_fields_are_rejected() {
    let auth = test_auth().await;
    let store = web::Data::new(StudentStore::default());
    let app = student_app!(auth, store);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/students")
            .set_json(serde_json::json!({ "name": "", "email": "", "password": "" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Please fill all fields");
}

#[actix_web::test]
async fn listing_requires_staff_or_service_role() {
    let auth = test_auth().await;
    let store = web::Data::new(StudentStore::default());
    let app = student_app!(auth, store);

    // No token.
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/students").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 401);

    // A student may not list everyone.
    let student = auth
        .issuer
        .issue_human("u1", vec![Role::Student], Some("u1@campus.dev".into()))
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/students")
            .insert_header(bearer(&student))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    // The auth service may: it needs the hashes for login checks.
    let service = auth
        .issuer
        .issue_service_token("auth-service", Role::AuthService)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/students")
            .insert_header(bearer(&service))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn students_only_reach_their_own_record() {
    let auth = test_auth().await;
    let store = web::Data::new(StudentStore::default());
    let app = student_app!(auth, store);

    for (name, email) in [("Ada", "ada@campus.dev"), ("Grace", "grace@campus.dev")] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/students")
                .set_json(register(name, email))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 201);
    }

    let ada = auth
        .issuer
        .issue_human("u-ada", vec![Role::Student], Some("ada@campus.dev".into()))
        .unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/students/ada@campus.dev")
            .insert_header(bearer(&ada))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/students/grace@campus.dev")
            .insert_header(bearer(&ada))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    // Professors are not ownership-restricted here.
    let professor = auth
        .issuer
        .issue_human("p1", vec![Role::Professor], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/students/grace@campus.dev")
            .insert_header(bearer(&professor))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn update_and_delete_follow_ownership() {
    let auth = test_auth().await;
    let store = web::Data::new(StudentStore::default());
    let app = student_app!(auth, store);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/students")
            .set_json(register("Ada", "ada@campus.dev"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);

    let ada = auth
        .issuer
        .issue_human("u-ada", vec![Role::Student], Some("ada@campus.dev".into()))
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/students/ada@campus.dev")
            .insert_header(bearer(&ada))
            .set_json(serde_json::json!({ "name": "Ada L." }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Ada L.");

    // An admin may delete anyone.
    let admin = auth
        .issuer
        .issue_human("root", vec![Role::Admin], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/students/ada@campus.dev")
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/api/students/ada@campus.dev")
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
}

//! Guarded-route tests: staff create/maintain courses, creator ownership on
//! mutations, service-identity reads.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header;
use actix_web::{test, web, App};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_core::test_keys;
use auth_core::{JwksDocument, JwksResolver, KeyStore, Role, TokenIssuer, TokenVerifier};
use course_service::{routes, store::CourseStore};

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

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn create_records_the_creator_and_students_cannot_create() {
    let auth = test_auth().await;
    let store = web::Data::new(CourseStore::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(Arc::clone(&auth.verifier)))
            .app_data(store.clone())
            .configure(routes::configure),
    )
    .await;

    let professor = auth
        .issuer
        .issue_human("p1", vec![Role::Professor], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&professor))
            .set_json(serde_json::json!({ "name": "Systems", "code": "CS101" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let course: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(course["created_by"], "p1");

    let student = auth
        .issuer
        .issue_human("u1", vec![Role::Student], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&student))
            .set_json(serde_json::json!({ "name": "Systems", "code": "CS102" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn enrollment_service_identity_can_read_courses() {
    let auth = test_auth().await;
    let store = web::Data::new(CourseStore::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(Arc::clone(&auth.verifier)))
            .app_data(store.clone())
            .configure(routes::configure),
    )
    .await;

    let service = auth
        .issuer
        .issue_service_token("enrollment-service", Role::EnrollmentService)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/courses")
            .insert_header(bearer(&service))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // The service role is read-only here.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&service))
            .set_json(serde_json::json!({ "name": "X", "code": "X1" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);
}

#[actix_web::test]
async fn only_the_creator_or_an_admin_mutates_a_course() {
    let auth = test_auth().await;
    let store = web::Data::new(CourseStore::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(Arc::clone(&auth.verifier)))
            .app_data(store.clone())
            .configure(routes::configure),
    )
    .await;

    let creator = auth
        .issuer
        .issue_human("p1", vec![Role::Professor], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(bearer(&creator))
            .set_json(serde_json::json!({ "name": "Systems", "code": "CS101" }))
            .to_request(),
    )
    .await;
    let course: serde_json::Value = test::read_body_json(resp).await;
    let id = course["id"].as_str().unwrap().to_string();

    // Another professor cannot touch it.
    let other = auth
        .issuer
        .issue_human("p2", vec![Role::Professor], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/courses/{id}"))
            .insert_header(bearer(&other))
            .set_json(serde_json::json!({ "name": "Renamed" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 403);

    // The creator can.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/courses/{id}"))
            .insert_header(bearer(&creator))
            .set_json(serde_json::json!({ "name": "Renamed" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);

    // And an admin can delete regardless of creator.
    let admin = auth
        .issuer
        .issue_human("root", vec![Role::Admin], None)
        .unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/courses/{id}"))
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 200);
}

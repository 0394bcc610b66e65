//! Route wiring and per-route authorization policy.

use actix_web::dev::ServiceRequest;
use actix_web::web;

use actix_middleware::RequireRole;
use auth_core::{Claims, Role};

use crate::handlers;

/// Students may only touch the record whose email matches their own token;
/// other eligible roles are not ownership-restricted.
fn student_owns_record(claims: &Claims, req: &ServiceRequest) -> bool {
    if !claims.has_role(Role::Student) {
        return true;
    }
    req.match_info()
        .get("email")
        .map(|email| claims.email.as_deref() == Some(email))
        .unwrap_or(false)
}

fn own_record_guard() -> RequireRole {
    RequireRole::any_of(&[Role::Admin, Role::Professor, Role::Student])
        .with_ownership(student_owns_record)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/students")
            .service(
                web::resource("")
                    // Registration is open; everything else requires a token.
                    .route(web::post().to(handlers::create_student))
                    .route(
                        web::get()
                            .to(handlers::list_students)
                            .wrap(RequireRole::any_of(&[
                                Role::Admin,
                                Role::Professor,
                                Role::AuthService,
                                Role::EnrollmentService,
                            ])),
                    ),
            )
            .service(
                web::resource("/{email}")
                    .route(
                        web::get()
                            .to(handlers::get_student)
                            .wrap(own_record_guard()),
                    )
                    .route(
                        web::put()
                            .to(handlers::update_student)
                            .wrap(own_record_guard()),
                    )
                    .route(
                        web::delete()
                            .to(handlers::delete_student)
                            .wrap(own_record_guard()),
                    ),
            ),
    );
}

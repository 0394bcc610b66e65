//! Route wiring and per-route authorization policy.

use actix_web::dev::ServiceRequest;
use actix_web::web;

use actix_middleware::RequireRole;
use auth_core::{Claims, Role};

use crate::handlers;

/// For the by-student listing the resource identity is right in the path:
/// students may only ask for their own id.
fn student_owns_listing(claims: &Claims, req: &ServiceRequest) -> bool {
    if !claims.has_role(Role::Student) {
        return true;
    }
    req.match_info()
        .get("id")
        .map(|id| claims.sub == id)
        .unwrap_or(false)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/enrollments")
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(handlers::create_enrollment)
                            .wrap(RequireRole::any_of(&[Role::Admin, Role::Student])),
                    )
                    .route(
                        web::get()
                            .to(handlers::list_enrollments)
                            .wrap(RequireRole::any_of(&[Role::Admin, Role::Professor])),
                    ),
            )
            .service(
                web::resource("/student/{id}").route(
                    web::get()
                        .to(handlers::list_by_student)
                        .wrap(
                            RequireRole::any_of(&[Role::Admin, Role::Professor, Role::Student])
                                .with_ownership(student_owns_listing),
                        ),
                ),
            )
            .service(
                web::resource("/course/{id}").route(
                    web::get()
                        .to(handlers::list_by_course)
                        .wrap(RequireRole::any_of(&[Role::Admin, Role::Professor])),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(handlers::get_enrollment)
                            .wrap(RequireRole::any_of(&[
                                Role::Admin,
                                Role::Professor,
                                Role::Student,
                            ])),
                    )
                    .route(
                        web::delete()
                            .to(handlers::delete_enrollment)
                            .wrap(RequireRole::any_of(&[Role::Admin, Role::Student])),
                    ),
            ),
    );
}

//! Route wiring and per-route authorization policy.

use actix_web::web;

use actix_middleware::RequireRole;
use auth_core::Role;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(handlers::create_course)
                            .wrap(RequireRole::any_of(&[Role::Admin, Role::Professor])),
                    )
                    .route(
                        web::get()
                            .to(handlers::list_courses)
                            .wrap(RequireRole::any_of(&[
                                Role::Admin,
                                Role::Professor,
                                Role::EnrollmentService,
                            ])),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::get()
                            .to(handlers::get_course)
                            .wrap(RequireRole::any_of(&[
                                Role::Admin,
                                Role::Professor,
                                Role::EnrollmentService,
                            ])),
                    )
                    .route(
                        web::put()
                            .to(handlers::update_course)
                            .wrap(RequireRole::any_of(&[Role::Admin, Role::Professor])),
                    )
                    .route(
                        web::delete()
                            .to(handlers::delete_course)
                            .wrap(RequireRole::any_of(&[Role::Admin, Role::Professor])),
                    ),
            ),
    );
}

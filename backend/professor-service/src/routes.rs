//! Route wiring and per-route authorization policy.

use actix_web::dev::ServiceRequest;
use actix_web::web;

use actix_middleware::RequireRole;
use auth_core::{Claims, Role};

use crate::handlers;

/// A professor may only read the profile whose id matches their token
/// subject; admins see everyone.
fn professor_owns_profile(claims: &Claims, req: &ServiceRequest) -> bool {
    req.match_info()
        .get("id")
        .map(|id| claims.sub == id)
        .unwrap_or(false)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/professors")
            .service(
                web::resource("")
                    // Registration is open, mirroring student sign-up.
                    .route(web::post().to(handlers::create_professor))
                    .route(
                        web::get()
                            .to(handlers::list_professors)
                            .wrap(RequireRole::any_of(&[Role::Admin, Role::AuthService])),
                    ),
            )
            .service(
                web::resource("/{id}").route(
                    web::get()
                        .to(handlers::get_professor)
                        .wrap(
                            RequireRole::any_of(&[Role::Admin, Role::Professor])
                                .with_ownership(professor_owns_profile),
                        ),
                ),
            ),
    );
}

//! Route wiring. Login routes are open by nature; the discovery route is
//! registered in `main` alongside health.

use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/login")
            .route("/student", web::post().to(handlers::student_login))
            .route("/professor", web::post().to(handlers::professor_login)),
    );
}

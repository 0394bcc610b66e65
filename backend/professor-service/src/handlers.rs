//! Route handlers; authorization happens in the route guards.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CreateProfessor, Professor, ProfessorProfile};
use crate::security::hash_password;
use crate::store::ProfessorStore;

pub async fn create_professor(
    store: web::Data<ProfessorStore>,
    body: web::Json<CreateProfessor>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    if body.name.is_empty() || body.email.is_empty() || body.phone.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Please provide name, email, phone, and password".to_string(),
        ));
    }

    let professor = Professor {
        id: Uuid::new_v4(),
        name: body.name,
        email: body.email,
        phone: body.phone,
        password: hash_password(&body.password)?,
    };

    if !store.insert(professor.clone()) {
        return Err(AppError::BadRequest(
            "Professor with this email already exists".to_string(),
        ));
    }

    tracing::info!(professor_id = %professor.id, "professor registered");
    // The creation response never echoes the hash.
    Ok(HttpResponse::Created().json(ProfessorProfile::from(&professor)))
}

/// Full records, hashes included: the auth service compares login
/// credentials against them.
pub async fn list_professors(store: web::Data<ProfessorStore>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(store.list()))
}

pub async fn get_professor(
    store: web::Data<ProfessorStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let professor = store
        .get(id)
        .ok_or_else(|| AppError::NotFound("Professor not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ProfessorProfile::from(&professor)))
}

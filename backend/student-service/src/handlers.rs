//! Route handlers. Authentication and role policy are enforced by the route
//! guards in `routes`; handlers only see requests that already passed.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CreateStudent, Student, UpdateStudent};
use crate::security::hash_password;
use crate::store::StudentStore;

pub async fn create_student(
    store: web::Data<StudentStore>,
    body: web::Json<CreateStudent>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    if body.name.is_empty() || body.email.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest("Please fill all fields".to_string()));
    }

    let student = Student {
        id: Uuid::new_v4(),
        name: body.name,
        email: body.email,
        password: hash_password(&body.password)?,
    };

    if !store.insert(student.clone()) {
        return Err(AppError::BadRequest("Student already exists".to_string()));
    }

    tracing::info!(student_id = %student.id, "student registered");
    Ok(HttpResponse::Created().json(student))
}

pub async fn list_students(store: web::Data<StudentStore>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(store.list()))
}

pub async fn get_student(
    store: web::Data<StudentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let email = path.into_inner();
    let student = store
        .get(&email)
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    Ok(HttpResponse::Ok().json(student))
}

pub async fn update_student(
    store: web::Data<StudentStore>,
    path: web::Path<String>,
    body: web::Json<UpdateStudent>,
) -> Result<HttpResponse> {
    let email = path.into_inner();
    let body = body.into_inner();

    let password_hash = match body.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let student = store
        .update(&email, body.name, password_hash)
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    Ok(HttpResponse::Ok().json(student))
}

pub async fn delete_student(
    store: web::Data<StudentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let email = path.into_inner();
    store
        .remove(&email)
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Student deleted" })))
}

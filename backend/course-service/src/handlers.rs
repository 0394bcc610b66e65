//! Route handlers. Role policy sits in the route guards; the creator
//! ownership rule on mutations needs the stored record, so it lives here.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use actix_middleware::AuthContext;

use crate::error::{AppError, Result};
use crate::models::{Course, CreateCourse, UpdateCourse};
use crate::store::CourseStore;

pub async fn create_course(
    store: web::Data<CourseStore>,
    context: AuthContext,
    body: web::Json<CreateCourse>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    if body.name.is_empty() || body.code.is_empty() {
        return Err(AppError::BadRequest(
            "Course name and code are required".to_string(),
        ));
    }

    let course = Course {
        id: Uuid::new_v4(),
        name: body.name,
        code: body.code,
        description: body.description,
        created_by: context.subject,
    };
    store.insert(course.clone());

    tracing::info!(course_id = %course.id, created_by = %course.created_by, "course created");
    Ok(HttpResponse::Created().json(course))
}

pub async fn list_courses(store: web::Data<CourseStore>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(store.list()))
}

pub async fn get_course(
    store: web::Data<CourseStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let course = store
        .get(path.into_inner())
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    Ok(HttpResponse::Ok().json(course))
}

pub async fn update_course(
    store: web::Data<CourseStore>,
    context: AuthContext,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCourse>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let course = store
        .get(id)
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    ensure_creator_or_admin(&context, &course)?;

    let updated = store
        .update(id, body.into_inner())
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_course(
    store: web::Data<CourseStore>,
    context: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let course = store
        .get(id)
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    ensure_creator_or_admin(&context, &course)?;

    store.remove(id);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Course deleted" })))
}

fn ensure_creator_or_admin(context: &AuthContext, course: &Course) -> Result<()> {
    if context.is_admin() || course.created_by == context.subject {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Access forbidden: you can only modify courses you created".to_string(),
        ))
    }
}

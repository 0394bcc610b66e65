//! Route handlers. Role policy sits in the route guards; ownership rules
//! that need the stored record (who the enrollment belongs to) live here.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use actix_middleware::AuthContext;
use auth_core::Role;

use crate::error::{AppError, Result};
use crate::models::{CreateEnrollment, Enrollment};
use crate::peers::PeerDirectory;
use crate::store::EnrollmentStore;

pub async fn create_enrollment(
    store: web::Data<EnrollmentStore>,
    peers: web::Data<PeerDirectory>,
    body: web::Json<CreateEnrollment>,
) -> Result<HttpResponse> {
    let body = body.into_inner();

    // Both referenced records must exist at their owning services before the
    // enrollment is persisted.
    if !peers.student_exists(body.student_id).await? {
        return Err(AppError::NotFound(
            "Student with the provided ID does not exist".to_string(),
        ));
    }
    if !peers.course_exists(body.course_id).await? {
        return Err(AppError::NotFound(
            "Course with the provided ID does not exist".to_string(),
        ));
    }

    let enrollment = Enrollment {
        id: Uuid::new_v4(),
        student_id: body.student_id,
        course_id: body.course_id,
    };
    if !store.insert(enrollment.clone()) {
        return Err(AppError::Conflict(
            "Student is already enrolled in this course".to_string(),
        ));
    }

    tracing::info!(enrollment_id = %enrollment.id, "enrollment created");
    Ok(HttpResponse::Created().json(enrollment))
}

pub async fn list_enrollments(store: web::Data<EnrollmentStore>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(store.list()))
}

pub async fn get_enrollment(
    store: web::Data<EnrollmentStore>,
    context: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let enrollment = store
        .get(path.into_inner())
        .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;
    ensure_student_owns(&context, &enrollment, "view")?;
    Ok(HttpResponse::Ok().json(enrollment))
}

pub async fn list_by_student(
    store: web::Data<EnrollmentStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let enrollments = store.list_by_student(path.into_inner());
    if enrollments.is_empty() {
        return Err(AppError::NotFound(
            "No enrollments found for this student ID".to_string(),
        ));
    }
    Ok(HttpResponse::Ok().json(enrollments))
}

pub async fn list_by_course(
    store: web::Data<EnrollmentStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let enrollments = store.list_by_course(path.into_inner());
    if enrollments.is_empty() {
        return Err(AppError::NotFound(
            "No enrollments found for this course ID".to_string(),
        ));
    }
    Ok(HttpResponse::Ok().json(enrollments))
}

pub async fn delete_enrollment(
    store: web::Data<EnrollmentStore>,
    context: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let enrollment = store
        .get(id)
        .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;
    ensure_student_owns(&context, &enrollment, "delete")?;

    store.remove(id);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Enrollment deleted successfully",
        "enrollment": enrollment,
    })))
}

/// Students may only touch their own enrollments; admins and staff pass.
fn ensure_student_owns(
    context: &AuthContext,
    enrollment: &Enrollment,
    action: &str,
) -> Result<()> {
    if context.has_role(Role::Student)
        && !context.is_admin()
        && context.subject != enrollment.student_id.to_string()
    {
        return Err(AppError::Forbidden(format!(
            "Access forbidden: you can only {action} your own enrollments"
        )));
    }
    Ok(())
}

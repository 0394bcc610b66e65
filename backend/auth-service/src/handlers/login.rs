//! Login handlers.
//!
//! Both flows are identical except for which peer service owns the records
//! and which role the issued token carries.

use actix_web::{web, HttpResponse};

use auth_core::{Role, TokenIssuer};

use crate::error::{AppError, Result};
use crate::models::{LoginRequest, PrincipalRecord, TokenResponse};
use crate::peers::PeerDirectory;
use crate::security::verify_password;

pub async fn student_login(
    issuer: web::Data<TokenIssuer>,
    peers: web::Data<PeerDirectory>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    require_credentials(&body)?;

    let record = peers
        .find_student_by_email(&body.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    issue_for(&issuer, &body, record, Role::Student)
}

pub async fn professor_login(
    issuer: web::Data<TokenIssuer>,
    peers: web::Data<PeerDirectory>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    require_credentials(&body)?;

    let record = peers
        .find_professor_by_email(&body.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    issue_for(&issuer, &body, record, Role::Professor)
}

fn require_credentials(body: &LoginRequest) -> Result<()> {
    if body.email.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}

fn issue_for(
    issuer: &TokenIssuer,
    body: &LoginRequest,
    record: PrincipalRecord,
    role: Role,
) -> Result<HttpResponse> {
    verify_password(&body.password, &record.password)?;

    let token = issuer
        .issue_human(
            &record.id.to_string(),
            vec![role],
            Some(record.email.clone()),
        )
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(subject = %record.id, ?role, "login succeeded");
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Error types for the auth service
///
/// Login failures deliberately collapse to one message: whether the email
/// was unknown or the password wrong is not distinguishable from outside.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

use service_clients::ServiceCallError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    InvalidCredentials,
    Upstream(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::Upstream(msg) => write!(f, "Upstream failure: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::Upstream(_) => "Upstream service unavailable".to_string(),
            AppError::Internal(_) => "Server error".to_string(),
        };
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "message": message }))
    }
}

impl From<ServiceCallError> for AppError {
    fn from(err: ServiceCallError) -> Self {
        match err {
            ServiceCallError::Unreachable { .. } => AppError::Upstream(err.to_string()),
            ServiceCallError::Rejected { .. }
            | ServiceCallError::InvalidBody(_)
            | ServiceCallError::Token(_) => AppError::Internal(err.to_string()),
        }
    }
}

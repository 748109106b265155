use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::application::AppError;

/// HTTP mapping for the application error taxonomy. Validation and
/// business-rule errors surface their message as a plain-text 4xx body;
/// internal errors are logged and surfaced as an opaque 500.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields
            | AppError::InvalidTradeKind(_)
            | AppError::NonPositiveAmount
            | AppError::InsufficientBalance { .. }
            | AppError::UsernameTaken => StatusCode::BAD_REQUEST,
            AppError::ProjectNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Internal(err) => {
                error!(error = %err, "internal error surfaced to client");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(body)
    }
}

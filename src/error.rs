//! Application error type and its HTTP mapping.
//!
//! Every error carries a stable, machine-readable reason (`code` in the JSON
//! body) and a human-readable message:
//!
//! ```json
//! { "error": { "code": "code_taken", "message": "...", "details": { "code": "abc123" } } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::RepositoryError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid code: {0}")]
    InvalidCode(String),

    #[error("Code '{0}' is reserved")]
    ReservedCode(String),

    #[error("Code '{0}' is already taken")]
    CodeTaken(String),

    #[error("Short link '{0}' not found")]
    NotFound(String),

    #[error("Storage is temporarily unavailable, try again")]
    StorageUnavailable(String),

    #[error("Could not find a free short code after {attempts} attempts, try again")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Stable reason string exposed to clients.
    pub fn reason(&self) -> &'static str {
        match self {
            AppError::InvalidUrl(_) => "invalid_url",
            AppError::InvalidCode(_) => "invalid_code",
            AppError::ReservedCode(_) => "reserved_code",
            AppError::CodeTaken(_) => "code_taken",
            AppError::NotFound(_) => "not_found",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::CodeSpaceExhausted { .. } => "code_space_exhausted",
            AppError::BadRequest(_) => "invalid_request",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl(_)
            | AppError::InvalidCode(_)
            | AppError::ReservedCode(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::CodeTaken(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageUnavailable(_) | AppError::CodeSpaceExhausted { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the same request may succeed if simply retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_) | AppError::CodeSpaceExhausted { .. }
        )
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::InvalidCode(_) | AppError::InvalidUrl(_) | AppError::BadRequest(_) => {
                json!({})
            }
            AppError::ReservedCode(code) | AppError::CodeTaken(code) | AppError::NotFound(code) => {
                json!({ "code": code })
            }
            AppError::CodeSpaceExhausted { attempts } => json!({ "attempts": attempts }),
            AppError::StorageUnavailable(_) | AppError::Internal(_) => json!({}),
        };

        ErrorInfo {
            code: self.reason(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Duplicate { code } => AppError::CodeTaken(code),
            RepositoryError::Unavailable(reason) => AppError::StorageUnavailable(reason),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::StorageUnavailable(reason) => {
                tracing::warn!(reason = %reason, "Storage unavailable");
            }
            AppError::Internal(reason) => {
                tracing::error!(reason = %reason, "Internal error");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if self.is_retryable() {
            (status, [(header::RETRY_AFTER, "1")], Json(body)).into_response()
        } else {
            (status, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        assert_eq!(
            AppError::InvalidUrl("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ReservedCode("healthz".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CodeTaken("abc123".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound("abc123".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::CodeSpaceExhausted { attempts: 8 }.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_code_taken_and_exhaustion_are_distinct() {
        let taken = AppError::CodeTaken("abc123".into());
        let exhausted = AppError::CodeSpaceExhausted { attempts: 8 };

        assert_ne!(taken.reason(), exhausted.reason());
        assert!(!taken.is_retryable());
        assert!(exhausted.is_retryable());
    }

    #[test]
    fn test_repository_error_conversion() {
        let err: AppError = RepositoryError::Duplicate {
            code: "abc123".into(),
        }
        .into();
        assert!(matches!(err, AppError::CodeTaken(code) if code == "abc123"));

        let err: AppError = RepositoryError::Unavailable("timeout".into()).into();
        assert!(matches!(err, AppError::StorageUnavailable(_)));
    }

    #[test]
    fn test_error_info_shape() {
        let info = AppError::NotFound("abc123".into()).to_error_info();

        assert_eq!(info.code, "not_found");
        assert!(info.message.contains("abc123"));
        assert_eq!(info.details["code"], "abc123");
    }

    #[test]
    fn test_unavailable_response_has_retry_after() {
        let response = AppError::StorageUnavailable("pool timed out".into()).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "1");
    }
}

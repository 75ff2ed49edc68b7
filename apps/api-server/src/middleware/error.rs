//! Error handling - maps failures onto the `{ success: false, error }` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use signup_shared::ErrorResponse;
use std::fmt;

use signup_core::ports::StorageError;
use signup_core::{DomainError, RepoError};

/// Application-level error type. Every message here is safe to return to
/// the caller; internal details are logged where the error is created.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Replace the generic message of an internal error with one naming the
    /// operation that failed. Client-facing errors pass through unchanged.
    pub fn with_internal_message(self, message: &str) -> Self {
        match self {
            AppError::Internal(_) => AppError::Internal(message.to_string()),
            other => other,
        }
    }

    /// The text placed in the response envelope.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => msg,
            AppError::MethodNotAllowed => "Method not allowed",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.public_message()))
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::NotFound { entity_type, .. } => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Storage(detail) => {
                tracing::error!(error = %detail, "Storage error");
                AppError::Internal("Failed to save image file".to_string())
            }
            DomainError::Hashing(detail) | DomainError::Persistence(detail) => {
                tracing::error!(error = %detail, "Persistence error");
                AppError::Internal("Internal server error".to_string())
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        DomainError::from(err).into()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        DomainError::from(err).into()
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn renders_error_envelope() {
        let response = AppError::NotFound("User not found".into()).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "User not found" })
        );
    }

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::invalid("name is required"), StatusCode::BAD_REQUEST),
            (
                DomainError::NotFound {
                    entity_type: "User",
                    id: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (DomainError::Storage("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Hashing("bad".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Persistence("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn repo_errors_reach_the_envelope() {
        let missing = AppError::from(RepoError::NotFound);
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.public_message(), "User not found");

        let timeout = AppError::from(RepoError::Timeout(std::time::Duration::from_secs(5)));
        assert_eq!(timeout.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(timeout.public_message(), "Internal server error");
    }

    #[test]
    fn storage_errors_report_failed_save() {
        let err = AppError::from(StorageError::CreateDir {
            path: "uploads/images".into(),
            source: std::io::Error::other("read-only file system"),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Failed to save image file");
    }

    #[test]
    fn internal_message_only_replaces_internal_errors() {
        let err = AppError::from(RepoError::Query("boom".into()))
            .with_internal_message("Failed to retrieve users");
        assert_eq!(err.public_message(), "Failed to retrieve users");

        let err = AppError::from(RepoError::NotFound).with_internal_message("Failed to retrieve users");
        assert_eq!(err.public_message(), "User not found");
    }

    #[actix_web::test]
    async fn method_not_allowed_renders_405() {
        let response = AppError::MethodNotAllowed.error_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Method not allowed");
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err = AppError::from(DomainError::Persistence("password=hunter2".into()));
        assert!(!err.public_message().contains("hunter2"));
    }
}

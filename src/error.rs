use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strucbot_api::ErrorResponse;

/// Application-wide error taxonomy. Every failure is caught at the route
/// boundary and converted into a `{"error": message}` body with the mapped
/// status code. Nothing is retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Already exists: {0}")]
    Conflict(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    InvalidToken(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code, public message, and the detail that is only logged.
    fn get_error_info(&self) -> (StatusCode, String, Option<String>) {
        match self {
            AppError::Validation(msg) | AppError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::InvalidToken(msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::GenerationFailed(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate schema from AI".to_string(),
                Some(detail.clone()),
            ),
            AppError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred".to_string(),
                Some(detail.clone()),
            ),
        }
    }

    // === Constructor helpers ===

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        AppError::InvalidToken(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn generation_failed(msg: impl Into<String>) -> Self {
        AppError::GenerationFailed(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    #[cfg(test)]
    pub fn status_code(&self) -> StatusCode {
        self.get_error_info().0
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, internal_detail) = self.get_error_info();

        if let Some(detail) = internal_detail {
            tracing::error!(%status, %detail, "Request failed");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

// === Conversions from module errors ===

impl From<crate::store::error::StoreError> for AppError {
    fn from(err: crate::store::error::StoreError) -> Self {
        match err {
            crate::store::error::StoreError::NotFound(msg) => AppError::not_found(msg),
            crate::store::error::StoreError::Duplicate(msg) => AppError::conflict(msg),
        }
    }
}

impl From<crate::auth::jwt::JwtError> for AppError {
    fn from(err: crate::auth::jwt::JwtError) -> Self {
        match err {
            crate::auth::jwt::JwtError::GenerationFailed(e) => AppError::internal(e.to_string()),
            crate::auth::jwt::JwtError::VerificationFailed(_) => {
                AppError::invalid_token("Invalid or expired token")
            }
        }
    }
}

impl From<crate::auth::password::PasswordError> for AppError {
    fn from(err: crate::auth::password::PasswordError) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<crate::gemini::GeminiError> for AppError {
    fn from(err: crate::gemini::GeminiError) -> Self {
        AppError::generation_failed(err.to_string())
    }
}

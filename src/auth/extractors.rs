use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use strucbot_api::{Role, UserResponse};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::AppError;
use crate::store::UserStore;

/// Request-scoped identity for protected routes.
///
/// Validates `Authorization: Bearer <JWT>`, then re-resolves the subject
/// against the credential store so a token for a vanished user is rejected
/// rather than trusted.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<AuthUser> for UserResponse {
    fn from(user: AuthUser) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::unauthorized("Access token required"))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::unauthorized("Access token required"))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("Access token required"))?;

        let claims = state
            .jwt
            .verify(token)
            .map_err(|_| AppError::invalid_token("Invalid or expired token"))?;

        let user = state
            .users
            .find_by_id(claims.sub)?
            .ok_or_else(|| AppError::invalid_token("User not found"))?;

        Ok(AuthUser {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        })
    }
}

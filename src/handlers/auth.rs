use axum::{Json, extract::State, http::StatusCode};
use strucbot_api::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateProfileRequest,
    UpdateProfileResponse, UserResponse,
};

use crate::app::AppState;
use crate::auth::extractors::AuthUser;
use crate::error::AppError;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    state.auth.register(payload)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (token, user) = state.auth.login(&payload)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}

/// GET /api/auth/profile
pub async fn get_profile(user: AuthUser) -> Json<UserResponse> {
    Json(user.into())
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, AppError> {
    let updated = state.auth.update_profile(user.id, payload)?;

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: updated,
    }))
}

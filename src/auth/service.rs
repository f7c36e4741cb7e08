use std::sync::Arc;

use strucbot_api::{LoginRequest, RegisterRequest, Role, UpdateProfileRequest, UserResponse};
use uuid::Uuid;

use crate::auth::jwt::JwtManager;
use crate::auth::password::PasswordManager;
use crate::error::AppError;
use crate::store::UserStore;
use crate::store::models::{NewUser, ProfileChanges};

pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtManager,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtManager) -> Self {
        Self { users, jwt }
    }

    /// Registers a new account with role `user`.
    pub fn register(&self, request: RegisterRequest) -> Result<UserResponse, AppError> {
        if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
            return Err(AppError::validation("All fields are required"));
        }

        let password_hash = PasswordManager::hash(&request.password)?;

        let user = self.users.insert(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role: Role::User,
        })?;

        tracing::info!("New user registered: {}", user.username);
        Ok(user.into())
    }

    /// Verifies credentials and issues a bearer token. Lookup and hash
    /// failures are indistinguishable to the caller, so an unknown username
    /// leaks nothing beyond the generic message.
    pub fn login(&self, request: &LoginRequest) -> Result<(String, UserResponse), AppError> {
        let user = self
            .users
            .find_by_login(&request.username)?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        if !PasswordManager::verify(&request.password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let token = self.jwt.issue(user.id, &user.username)?;

        tracing::info!("User logged in: {}", user.username);
        Ok((token, user.into()))
    }

    /// Updates username and/or email in place.
    pub fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        let changes = ProfileChanges {
            username: request.username,
            email: request.email,
        };

        let user = self.users.update_profile(user_id, &changes)?;

        tracing::info!("User profile updated: {}", user.username);
        Ok(user.into())
    }
}

use std::sync::{Arc, RwLock, RwLockWriteGuard};
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use strucbot_api::{
    DeleteSchemaResponse, ErrorResponse, GenerateSchemaRequest, LoginRequest, LoginResponse,
    RegisterRequest, RegisterResponse, SchemaRecord, UpdateProfileRequest, UpdateProfileResponse,
    UserResponse,
};
use uuid::Uuid;

use crate::auth::AuthStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Session is no longer valid")]
    SessionExpired,
}

/// Typed client for the strucbot API with a reusable HTTP client and a
/// shared auth store. The bearer token is attached to every request, and
/// any 401/403 answer anywhere invalidates the session.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<RwLock<AuthStore>>,
}

impl ApiClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:4000/api`.
    pub fn new(
        base_url: impl Into<String>,
        auth: Arc<RwLock<AuthStore>>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    // === Authentication ===

    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        self.send(self.http.post(self.url("/auth/register")).json(request))
            .await
    }

    /// On success the session is stored (and persisted) before returning.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .send(self.http.post(self.url("/auth/login")).json(request))
            .await?;

        if let Err(e) = self
            .auth_mut()
            .login(response.user.clone(), response.token.clone())
        {
            tracing::warn!("Failed to persist session: {e}");
        }

        Ok(response)
    }

    pub async fn profile(&self) -> Result<UserResponse, ApiError> {
        self.send(self.http.get(self.url("/auth/profile"))).await
    }

    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, ApiError> {
        let response: UpdateProfileResponse = self
            .send(self.http.put(self.url("/auth/profile")).json(request))
            .await?;

        self.auth_mut().set_user(response.user.clone());
        Ok(response)
    }

    // === Schemas ===

    pub async fn generate_schema(&self, prompt: impl Into<String>) -> Result<SchemaRecord, ApiError> {
        let request = GenerateSchemaRequest {
            prompt: prompt.into(),
        };
        self.send(self.http.post(self.url("/generate-schema")).json(&request))
            .await
    }

    pub async fn schemas(&self) -> Result<Vec<SchemaRecord>, ApiError> {
        self.send(self.http.get(self.url("/schemas"))).await
    }

    pub async fn delete_schema(&self, id: Uuid) -> Result<DeleteSchemaResponse, ApiError> {
        self.send(self.http.delete(self.url(&format!("/schemas/{id}"))))
            .await
    }

    // === Plumbing ===

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn auth_mut(&self) -> RwLockWriteGuard<'_, AuthStore> {
        self.auth.write().expect("auth store lock poisoned")
    }

    fn bearer(&self) -> Option<String> {
        self.auth
            .read()
            .expect("auth store lock poisoned")
            .token()
            .map(str::to_string)
    }

    /// Global response interceptor: a 401/403 from any call means the
    /// session is invalid, so the persisted auth state is cleared and the
    /// caller sees [`ApiError::SessionExpired`] - the route guard then falls
    /// back to the login screen.
    fn check_session(&self, status: StatusCode) -> Result<(), ApiError> {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::info!("Authentication error, logging out...");
            self.auth_mut().logout();
            return Err(ApiError::SessionExpired);
        }
        Ok(())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let builder = match self.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();

        self.check_session(status)?;

        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| status.to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

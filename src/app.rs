use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::auth::jwt::JwtManager;
use crate::auth::service::AuthService;
use crate::gemini::SchemaGenerator;
use crate::handlers::auth::{get_profile, login, register, update_profile};
use crate::handlers::health::health;
use crate::handlers::schema::{delete_schema, generate_schema, list_schemas};
use crate::store::memory::MemoryStore;
use crate::store::{SchemaStore, UserStore};

/// Shared state for every handler. The stores and the generator are trait
/// objects so a persistent engine or a different model provider can be
/// swapped in without touching handler logic.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<dyn UserStore>,
    pub schemas: Arc<dyn SchemaStore>,
    pub jwt: JwtManager,
    pub generator: Arc<dyn SchemaGenerator>,
}

impl AppState {
    pub fn new(
        store: Arc<MemoryStore>,
        jwt: JwtManager,
        generator: Arc<dyn SchemaGenerator>,
    ) -> Self {
        let users: Arc<dyn UserStore> = store.clone();
        let schemas: Arc<dyn SchemaStore> = store;
        let auth = Arc::new(AuthService::new(users.clone(), jwt.clone()));

        Self {
            auth,
            users,
            schemas,
            jwt,
            generator,
        }
    }
}

/// Public and protected authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(get_profile).put(update_profile))
}

/// Schema generation and management routes (all protected)
pub fn schema_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-schema", post(generate_schema))
        .route("/schemas", get(list_schemas))
        .route("/schemas/{id}", delete(delete_schema))
}

/// Builds the complete application
pub fn build_router(state: AppState) -> Router {
    let api = Router::new().nest("/auth", auth_routes()).merge(schema_routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::json;
    use strucbot_api::{LoginResponse, SchemaRecord};
    use tower::ServiceExt; // for oneshot
    use uuid::Uuid;

    use crate::gemini::{GeminiError, GeneratedSchema};

    struct FixedGenerator;

    #[async_trait]
    impl SchemaGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<GeneratedSchema, GeminiError> {
            let reply = json!({
                "table_name": "users",
                "columns": [
                    {"name": "id", "data_type": "SERIAL PRIMARY KEY"},
                    {"name": "email", "data_type": "VARCHAR(255)"},
                ],
            });
            Ok(serde_json::from_value(reply).expect("fixture"))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl SchemaGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<GeneratedSchema, GeminiError> {
            Err(GeminiError::EmptyReply)
        }
    }

    fn test_app_with(generator: Arc<dyn SchemaGenerator>) -> Router {
        let store = Arc::new(MemoryStore::new());
        let jwt = JwtManager::new("test_secret_for_routes", 24);
        build_router(AppState::new(store, jwt, generator))
    }

    fn test_app() -> Router {
        test_app_with(Arc::new(FixedGenerator))
    }

    fn request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": password,
                })),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": username, "password": password})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let login: LoginResponse = serde_json::from_value(body_json(resp).await).unwrap();
        login.token
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let resp = test_app()
            .oneshot(request("GET", "/health", None, None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let app = test_app();
        register_and_login(&app, "alice", "secret1").await;

        let resp = app
            .oneshot(request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "username": "alice",
                    "email": "different@example.com",
                    "password": "secret1",
                })),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["error"],
            "Username or email already exists"
        );
    }

    #[tokio::test]
    async fn register_rejects_missing_fields() {
        let resp = test_app()
            .oneshot(request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({"username": "alice"})),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "All fields are required");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized_not_not_found() {
        let app = test_app();
        register_and_login(&app, "alice", "secret1").await;

        let resp = app
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": "alice", "password": "wrong"})),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn login_with_unknown_username_gives_the_same_answer() {
        let resp = test_app()
            .oneshot(request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": "ghost", "password": "secret1"})),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["error"], "Invalid credentials");
    }

    #[tokio::test]
    async fn profile_requires_a_token() {
        let resp = test_app()
            .oneshot(request("GET", "/api/auth/profile", None, None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn profile_rejects_a_tampered_token() {
        let app = test_app();
        let token = register_and_login(&app, "alice", "secret1").await;
        let tampered = format!("{token}x");

        let resp = app
            .oneshot(request("GET", "/api/auth/profile", Some(&tampered), None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn profile_returns_the_caller_identity() {
        let app = test_app();
        let token = register_and_login(&app, "alice", "secret1").await;

        let resp = app
            .oneshot(request("GET", "/api/auth/profile", Some(&token), None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["username"], "alice");
        assert_eq!(body["email"], "alice@example.com");
        assert_eq!(body["role"], "user");
    }

    #[tokio::test]
    async fn update_profile_changes_username() {
        let app = test_app();
        let token = register_and_login(&app, "alice", "secret1").await;

        let resp = app
            .oneshot(request(
                "PUT",
                "/api/auth/profile",
                Some(&token),
                Some(json!({"username": "alice2"})),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Profile updated successfully");
        assert_eq!(body["user"]["username"], "alice2");
    }

    #[tokio::test]
    async fn generate_schema_requires_a_prompt() {
        let app = test_app();
        let token = register_and_login(&app, "alice", "secret1").await;

        let resp = app
            .oneshot(request(
                "POST",
                "/api/generate-schema",
                Some(&token),
                Some(json!({})),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Prompt is required");
    }

    #[tokio::test]
    async fn generation_failure_surfaces_as_a_generic_500() {
        let app = test_app_with(Arc::new(FailingGenerator));
        let token = register_and_login(&app, "alice", "secret1").await;

        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/generate-schema",
                Some(&token),
                Some(json!({"prompt": "users table"})),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await["error"],
            "Failed to generate schema from AI"
        );

        // Nothing was stored for the caller.
        let resp = app
            .oneshot(request("GET", "/api/schemas", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await, json!([]));
    }

    #[tokio::test]
    async fn schemas_are_listed_in_generation_order() {
        let app = test_app();
        let token = register_and_login(&app, "alice", "secret1").await;

        let mut ids = Vec::new();
        for prompt in ["first", "second", "third"] {
            let resp = app
                .clone()
                .oneshot(request(
                    "POST",
                    "/api/generate-schema",
                    Some(&token),
                    Some(json!({"prompt": prompt})),
                ))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let record: SchemaRecord = serde_json::from_value(body_json(resp).await).unwrap();
            ids.push(record.id);
        }

        let resp = app
            .oneshot(request("GET", "/api/schemas", Some(&token), None))
            .await
            .unwrap();
        let records: Vec<SchemaRecord> = serde_json::from_value(body_json(resp).await).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), ids);
        assert_eq!(
            records.iter().map(|r| r.prompt.as_str()).collect::<Vec<_>>(),
            ["first", "second", "third"]
        );
    }

    #[tokio::test]
    async fn deleting_another_users_schema_is_not_found() {
        let app = test_app();
        let alice = register_and_login(&app, "alice", "secret1").await;
        let bob = register_and_login(&app, "bob", "secret2").await;

        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/generate-schema",
                Some(&alice),
                Some(json!({"prompt": "users table"})),
            ))
            .await
            .unwrap();
        let record: SchemaRecord = serde_json::from_value(body_json(resp).await).unwrap();

        let resp = app
            .clone()
            .oneshot(request(
                "DELETE",
                &format!("/api/schemas/{}", record.id),
                Some(&bob),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // Alice still has her record.
        let resp = app
            .oneshot(request("GET", "/api/schemas", Some(&alice), None))
            .await
            .unwrap();
        let records: Vec<SchemaRecord> = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn deleting_an_unknown_schema_id_is_not_found() {
        let app = test_app();
        let token = register_and_login(&app, "alice", "secret1").await;

        let resp = app
            .oneshot(request(
                "DELETE",
                &format!("/api/schemas/{}", Uuid::new_v4()),
                Some(&token),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "Schema not found");
    }

    #[tokio::test]
    async fn register_login_generate_list_delete_flow() {
        let app = test_app();
        let token = register_and_login(&app, "alice", "secret1").await;

        // A fresh account starts with an empty collection.
        let resp = app
            .clone()
            .oneshot(request("GET", "/api/schemas", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await, json!([]));

        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/generate-schema",
                Some(&token),
                Some(json!({"prompt": "users table"})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let record: SchemaRecord = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(record.table_name, "users");
        assert!(!record.columns.is_empty());
        assert_eq!(record.prompt, "users table");

        let resp = app
            .clone()
            .oneshot(request("GET", "/api/schemas", Some(&token), None))
            .await
            .unwrap();
        let records: Vec<SchemaRecord> = serde_json::from_value(body_json(resp).await).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, record.id);

        let resp = app
            .clone()
            .oneshot(request(
                "DELETE",
                &format!("/api/schemas/{}", record.id),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await["message"],
            "Schema deleted successfully"
        );

        let resp = app
            .oneshot(request("GET", "/api/schemas", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await, json!([]));
    }
}

use std::sync::Arc;

mod app;
mod auth;
mod config;
mod error;
mod gemini;
mod handlers;
mod store;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{AppState, build_router};
use auth::jwt::JwtManager;
use config::Config;
use gemini::{GeminiClient, SchemaGenerator};
use store::memory::MemoryStore;

pub async fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,strucbot=debug,tower_http=info")
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// ----------------- Main -----------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging().await;
    tracing::info!("Starting strucbot...");

    let config = Config::from_env()?;

    let store = Arc::new(MemoryStore::new());
    store.seed_admin()?;

    let jwt = JwtManager::new(&config.jwt_secret, config.jwt_expiration_hours);
    let generator: Arc<dyn SchemaGenerator> =
        Arc::new(GeminiClient::new(config.gemini_api_key.clone())?);

    let state = AppState::new(store, jwt, generator);

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_url.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let app = build_router(state).layer(cors);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

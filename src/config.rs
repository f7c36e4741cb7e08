use anyhow::Result;
use std::env;

/// Fallback signing secret for local demo runs. Production refuses to start
/// on it.
const INSECURE_DEFAULT_SECRET: &str = "default-insecure-secret-key";

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn detect() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    #[expect(dead_code, reason = "Consumed during loading; field retained for completeness")]
    pub environment: Environment,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub gemini_api_key: String,
    pub frontend_url: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    /// Loads the configuration from environment variables with per-variable
    /// fallbacks.
    pub fn from_env() -> Result<Self> {
        let environment = Environment::detect();

        tracing::info!(
            "🌍 Environment detected: {}",
            environment.as_str().to_uppercase()
        );

        let jwt_secret = Self::get_jwt_secret(&environment)?;
        let gemini_api_key = Self::get_gemini_api_key()?;

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<i64>()
            .unwrap_or(24);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5174".to_string());
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .unwrap_or(4000);

        tracing::info!("✅ Configuration loaded successfully");
        tracing::debug!("   Frontend: {}", frontend_url);
        tracing::debug!("   Server: {}:{}", server_host, server_port);

        Ok(Self {
            environment,
            jwt_secret,
            jwt_expiration_hours,
            gemini_api_key,
            frontend_url,
            server_host,
            server_port,
        })
    }

    /// The generation gateway is the point of this demo, so a missing key is
    /// a startup failure rather than a deferred 500.
    fn get_gemini_api_key() -> Result<String> {
        env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY must be set"))
    }

    fn get_jwt_secret(environment: &Environment) -> Result<String> {
        let secret = match env::var("JWT_SECRET") {
            Ok(s) => s,
            Err(_) if environment.is_production() => {
                tracing::error!("❌ JWT_SECRET not set in production!");
                anyhow::bail!("JWT_SECRET is required in production");
            }
            Err(_) => {
                tracing::warn!("⚠️  JWT_SECRET not set, using default (DEVELOPMENT ONLY!)");
                INSECURE_DEFAULT_SECRET.to_string()
            }
        };

        if environment.is_production() && secret.len() < 32 {
            anyhow::bail!(
                "JWT_SECRET must be at least 32 characters in production (current: {})",
                secret.len()
            );
        }

        Ok(secret)
    }

}

use crate::error::{ApiError, ApiResult};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub allowed_origin: String,
    pub stripe_secret_key: String,
    pub stripe_api_base: String,
    pub max_pool_size: u32,
}

impl AppConfig {
    pub fn from_env() -> ApiResult<Self> {
        dotenv().ok();

        let required = |name: &str| {
            env::var(name).map_err(|_| ApiError::Config(format!("{} is not set", name)))
        };

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| ApiError::Config(format!("invalid PORT: {}", e)))?;
        let database_url = required("DATABASE_URL")?;
        let allowed_origin = env::var("ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "https://zingy-twilight-e56255.netlify.app".to_string());
        let stripe_secret_key = required("STRIPE_SECRET_KEY")?;
        let stripe_api_base =
            env::var("STRIPE_API_BASE").unwrap_or_else(|_| "https://api.stripe.com".to_string());
        let max_pool_size = env::var("MAX_POOL_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|e| ApiError::Config(format!("invalid MAX_POOL_SIZE: {}", e)))?;

        Ok(Self {
            host,
            port,
            database_url,
            allowed_origin,
            stripe_secret_key,
            stripe_api_base,
            max_pool_size,
        })
    }
}

use actix_web::error::BlockingError;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with, mapped onto a stable response
/// envelope. Internal kinds keep their cause server-side only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("payment processor error: {0}")]
    Payment(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("blocking task canceled")]
    Canceled,

    #[error("password hashing error: {0}")]
    Hash(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<BlockingError> for ApiError {
    fn from(_: BlockingError) -> Self {
        ApiError::Canceled
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({ "message": msg })),
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(json!({ "message": msg })),
            ApiError::Payment(msg) => {
                tracing::error!(error = %self, "payment intent creation failed");
                // The processor's own message goes back to the caller.
                HttpResponse::InternalServerError().json(json!({ "error": msg }))
            }
            ApiError::Config(_)
            | ApiError::Database(_)
            | ApiError::Pool(_)
            | ApiError::Canceled
            | ApiError::Hash(_) => {
                tracing::error!(error = %self, "request failed");
                HttpResponse::InternalServerError().json(json!({ "message": "Internal Server Error" }))
            }
        }
    }
}

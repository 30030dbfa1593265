use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use matching_engine::IntakeError;
use serde_json::json;
use thiserror::Error;

use crate::exchange::ExchangeError;

/// Central error type for the gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid order: {0}")]
    InvalidOrder(String),

    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable error code, shared by HTTP responses and WebSocket error
    /// frames.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidOrder(_) => "INVALID_ORDER",
            AppError::UnknownAsset(_) => "UNKNOWN_ASSET",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::RateLimitExceeded(_) => "RATE_LIMIT_EXCEEDED",
            AppError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidOrder(_) | AppError::UnknownAsset(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<IntakeError> for AppError {
    fn from(error: IntakeError) -> Self {
        match error {
            IntakeError::InvalidOrder { reason } => AppError::InvalidOrder(reason),
            IntakeError::UnknownAsset { symbol } => AppError::UnknownAsset(symbol),
        }
    }
}

impl From<ExchangeError> for AppError {
    fn from(error: ExchangeError) -> Self {
        match error {
            ExchangeError::Rejected(intake_error) => intake_error.into(),
            ExchangeError::Unavailable(asset) => {
                AppError::ServiceUnavailable(format!("book worker for {asset} is unavailable"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Internal details stay in the logs
            AppError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": self.code(),
            "message": message
        }));

        (status, body).into_response()
    }
}

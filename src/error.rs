use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::config::settings::Environment;

/// Unified error type for the entire application
#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Too many failed login attempts")]
    TooManyAttempts,

    #[error("Authorization token required")]
    MissingToken,

    #[error("Token is not valid")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token does not resolve to a known user")]
    UnknownUser,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create a new validation error
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new not found error
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new config error
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal<T: Into<String>>(msg: T) -> Self {
        Self::Internal(msg.into())
    }

    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::DuplicateEmail => "validation",
            ApiError::UserNotFound => "authentication",
            ApiError::InvalidCredentials => "authentication",
            ApiError::TooManyAttempts => "authentication",
            ApiError::MissingToken => "authorization",
            ApiError::InvalidToken => "authorization",
            ApiError::TokenExpired => "authorization",
            ApiError::UnknownUser => "authorization",
            ApiError::NotFound(_) => "not_found",
            ApiError::Database(_) => "database",
            ApiError::Storage(_) => "storage",
            ApiError::Config(_) => "config",
            ApiError::Internal(_) => "internal",
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::DuplicateEmail => 400,
            ApiError::UserNotFound => 404,
            ApiError::InvalidCredentials => 400,
            ApiError::TooManyAttempts => 429,
            ApiError::MissingToken => 401,
            ApiError::InvalidToken => 401,
            ApiError::TokenExpired => 401,
            ApiError::UnknownUser => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Database(_) => 500,
            ApiError::Storage(_) => 500,
            ApiError::Config(_) => 500,
            ApiError::Internal(_) => 500,
        }
    }

    /// Message safe to return to the caller. Server-side failure detail is
    /// only exposed outside production mode.
    fn public_message(&self) -> String {
        if self.http_status_code() >= 500 && Environment::current().is_production() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    /// Convert to JSON for API responses
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "error": self.category(),
            "message": self.public_message(),
            "code": self.http_status_code(),
        })
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if self.http_status_code() >= 500 {
            tracing::error!("request failed: {}", self);
        }
        HttpResponse::build(self.status_code()).json(self.to_json())
    }
}

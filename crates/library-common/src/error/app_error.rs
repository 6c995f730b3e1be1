//! Application error types
//!
//! Errors raised outside the administration layer: authentication, request
//! parsing, configuration and startup.

use library_core::DomainError;
use std::fmt;

use super::codes;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Missing authentication")]
    MissingAuth,

    // Request errors
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Response code for the API envelope
    #[must_use]
    pub fn response_code(&self) -> &'static str {
        match self {
            Self::MissingAuth => codes::MISSING_AUTH,
            Self::InvalidToken | Self::TokenExpired => codes::INVALID_TOKEN,
            Self::MalformedBody(_) => codes::MALFORMED_BODY,
            Self::Validation(_) => codes::INVALID_FIELD,
            Self::NotFound(_) => codes::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => codes::INTERNAL,
            Self::Domain(e) => {
                if e.is_not_found() {
                    codes::NOT_FOUND
                } else if e.is_validation() {
                    codes::INVALID_FIELD
                } else {
                    codes::INTERNAL
                }
            }
        }
    }

    /// Check if this is an authentication failure
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::MissingAuth | Self::InvalidToken | Self::TokenExpired)
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

//! Response envelope and error handling for API endpoints
//!
//! Every outcome, success or failure, is answered with HTTP 200 and a
//! `{code, message, data?}` body. Callers branch on `code`.

use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use library_common::{codes, AppError};
use library_service::dto::ApiResponse;
use library_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// API error type for consistent error responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    App(#[from] AppError),

    #[error("{0}")]
    Service(#[from] ServiceError),
}

impl ApiError {
    /// Response code for the envelope
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::App(e) => e.response_code(),
            Self::Service(e) => e.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let message = self.to_string();

        if code == codes::INTERNAL {
            error!(error = ?self, "Request failed");
        } else {
            warn!(code, error = %message, "Request rejected");
        }

        Json(ApiResponse::failure(code, message)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Successful envelope
pub type Envelope<T> = Json<ApiResponse<T>>;

/// Wrap `data` in a success envelope
pub fn success<T: Serialize>(data: T) -> Envelope<T> {
    Json(ApiResponse::success("success", data))
}

/// Last-resort answer when a handler panics
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = %detail, "Handler panicked");

    Json(ApiResponse::failure(
        codes::UNHANDLED_FAILURE,
        "Unexpected failure while handling the request",
    ))
    .into_response()
}

/// Answer for a request cut off by the timeout middleware
pub fn timeout_response() -> Response {
    Json(ApiResponse::failure(
        codes::UNHANDLED_FAILURE,
        "Request timed out",
    ))
    .into_response()
}

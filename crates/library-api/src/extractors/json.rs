//! JSON body extractor
//!
//! Keeps the raw document alongside the typed request so it can be
//! written to the audit ledger. An empty body reads as `{}`.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use library_common::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::response::ApiError;

/// Typed request body plus the JSON it was read from
#[derive(Debug, Clone)]
pub struct JsonBody<T> {
    pub body: T,
    pub raw: Value,
}

impl<T: DeserializeOwned> JsonBody<T> {
    /// Parse a request body
    ///
    /// # Errors
    /// `MalformedBody` when the bytes are not a JSON object, `Validation`
    /// when the object does not fit `T`
    pub fn parse(bytes: &[u8]) -> Result<Self, AppError> {
        let raw = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice::<Value>(bytes)
                .map_err(|e| AppError::MalformedBody(e.to_string()))?
        };
        if !raw.is_object() {
            return Err(AppError::MalformedBody("expected a JSON object".to_string()));
        }

        let body = serde_json::from_value::<T>(raw.clone()).map_err(AppError::validation)?;
        Ok(Self { body, raw })
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::App(AppError::MalformedBody(e.to_string())))?;
        Ok(Self::parse(&bytes)?)
    }
}

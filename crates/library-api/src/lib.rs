//! # library-api
//!
//! HTTP API server built with the Axum framework. Every `/api/v1` endpoint
//! is a `POST` answering HTTP 200 with a `{code, message, data?}` envelope.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::AppState;

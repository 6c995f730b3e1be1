//! Axum extractors for request handling
//!
//! Custom extractors for authentication, JSON bodies and the caller's address.

mod auth;
mod client_ip;
mod json;

pub use auth::AuthUser;
pub use client_ip::ClientIp;
pub use json::JsonBody;

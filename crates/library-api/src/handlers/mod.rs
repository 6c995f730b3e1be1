//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod base;
pub mod books;
pub mod health;
pub mod members;

use library_service::RequestContext;
use serde_json::Value;

use crate::extractors::{AuthUser, ClientIp};

/// Audit context for a mutating call
pub(crate) fn request_context(auth: &AuthUser, ClientIp(ip): ClientIp, raw: Value) -> RequestContext {
    RequestContext::new(auth.username.clone())
        .with_source_ip(ip)
        .with_request(raw)
}

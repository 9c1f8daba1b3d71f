//! Admin API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Auth validator: admin bearer token
//! 2. Audit logger: runs after auth, has the admin fingerprint

pub mod audit;
pub mod auth;

use axum::extract::OriginalUri;
use axum::http::Request;

/// Full request path. Nested routers strip their prefix from `req.uri()`;
/// `OriginalUri` keeps what the client actually asked for.
pub(crate) fn request_path<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}

//! Audit logging middleware.
//!
//! Logs every admin API request with method, path, and response status.
//! Runs innermost (after auth has injected `AdminContext`).

use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use super::request_path;
use crate::api::types::{AdminContext, ApiContext};
use crate::core_state::AccessSource;

pub async fn log_access(req: Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = request_path(&req);

    let ctx = req.extensions().get::<ApiContext>().cloned();

    let source = req
        .extensions()
        .get::<AdminContext>()
        .map(|a| AccessSource::Admin {
            fingerprint: a.fingerprint.clone(),
        })
        .unwrap_or(AccessSource::Anonymous);

    let response = next.run(req).await;

    let status = response.status().as_u16();
    tracing::info!(method, path, status, "Admin API request");
    if let Some(ctx) = ctx {
        ctx.core
            .log_access(source, &format!("{method} {path}"), &format!("status:{status}"));
    }

    response
}

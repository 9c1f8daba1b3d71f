//! Bearer token authentication middleware.
//!
//! Extracts `Authorization: Bearer <token>`, checks it against the
//! configured admin credential, and injects `AdminContext` into request
//! extensions for downstream handlers.

use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::request_path;
use crate::api::error::ApiError;
use crate::api::types::{AdminContext, ApiContext};
use crate::core_state::AccessSource;

/// Require the admin bearer token.
///
/// Accesses `ApiContext` from request extensions (injected by Extension layer).
pub async fn require_admin(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_admin_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_admin_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let authorized = token.is_some_and(|t| ctx.admin.validate(t.trim()));
    if !authorized {
        let path = request_path(&req);
        tracing::warn!(path, has_token = token.is_some(), "Rejected admin request");
        ctx.core.log_access(
            AccessSource::Anonymous,
            &format!("{} {path}", req.method()),
            "status:401",
        );
        return Err(ApiError::Unauthorized);
    }

    req.extensions_mut().insert(AdminContext {
        fingerprint: ctx.admin.fingerprint(),
    });

    Ok(next.run(req).await)
}

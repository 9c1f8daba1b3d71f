//! Admin API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Analytics routes are nested under `/api/admin`; `/api/health` is open.
//!
//! Middleware stack (outermost → innermost):
//! 1. Auth validator → 2. Audit logger

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the admin API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn admin_api_router(core: Arc<CoreState>, admin_token: &str) -> Router {
    build_router(ApiContext::new(core, admin_token))
}

fn build_router(ctx: ApiContext) -> Router {
    // Layers are applied from bottom (innermost) to top (outermost):
    //   Extension (outermost) → Cache-Control → Auth → Audit (innermost) → Handler
    //
    // Extension must be outermost so all middleware can access ApiContext.
    let protected = Router::new()
        .route("/risk-trends", get(endpoints::risk::trends))
        .route("/risk-correlations", get(endpoints::risk::correlations))
        .route("/risk-by-diet", get(endpoints::risk::by_diet))
        .route(
            "/risk-by-smoking-alcohol",
            get(endpoints::risk::by_smoking_alcohol),
        )
        .route("/risk-3d-lab", get(endpoints::risk::lab_scatter))
        .route(
            "/blood-pressure-distribution",
            get(endpoints::risk::blood_pressure),
        )
        .route("/combined-risk-data", get(endpoints::risk::combined))
        .route("/form-stats", get(endpoints::overview::form_stats))
        .route("/form-breakdown", get(endpoints::overview::form_breakdown))
        .route("/user-stats", get(endpoints::overview::user_stats))
        .route("/followup-chart", get(endpoints::overview::follow_up_chart))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(axum::Extension(ctx));

    let unprotected = Router::new().route("/health", get(endpoints::health::check));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .nest("/api/admin", protected)
        .nest("/api", unprotected)
        .layer(cors)
}

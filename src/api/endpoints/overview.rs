//! Admin dashboard counters.

use axum::extract::State;
use axum::Json;

use crate::analytics::{self, FollowUpStats, FormBreakdown, FormStats, UserStats};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;

/// `GET /api/admin/form-stats`
pub async fn form_stats(State(ctx): State<ApiContext>) -> Result<Json<FormStats>, ApiError> {
    const FAILURE: &str = "Failed to fetch form stats";
    let conn = ctx.core.open_db().map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let lifestyle =
        db::count_lifestyle_entries(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let medical =
        db::count_medical_predictions(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    Ok(Json(analytics::form_stats(lifestyle, medical)))
}

/// `GET /api/admin/form-breakdown`
pub async fn form_breakdown(
    State(ctx): State<ApiContext>,
) -> Result<Json<FormBreakdown>, ApiError> {
    const FAILURE: &str = "Failed to get form breakdown";
    let conn = ctx.core.open_db().map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let lifestyle =
        db::count_lifestyle_by_role(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let medical =
        db::count_medical_by_role(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    Ok(Json(analytics::form_breakdown(&lifestyle, &medical)))
}

/// `GET /api/admin/user-stats`
pub async fn user_stats(State(ctx): State<ApiContext>) -> Result<Json<UserStats>, ApiError> {
    const FAILURE: &str = "Failed to fetch user stats";
    let conn = ctx.core.open_db().map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let users = db::get_all_users(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    Ok(Json(analytics::user_stats(&users)))
}

/// `GET /api/admin/followup-chart`
pub async fn follow_up_chart(
    State(ctx): State<ApiContext>,
) -> Result<Json<FollowUpStats>, ApiError> {
    const FAILURE: &str = "Failed to fetch follow-up stats";
    let conn = ctx.core.open_db().map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let statuses =
        db::get_follow_up_statuses(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    Ok(Json(analytics::follow_up_stats(&statuses)))
}

//! Risk analytics endpoints.
//!
//! Every handler opens its own connection, loads the records it needs
//! in one read, and hands them to the pure aggregates in
//! [`crate::analytics`]. Storage failures surface as a 500 carrying
//! the endpoint's fixed message.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::analytics::{
    self, BloodPressureDistribution, CombinedRiskPoint, CorrelationOutcome, DietRisk, HabitRisk,
    LabRiskPoint, MonthlyRiskTrend, RecordCorpus,
};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db;

#[derive(Debug, Serialize)]
pub struct RiskTrendResponse {
    pub trend: Vec<MonthlyRiskTrend>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskByDietResponse {
    pub risk_by_diet: Vec<DietRisk>,
}

fn load_corpus(ctx: &ApiContext, failure: &'static str) -> Result<RecordCorpus, ApiError> {
    let conn = ctx
        .core
        .open_db()
        .map_err(|e| ApiError::aggregate(failure, e))?;
    RecordCorpus::load(&conn).map_err(|e| ApiError::aggregate(failure, e))
}

/// `GET /api/admin/risk-trends`
pub async fn trends(State(ctx): State<ApiContext>) -> Result<Json<RiskTrendResponse>, ApiError> {
    let corpus = load_corpus(&ctx, "Failed to compute risk trends over time")?;
    let trend = analytics::monthly_risk_trend(&corpus.views());
    tracing::debug!(records = corpus.len(), months = trend.len(), "Computed risk trend");
    Ok(Json(RiskTrendResponse { trend }))
}

/// `GET /api/admin/risk-correlations`
pub async fn correlations(
    State(ctx): State<ApiContext>,
) -> Result<Json<CorrelationOutcome>, ApiError> {
    const FAILURE: &str = "Failed to compute correlation matrix";
    let conn = ctx.core.open_db().map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let entries =
        db::get_all_lifestyle_entries(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    Ok(Json(analytics::correlation_matrix(&entries)))
}

/// `GET /api/admin/risk-by-diet`
pub async fn by_diet(State(ctx): State<ApiContext>) -> Result<Json<RiskByDietResponse>, ApiError> {
    let corpus = load_corpus(&ctx, "Error aggregating risk by diet")?;
    Ok(Json(RiskByDietResponse {
        risk_by_diet: analytics::risk_by_diet(&corpus.views()),
    }))
}

/// `GET /api/admin/risk-by-smoking-alcohol`
pub async fn by_smoking_alcohol(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<HabitRisk>>, ApiError> {
    let corpus = load_corpus(&ctx, "Failed to get risk by smoking/alcohol")?;
    Ok(Json(analytics::risk_by_smoking_alcohol(&corpus.views())))
}

/// `GET /api/admin/risk-3d-lab`
pub async fn lab_scatter(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<LabRiskPoint>>, ApiError> {
    const FAILURE: &str = "Failed to fetch 3D lab risk data";
    let conn = ctx.core.open_db().map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let records =
        db::get_all_medical_predictions(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    Ok(Json(analytics::lab_risk_scatter(&records)))
}

/// `GET /api/admin/blood-pressure-distribution`
pub async fn blood_pressure(
    State(ctx): State<ApiContext>,
) -> Result<Json<BloodPressureDistribution>, ApiError> {
    const FAILURE: &str = "Failed to fetch blood pressure distribution data";
    let conn = ctx.core.open_db().map_err(|e| ApiError::aggregate(FAILURE, e))?;
    let records =
        db::get_all_medical_predictions(&conn).map_err(|e| ApiError::aggregate(FAILURE, e))?;
    Ok(Json(analytics::blood_pressure_distribution(&records)))
}

/// `GET /api/admin/combined-risk-data`
pub async fn combined(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<CombinedRiskPoint>>, ApiError> {
    let corpus = load_corpus(&ctx, "Failed to fetch combined risk data")?;
    Ok(Json(analytics::combined_risk_data(&corpus.views())))
}

//! Repository layer: entity-scoped database operations.
//!
//! Aggregates read whole tables in one pass; inserts exist for the
//! ingestion flow and for seeding test databases.

mod audit;
mod follow_up;
mod lifestyle_entry;
mod medical_prediction;
mod user;

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::Row;
use uuid::Uuid;

use super::DatabaseError;

pub use audit::*;
pub use follow_up::*;
pub use lifestyle_entry::*;
pub use medical_prediction::*;
pub use user::*;

/// Parse a stored creation timestamp. Accepts RFC 3339 as written by
/// the inserts below and SQLite's `datetime('now')` format.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Upper bound accepted for a stored age.
const MAX_AGE: f64 = 150.0;

/// Read a numeric column without trusting its storage class. Integers and
/// reals pass through, numeric text is parsed, and anything else reads as
/// `None` with a warning.
pub(crate) fn numeric_cell(
    row: &Row<'_>,
    idx: usize,
    column: &'static str,
) -> Result<Option<f64>, rusqlite::Error> {
    let value = match row.get_ref(idx)? {
        ValueRef::Null => return Ok(None),
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(f) => Some(f),
        ValueRef::Text(raw) => std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite()),
        ValueRef::Blob(_) => None,
    };
    if value.is_none() {
        tracing::warn!(column, "Non-numeric value in numeric column, read as absent");
    }
    Ok(value)
}

/// Ages are whole years in `0..=150`; fractions are truncated.
pub(crate) fn age_cell(row: &Row<'_>, idx: usize) -> Result<Option<u32>, rusqlite::Error> {
    Ok(numeric_cell(row, idx, "age")?.and_then(|age| {
        let age = age_from_years(age);
        if age.is_none() {
            tracing::warn!("Stored age out of range, read as absent");
        }
        age
    }))
}

fn age_from_years(years: f64) -> Option<u32> {
    (years.is_finite() && (0.0..=MAX_AGE).contains(&years)).then(|| years.trunc() as u32)
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(raw).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

pub(crate) fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_list(column: &'static str, raw: &str) -> Result<Vec<String>, DatabaseError> {
    serde_json::from_str(raw).map_err(|e| DatabaseError::MalformedList {
        column,
        reason: e.to_string(),
    })
}

use serde::Serialize;

use super::stats::{finite, pearson};
use crate::models::LifestyleRecord;

/// Column order of the correlation matrix.
pub const CORRELATION_LABELS: [&str; 6] = [
    "fastFoodFrequency",
    "bmi",
    "waterIntake",
    "diabetesRisk",
    "bpRisk",
    "heartRisk",
];

const FEATURE_COUNT: usize = CORRELATION_LABELS.len();

/// Ordinal encoding of the fast-food frequency answer.
pub fn encode_fast_food_freq(value: Option<&str>) -> Option<u8> {
    match value?.to_lowercase().as_str() {
        "never" => Some(0),
        "rarely" => Some(1),
        "occasionally" => Some(2),
        "frequently" => Some(3),
        "daily" => Some(4),
        _ => None,
    }
}

/// Feature row for one lifestyle entry, or `None` when any of the six
/// features is missing or non-finite.
pub fn feature_row(entry: &LifestyleRecord) -> Option<[f64; FEATURE_COUNT]> {
    Some([
        f64::from(encode_fast_food_freq(entry.fast_food_freq.as_deref())?),
        finite(entry.bmi)?,
        finite(entry.water_intake)?,
        finite(entry.is_diabetes)?,
        finite(entry.is_bp)?,
        finite(entry.is_heart_disease)?,
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyMatrix {}

/// Heatmap payload, or the explicit no-data signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CorrelationOutcome {
    Matrix {
        matrix: Vec<Vec<f64>>,
        labels: Vec<&'static str>,
    },
    NoData {
        #[serde(rename = "correlationMatrix")]
        correlation_matrix: EmptyMatrix,
        message: &'static str,
    },
}

impl CorrelationOutcome {
    fn no_data() -> Self {
        Self::NoData {
            correlation_matrix: EmptyMatrix {},
            message: "No valid data for correlation",
        }
    }
}

/// Pearson matrix over lifestyle entries with all six features present.
pub fn correlation_matrix(entries: &[LifestyleRecord]) -> CorrelationOutcome {
    let rows: Vec<[f64; FEATURE_COUNT]> = entries.iter().filter_map(feature_row).collect();

    tracing::debug!(
        total = entries.len(),
        usable = rows.len(),
        "Correlation rows filtered"
    );

    if rows.is_empty() {
        return CorrelationOutcome::no_data();
    }

    let columns: Vec<Vec<f64>> = (0..FEATURE_COUNT)
        .map(|col| rows.iter().map(|row| row[col]).collect())
        .collect();

    let mut matrix = vec![vec![0.0; FEATURE_COUNT]; FEATURE_COUNT];
    for i in 0..FEATURE_COUNT {
        for j in i..FEATURE_COUNT {
            let r = pearson(&columns[i], &columns[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    CorrelationOutcome::Matrix {
        matrix,
        labels: CORRELATION_LABELS.to_vec(),
    }
}

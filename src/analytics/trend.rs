use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::normalize::RiskView;
use super::stats::{finite, round_to};

/// Average risk per calendar month across both record kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRiskTrend {
    pub month: String,
    pub avg_diabetes_risk: f64,
    #[serde(rename = "avgBPRisk")]
    pub avg_bp_risk: f64,
    pub avg_heart_risk: f64,
}

/// Running sums for one `YYYY-MM` bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthBucket {
    pub count: usize,
    pub diabetes_sum: f64,
    pub bp_sum: f64,
    pub heart_sum: f64,
}

impl MonthBucket {
    // Non-finite risk adds nothing but the record still counts.
    fn add(&mut self, view: &RiskView<'_>) {
        self.count += 1;
        self.diabetes_sum += finite(view.diabetes).unwrap_or(0.0);
        self.bp_sum += finite(view.bp).unwrap_or(0.0);
        self.heart_sum += finite(view.heart).unwrap_or(0.0);
    }
}

/// Bucket records by UTC creation month, ascending by calendar date.
/// Records without a creation timestamp are skipped.
pub fn bucket_by_month(views: &[RiskView<'_>]) -> Vec<(String, MonthBucket)> {
    let mut buckets: HashMap<String, MonthBucket> = HashMap::new();

    for view in views {
        let Some(created_at) = view.created_at else {
            continue;
        };
        buckets
            .entry(created_at.format("%Y-%m").to_string())
            .or_default()
            .add(view);
    }

    let mut ordered: Vec<(Option<NaiveDate>, String, MonthBucket)> = buckets
        .into_iter()
        .map(|(month, bucket)| (month_start(&month), month, bucket))
        .collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    ordered
        .into_iter()
        .map(|(_, month, bucket)| (month, bucket))
        .collect()
}

fn month_start(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()
}

/// Monthly mean of each risk dimension, rounded to 2 decimals.
pub fn monthly_risk_trend(views: &[RiskView<'_>]) -> Vec<MonthlyRiskTrend> {
    bucket_by_month(views)
        .into_iter()
        .map(|(month, bucket)| {
            let count = bucket.count as f64;
            MonthlyRiskTrend {
                month,
                avg_diabetes_risk: round_to(bucket.diabetes_sum / count, 2),
                avg_bp_risk: round_to(bucket.bp_sum / count, 2),
                avg_heart_risk: round_to(bucket.heart_sum / count, 2),
            }
        })
        .collect()
}

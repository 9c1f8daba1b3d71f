use serde::Serialize;

use super::normalize::RiskView;
use super::stats::finite;
use crate::models::enums::RecordKind;
use crate::models::MedicalRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BloodPressureReading {
    pub systolic: f64,
    pub diastolic: f64,
}

/// Readings for the BP histogram, or the explicit empty payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BloodPressureDistribution {
    Readings(Vec<BloodPressureReading>),
    Empty {
        message: &'static str,
        data: Vec<BloodPressureReading>,
    },
}

/// Medical records with finite, strictly positive systolic and diastolic values.
pub fn blood_pressure_readings(records: &[MedicalRecord]) -> Vec<BloodPressureReading> {
    records
        .iter()
        .filter_map(|r| {
            let systolic = finite(r.systolic_bp).filter(|v| *v > 0.0)?;
            let diastolic = finite(r.diastolic_bp).filter(|v| *v > 0.0)?;
            Some(BloodPressureReading { systolic, diastolic })
        })
        .collect()
}

pub fn blood_pressure_distribution(records: &[MedicalRecord]) -> BloodPressureDistribution {
    let readings = blood_pressure_readings(records);
    if readings.is_empty() {
        BloodPressureDistribution::Empty {
            message: "No valid BP data found",
            data: Vec::new(),
        }
    } else {
        BloodPressureDistribution::Readings(readings)
    }
}

/// One point of the lab-value vs. risk scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabRiskPoint {
    pub sugar: f64,
    pub lipids: f64,
    pub diabetes_risk: Option<f64>,
    pub bp_risk: Option<f64>,
    pub heart_risk: Option<f64>,
}

/// Sugar falls back from fasting glucose to HbA1c, lipids from
/// cholesterol to triglycerides. Points need both lab axes and at
/// least one risk value.
pub fn lab_risk_scatter(records: &[MedicalRecord]) -> Vec<LabRiskPoint> {
    records
        .iter()
        .filter_map(|r| {
            let sugar = finite(r.fasting_blood_sugar).or(finite(r.hba1c))?;
            let lipids = finite(r.cholesterol).or(finite(r.triglycerides))?;
            let point = LabRiskPoint {
                sugar,
                lipids,
                diabetes_risk: finite(r.diabetes_risk),
                bp_risk: finite(r.bp_risk),
                heart_risk: finite(r.heart_disease_risk),
            };
            let any_risk = point.diabetes_risk.is_some()
                || point.bp_risk.is_some()
                || point.heart_risk.is_some();
            any_risk.then_some(point)
        })
        .collect()
}

/// Risk vs. BMI point tagged with the record kind it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRiskPoint {
    pub bmi: Option<f64>,
    pub diabetes_risk: Option<f64>,
    pub bp_risk: Option<f64>,
    pub heart_risk: Option<f64>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    #[serde(rename = "type")]
    pub kind: RecordKind,
}

/// Every record passes through; absent risk stays `null`.
pub fn combined_risk_data(views: &[RiskView<'_>]) -> Vec<CombinedRiskPoint> {
    views
        .iter()
        .map(|v| CombinedRiskPoint {
            bmi: finite(v.bmi),
            diabetes_risk: finite(v.diabetes),
            bp_risk: finite(v.bp),
            heart_risk: finite(v.heart),
            gender: v.gender.map(str::to_string),
            age: v.age,
            kind: v.kind,
        })
        .collect()
}

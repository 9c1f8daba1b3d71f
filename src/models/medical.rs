use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::SubmitterRole;

/// Per-dimension advice text produced alongside a medical prediction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskSuggestions {
    pub diabetes: Option<String>,
    pub blood_pressure: Option<String>,
    pub heart_disease: Option<String>,
}

/// Feature-attribution reasons per risk dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReasons {
    pub diabetes_reasons: Vec<String>,
    pub bp_reasons: Vec<String>,
    pub heart_reasons: Vec<String>,
}

/// A medical assessment: lifestyle shape plus lab values, with risk
/// probabilities and threshold labels from the prediction script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: Uuid,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub fasting_blood_sugar: Option<f64>,
    pub hba1c: Option<f64>,
    #[serde(rename = "systolicBP")]
    pub systolic_bp: Option<f64>,
    #[serde(rename = "diastolicBP")]
    pub diastolic_bp: Option<f64>,
    pub cholesterol: Option<f64>,
    pub triglycerides: Option<f64>,
    pub symptoms: Vec<String>,
    pub diagnosis_reports: Option<String>,
    pub current_medication: Option<String>,
    pub family_history: Option<String>,
    pub lifestyle_factors: Option<String>,
    pub diet_type: Option<String>,
    pub smoking: Option<String>,
    pub alcohol: Option<String>,
    pub water_intake: Option<f64>,
    pub diabetes_risk: Option<f64>,
    pub bp_risk: Option<f64>,
    pub heart_disease_risk: Option<f64>,
    pub is_diabetes: Option<f64>,
    #[serde(rename = "isBP")]
    pub is_bp: Option<f64>,
    pub is_heart_disease: Option<f64>,
    pub suggestions: RiskSuggestions,
    pub reasons: RiskReasons,
    pub report: Option<String>,
    pub pdf_path: Option<String>,
    pub submitted_by: Option<String>,
    pub submitted_by_role: SubmitterRole,
    /// `None` when the stored timestamp could not be parsed.
    pub created_at: Option<DateTime<Utc>>,
}

impl MedicalRecord {
    /// Blank record for the given submitter, stamped with `created_at`.
    pub fn new(submitted_by_role: SubmitterRole, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            contact: None,
            age: None,
            gender: None,
            height: None,
            weight: None,
            bmi: None,
            state: None,
            district: None,
            city: None,
            fasting_blood_sugar: None,
            hba1c: None,
            systolic_bp: None,
            diastolic_bp: None,
            cholesterol: None,
            triglycerides: None,
            symptoms: Vec::new(),
            diagnosis_reports: None,
            current_medication: None,
            family_history: None,
            lifestyle_factors: None,
            diet_type: None,
            smoking: None,
            alcohol: None,
            water_intake: None,
            diabetes_risk: None,
            bp_risk: None,
            heart_disease_risk: None,
            is_diabetes: None,
            is_bp: None,
            is_heart_disease: None,
            suggestions: RiskSuggestions::default(),
            reasons: RiskReasons::default(),
            report: None,
            pdf_path: None,
            submitted_by: None,
            submitted_by_role,
            created_at: Some(created_at),
        }
    }
}

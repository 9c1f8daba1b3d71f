use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::SubmitterRole;

/// A lifestyle assessment submitted by a citizen or a health worker,
/// with the three risk probabilities attached by the prediction script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleRecord {
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
    pub diet_type: Option<String>,
    pub sleep: Option<f64>,
    pub water_intake: Option<f64>,
    pub smoking: Option<String>,
    pub alcohol: Option<String>,
    pub area_type: Option<String>,
    pub fast_food_freq: Option<String>,
    pub diabetes_symptoms: Vec<String>,
    pub bp_symptoms: Vec<String>,
    pub heart_symptoms: Vec<String>,
    pub family_history: Vec<String>,
    pub current_symptoms: Vec<String>,
    pub is_diabetes: Option<f64>,
    #[serde(rename = "isBP")]
    pub is_bp: Option<f64>,
    pub is_heart_disease: Option<f64>,
    pub diabetes_level: Option<String>,
    pub bp_level: Option<String>,
    pub heart_level: Option<String>,
    pub submitted_by: Option<String>,
    pub submitted_by_role: SubmitterRole,
    /// `None` when the stored timestamp could not be parsed.
    pub created_at: Option<DateTime<Utc>>,
}

impl LifestyleRecord {
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
            diet_type: None,
            sleep: None,
            water_intake: None,
            smoking: None,
            alcohol: None,
            area_type: None,
            fast_food_freq: None,
            diabetes_symptoms: Vec::new(),
            bp_symptoms: Vec::new(),
            heart_symptoms: Vec::new(),
            family_history: Vec::new(),
            current_symptoms: Vec::new(),
            is_diabetes: None,
            is_bp: None,
            is_heart_disease: None,
            diabetes_level: None,
            bp_level: None,
            heart_level: None,
            submitted_by: None,
            submitted_by_role,
            created_at: Some(created_at),
        }
    }
}

use chrono::{DateTime, Utc};

use crate::models::enums::RecordKind;
use crate::models::{LifestyleRecord, MedicalRecord};

/// One assessment seen through the fields every combined aggregate needs.
///
/// Lifestyle entries carry their risk probabilities in `isDiabetes`,
/// `isBP` and `isHeartDisease`; medical predictions in `diabetesRisk`,
/// `bpRisk` and `heartDiseaseRisk` (their `is*` columns are threshold
/// labels). The adapters below are the only place that distinction lives.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskView<'a> {
    pub kind: RecordKind,
    pub created_at: Option<DateTime<Utc>>,
    pub bmi: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<&'a str>,
    pub diet_type: Option<&'a str>,
    pub smoking: Option<&'a str>,
    pub alcohol: Option<&'a str>,
    pub diabetes: Option<f64>,
    pub bp: Option<f64>,
    pub heart: Option<f64>,
}

impl<'a> From<&'a LifestyleRecord> for RiskView<'a> {
    fn from(entry: &'a LifestyleRecord) -> Self {
        Self {
            kind: RecordKind::Lifestyle,
            created_at: entry.created_at,
            bmi: entry.bmi,
            age: entry.age,
            gender: entry.gender.as_deref(),
            diet_type: entry.diet_type.as_deref(),
            smoking: entry.smoking.as_deref(),
            alcohol: entry.alcohol.as_deref(),
            diabetes: entry.is_diabetes,
            bp: entry.is_bp,
            heart: entry.is_heart_disease,
        }
    }
}

impl<'a> From<&'a MedicalRecord> for RiskView<'a> {
    fn from(record: &'a MedicalRecord) -> Self {
        Self {
            kind: RecordKind::Medical,
            created_at: record.created_at,
            bmi: record.bmi,
            age: record.age,
            gender: record.gender.as_deref(),
            diet_type: record.diet_type.as_deref(),
            smoking: record.smoking.as_deref(),
            alcohol: record.alcohol.as_deref(),
            diabetes: record.diabetes_risk,
            bp: record.bp_risk,
            heart: record.heart_disease_risk,
        }
    }
}

/// Lifestyle views followed by medical views, preserving input order.
pub fn normalize<'a>(
    lifestyle: &'a [LifestyleRecord],
    medical: &'a [MedicalRecord],
) -> Vec<RiskView<'a>> {
    lifestyle
        .iter()
        .map(RiskView::from)
        .chain(medical.iter().map(RiskView::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::SubmitterRole;

    #[test]
    fn medical_view_reads_probabilities_not_labels() {
        let mut record = MedicalRecord::new(SubmitterRole::Citizen, Utc::now());
        record.diabetes_risk = Some(0.35);
        record.is_diabetes = Some(1.0);
        record.heart_disease_risk = Some(0.05);

        let view = RiskView::from(&record);
        assert_eq!(view.kind, RecordKind::Medical);
        assert_eq!(view.diabetes, Some(0.35));
        assert_eq!(view.bp, None);
        assert_eq!(view.heart, Some(0.05));
    }

    #[test]
    fn lifestyle_view_reads_is_fields() {
        let mut entry = LifestyleRecord::new(SubmitterRole::HealthWorker, Utc::now());
        entry.is_bp = Some(0.8);
        entry.diet_type = Some("vegan".into());

        let view = RiskView::from(&entry);
        assert_eq!(view.kind, RecordKind::Lifestyle);
        assert_eq!(view.bp, Some(0.8));
        assert_eq!(view.diet_type, Some("vegan"));
    }

    #[test]
    fn normalize_keeps_lifestyle_before_medical() {
        let lifestyle = vec![LifestyleRecord::new(SubmitterRole::Citizen, Utc::now())];
        let medical = vec![
            MedicalRecord::new(SubmitterRole::Citizen, Utc::now()),
            MedicalRecord::new(SubmitterRole::Citizen, Utc::now()),
        ];
        let kinds: Vec<RecordKind> = normalize(&lifestyle, &medical)
            .iter()
            .map(|v| v.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![RecordKind::Lifestyle, RecordKind::Medical, RecordKind::Medical]
        );
    }
}

//! Risk analytics over submitted assessments.
//!
//! Every aggregate is a pure function over records already loaded from
//! storage: load once per request, compute synchronously, serialize.
//! Combined aggregates read both record kinds through `RiskView`.
//!
//! Missing-data handling differs per aggregate and is part of the
//! observable output:
//! - monthly trend: non-finite risk adds 0 but the record is counted
//! - correlation: any missing feature drops the whole row
//! - grouped averages: missing risk coalesces to 0
//! - projections: missing values pass through as `null`

mod correlation;
mod fetch;
mod grouping;
mod normalize;
mod overview;
mod projection;
mod stats;
mod trend;

pub use correlation::*;
pub use fetch::*;
pub use grouping::*;
pub use normalize::*;
pub use overview::*;
pub use projection::*;
pub use stats::{finite, mean, pearson, round_to};
pub use trend::*;

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_lifestyle_entry, insert_medical_prediction, open_memory_database};
    use crate::models::enums::SubmitterRole;
    use crate::models::{LifestyleRecord, MedicalRecord};
    use chrono::{TimeZone, Utc};
    use rusqlite::Connection;

    fn seeded_db() -> Connection {
        let conn = open_memory_database().expect("Failed to open test DB");

        let mut a = LifestyleRecord::new(
            SubmitterRole::Citizen,
            Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
        );
        a.diet_type = Some("vegetarian".into());
        a.smoking = Some("no".into());
        a.alcohol = Some("no".into());
        a.fast_food_freq = Some("rarely".into());
        a.bmi = Some(22.0);
        a.water_intake = Some(3.0);
        a.is_diabetes = Some(0.1);
        a.is_bp = Some(0.2);
        a.is_heart_disease = Some(0.1);
        insert_lifestyle_entry(&conn, &a).unwrap();

        let mut b = LifestyleRecord::new(
            SubmitterRole::HealthWorker,
            Utc.with_ymd_and_hms(2024, 2, 3, 8, 0, 0).unwrap(),
        );
        b.diet_type = Some("non-vegetarian".into());
        b.smoking = Some("Yes".into());
        b.alcohol = Some("yes".into());
        b.fast_food_freq = Some("Daily".into());
        b.bmi = Some(31.0);
        b.water_intake = Some(1.0);
        b.is_diabetes = Some(0.7);
        b.is_bp = Some(0.8);
        b.is_heart_disease = Some(0.6);
        insert_lifestyle_entry(&conn, &b).unwrap();

        let mut m = MedicalRecord::new(
            SubmitterRole::HealthWorker,
            Utc.with_ymd_and_hms(2024, 1, 22, 8, 0, 0).unwrap(),
        );
        m.diet_type = Some("vegetarian".into());
        m.smoking = Some("YES".into());
        m.alcohol = Some("no".into());
        m.fasting_blood_sugar = Some(140.0);
        m.cholesterol = Some(230.0);
        m.systolic_bp = Some(150.0);
        m.diastolic_bp = Some(95.0);
        m.diabetes_risk = Some(0.5);
        m.bp_risk = Some(0.6);
        m.heart_disease_risk = Some(0.4);
        m.is_diabetes = Some(1.0);
        insert_medical_prediction(&conn, &m).unwrap();

        conn
    }

    #[test]
    fn corpus_feeds_every_aggregate() {
        let conn = seeded_db();
        let corpus = RecordCorpus::load(&conn).unwrap();
        assert_eq!(corpus.len(), 3);
        let views = corpus.views();

        let trend = monthly_risk_trend(&views);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month, "2024-01");
        assert_eq!(trend[0].avg_diabetes_risk, 0.3);
        assert_eq!(trend[1].month, "2024-02");

        let diet = risk_by_diet(&views);
        assert_eq!(diet[0].diet_type, "vegetarian");
        assert!((diet[0].avg_risk - (0.4 + 1.5) / 6.0).abs() < 1e-9);
        assert_eq!(diet[1].diet_type, "non-vegetarian");

        let habits = risk_by_smoking_alcohol(&views);
        let groups: Vec<&str> = habits.iter().map(|h| h.group.as_str()).collect();
        assert_eq!(
            groups,
            vec!["Non-Smoker-Non-Drinker", "Smoker-Drinker", "Smoker-Non-Drinker"]
        );

        assert_eq!(combined_risk_data(&views).len(), 3);
        assert_eq!(lab_risk_scatter(&corpus.medical).len(), 1);
        assert_eq!(blood_pressure_readings(&corpus.medical).len(), 1);
        assert!(matches!(
            correlation_matrix(&corpus.lifestyle),
            CorrelationOutcome::Matrix { .. }
        ));
    }

    #[test]
    fn aggregates_are_idempotent_over_unchanged_store() {
        let conn = seeded_db();
        let render = || {
            let corpus = RecordCorpus::load(&conn).unwrap();
            let views = corpus.views();
            serde_json::json!({
                "trend": monthly_risk_trend(&views),
                "diet": risk_by_diet(&views),
                "habits": risk_by_smoking_alcohol(&views),
                "combined": combined_risk_data(&views),
                "lab": lab_risk_scatter(&corpus.medical),
                "bp": blood_pressure_distribution(&corpus.medical),
                "corr": correlation_matrix(&corpus.lifestyle),
            })
            .to_string()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn malformed_numeric_cell_does_not_fail_the_corpus() {
        let conn = seeded_db();
        conn.execute(
            "INSERT INTO lifestyle_entries (id, is_diabetes, is_bp, submitted_by_role, created_at)
             VALUES (?1, 'N/A', 0.4, 'citizen', '2024-01-28T12:00:00Z')",
            rusqlite::params![uuid::Uuid::new_v4().to_string()],
        )
        .unwrap();

        let corpus = RecordCorpus::load(&conn).unwrap();
        assert_eq!(corpus.len(), 4);

        let trend = monthly_risk_trend(&corpus.views());
        assert_eq!(trend[0].month, "2024-01");
        // (0.1 + 0.5 + 0) / 3 and (0.2 + 0.6 + 0.4) / 3
        assert_eq!(trend[0].avg_diabetes_risk, 0.2);
        assert_eq!(trend[0].avg_bp_risk, 0.4);

        // the row has no features and stays out of the matrix
        assert!(matches!(
            correlation_matrix(&corpus.lifestyle),
            CorrelationOutcome::Matrix { .. }
        ));
    }

    #[test]
    fn empty_store_gives_empty_results() {
        let conn = open_memory_database().unwrap();
        let corpus = RecordCorpus::load(&conn).unwrap();
        assert!(corpus.is_empty());
        let views = corpus.views();
        assert!(monthly_risk_trend(&views).is_empty());
        assert!(risk_by_diet(&views).is_empty());
        assert!(combined_risk_data(&views).is_empty());
        assert!(matches!(
            correlation_matrix(&corpus.lifestyle),
            CorrelationOutcome::NoData { .. }
        ));
    }
}

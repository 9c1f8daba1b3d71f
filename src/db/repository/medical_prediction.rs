use std::str::FromStr;

use rusqlite::{params, Connection};

use super::lifestyle_entry::count_by_role;
use super::{age_cell, decode_list, encode_list, numeric_cell, parse_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::enums::SubmitterRole;
use crate::models::*;

const MEDICAL_COLUMNS: &str = "id, name, contact, age, gender, height, weight, bmi,
     state, district, city, fasting_blood_sugar, hba1c, systolic_bp, diastolic_bp,
     cholesterol, triglycerides, symptoms, diagnosis_reports, current_medication,
     family_history, lifestyle_factors, diet_type, smoking, alcohol, water_intake,
     diabetes_risk, bp_risk, heart_disease_risk, is_diabetes, is_bp, is_heart_disease,
     suggestion_diabetes, suggestion_blood_pressure, suggestion_heart_disease,
     diabetes_reasons, bp_reasons, heart_reasons, report, pdf_path,
     submitted_by, submitted_by_role, created_at";

pub fn insert_medical_prediction(conn: &Connection, record: &MedicalRecord) -> Result<(), DatabaseError> {
    let created_at = record
        .created_at
        .ok_or_else(|| DatabaseError::ConstraintViolation("medical prediction without created_at".into()))?;

    conn.execute(
        &format!(
            "INSERT INTO medical_predictions ({MEDICAL_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30,
                     ?31, ?32, ?33, ?34, ?35, ?36, ?37, ?38, ?39, ?40, ?41, ?42, ?43)"
        ),
        params![
            record.id.to_string(),
            record.name,
            record.contact,
            record.age,
            record.gender,
            record.height,
            record.weight,
            record.bmi,
            record.state,
            record.district,
            record.city,
            record.fasting_blood_sugar,
            record.hba1c,
            record.systolic_bp,
            record.diastolic_bp,
            record.cholesterol,
            record.triglycerides,
            encode_list(&record.symptoms),
            record.diagnosis_reports,
            record.current_medication,
            record.family_history,
            record.lifestyle_factors,
            record.diet_type,
            record.smoking,
            record.alcohol,
            record.water_intake,
            record.diabetes_risk,
            record.bp_risk,
            record.heart_disease_risk,
            record.is_diabetes,
            record.is_bp,
            record.is_heart_disease,
            record.suggestions.diabetes,
            record.suggestions.blood_pressure,
            record.suggestions.heart_disease,
            encode_list(&record.reasons.diabetes_reasons),
            encode_list(&record.reasons.bp_reasons),
            encode_list(&record.reasons.heart_reasons),
            record.report,
            record.pdf_path,
            record.submitted_by,
            record.submitted_by_role.as_str(),
            created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Every medical prediction, oldest first.
pub fn get_all_medical_predictions(conn: &Connection) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEDICAL_COLUMNS} FROM medical_predictions ORDER BY created_at ASC, rowid ASC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(medical_row_from_rusqlite(row)))?;

    let mut records = Vec::new();
    for row in rows {
        records.push(medical_from_row(row??)?);
    }
    Ok(records)
}

pub fn count_medical_predictions(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM medical_predictions", [], |row| row.get(0))?;
    Ok(count)
}

/// Number of medical predictions per submitter role.
pub fn count_medical_by_role(conn: &Connection) -> Result<Vec<(SubmitterRole, i64)>, DatabaseError> {
    count_by_role(conn, "medical_predictions")
}

// Internal row type for MedicalRecord mapping
struct MedicalRow {
    id: String,
    name: Option<String>,
    contact: Option<String>,
    age: Option<u32>,
    gender: Option<String>,
    height: Option<f64>,
    weight: Option<f64>,
    bmi: Option<f64>,
    state: Option<String>,
    district: Option<String>,
    city: Option<String>,
    fasting_blood_sugar: Option<f64>,
    hba1c: Option<f64>,
    systolic_bp: Option<f64>,
    diastolic_bp: Option<f64>,
    cholesterol: Option<f64>,
    triglycerides: Option<f64>,
    symptoms: String,
    diagnosis_reports: Option<String>,
    current_medication: Option<String>,
    family_history: Option<String>,
    lifestyle_factors: Option<String>,
    diet_type: Option<String>,
    smoking: Option<String>,
    alcohol: Option<String>,
    water_intake: Option<f64>,
    diabetes_risk: Option<f64>,
    bp_risk: Option<f64>,
    heart_disease_risk: Option<f64>,
    is_diabetes: Option<f64>,
    is_bp: Option<f64>,
    is_heart_disease: Option<f64>,
    suggestion_diabetes: Option<String>,
    suggestion_blood_pressure: Option<String>,
    suggestion_heart_disease: Option<String>,
    diabetes_reasons: String,
    bp_reasons: String,
    heart_reasons: String,
    report: Option<String>,
    pdf_path: Option<String>,
    submitted_by: Option<String>,
    submitted_by_role: String,
    created_at: String,
}

fn medical_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<MedicalRow, rusqlite::Error> {
    Ok(MedicalRow {
        id: row.get(0)?,
        name: row.get(1)?,
        contact: row.get(2)?,
        age: age_cell(row, 3)?,
        gender: row.get(4)?,
        height: numeric_cell(row, 5, "height")?,
        weight: numeric_cell(row, 6, "weight")?,
        bmi: numeric_cell(row, 7, "bmi")?,
        state: row.get(8)?,
        district: row.get(9)?,
        city: row.get(10)?,
        fasting_blood_sugar: numeric_cell(row, 11, "fasting_blood_sugar")?,
        hba1c: numeric_cell(row, 12, "hba1c")?,
        systolic_bp: numeric_cell(row, 13, "systolic_bp")?,
        diastolic_bp: numeric_cell(row, 14, "diastolic_bp")?,
        cholesterol: numeric_cell(row, 15, "cholesterol")?,
        triglycerides: numeric_cell(row, 16, "triglycerides")?,
        symptoms: row.get(17)?,
        diagnosis_reports: row.get(18)?,
        current_medication: row.get(19)?,
        family_history: row.get(20)?,
        lifestyle_factors: row.get(21)?,
        diet_type: row.get(22)?,
        smoking: row.get(23)?,
        alcohol: row.get(24)?,
        water_intake: numeric_cell(row, 25, "water_intake")?,
        diabetes_risk: numeric_cell(row, 26, "diabetes_risk")?,
        bp_risk: numeric_cell(row, 27, "bp_risk")?,
        heart_disease_risk: numeric_cell(row, 28, "heart_disease_risk")?,
        is_diabetes: numeric_cell(row, 29, "is_diabetes")?,
        is_bp: numeric_cell(row, 30, "is_bp")?,
        is_heart_disease: numeric_cell(row, 31, "is_heart_disease")?,
        suggestion_diabetes: row.get(32)?,
        suggestion_blood_pressure: row.get(33)?,
        suggestion_heart_disease: row.get(34)?,
        diabetes_reasons: row.get(35)?,
        bp_reasons: row.get(36)?,
        heart_reasons: row.get(37)?,
        report: row.get(38)?,
        pdf_path: row.get(39)?,
        submitted_by: row.get(40)?,
        submitted_by_role: row.get(41)?,
        created_at: row.get(42)?,
    })
}

fn medical_from_row(row: MedicalRow) -> Result<MedicalRecord, DatabaseError> {
    let created_at = parse_timestamp(&row.created_at);
    if created_at.is_none() {
        tracing::warn!(id = %row.id, raw = %row.created_at, "Unparseable medical created_at");
    }

    Ok(MedicalRecord {
        id: parse_uuid(&row.id)?,
        name: row.name,
        contact: row.contact,
        age: row.age,
        gender: row.gender,
        height: row.height,
        weight: row.weight,
        bmi: row.bmi,
        state: row.state,
        district: row.district,
        city: row.city,
        fasting_blood_sugar: row.fasting_blood_sugar,
        hba1c: row.hba1c,
        systolic_bp: row.systolic_bp,
        diastolic_bp: row.diastolic_bp,
        cholesterol: row.cholesterol,
        triglycerides: row.triglycerides,
        symptoms: decode_list("symptoms", &row.symptoms)?,
        diagnosis_reports: row.diagnosis_reports,
        current_medication: row.current_medication,
        family_history: row.family_history,
        lifestyle_factors: row.lifestyle_factors,
        diet_type: row.diet_type,
        smoking: row.smoking,
        alcohol: row.alcohol,
        water_intake: row.water_intake,
        diabetes_risk: row.diabetes_risk,
        bp_risk: row.bp_risk,
        heart_disease_risk: row.heart_disease_risk,
        is_diabetes: row.is_diabetes,
        is_bp: row.is_bp,
        is_heart_disease: row.is_heart_disease,
        suggestions: RiskSuggestions {
            diabetes: row.suggestion_diabetes,
            blood_pressure: row.suggestion_blood_pressure,
            heart_disease: row.suggestion_heart_disease,
        },
        reasons: RiskReasons {
            diabetes_reasons: decode_list("diabetes_reasons", &row.diabetes_reasons)?,
            bp_reasons: decode_list("bp_reasons", &row.bp_reasons)?,
            heart_reasons: decode_list("heart_reasons", &row.heart_reasons)?,
        },
        report: row.report,
        pdf_path: row.pdf_path,
        submitted_by: row.submitted_by,
        submitted_by_role: SubmitterRole::from_str(&row.submitted_by_role)?,
        created_at,
    })
}

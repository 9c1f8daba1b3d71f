use std::str::FromStr;

use rusqlite::{params, Connection};

use super::{age_cell, decode_list, encode_list, numeric_cell, parse_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::enums::SubmitterRole;
use crate::models::*;

const LIFESTYLE_COLUMNS: &str = "id, name, contact, age, gender, height, weight, bmi,
     state, district, city, diet_type, sleep, water_intake, smoking, alcohol,
     area_type, fast_food_freq, diabetes_symptoms, bp_symptoms, heart_symptoms,
     family_history, current_symptoms, is_diabetes, is_bp, is_heart_disease,
     diabetes_level, bp_level, heart_level, submitted_by, submitted_by_role, created_at";

pub fn insert_lifestyle_entry(conn: &Connection, entry: &LifestyleRecord) -> Result<(), DatabaseError> {
    let created_at = entry
        .created_at
        .ok_or_else(|| DatabaseError::ConstraintViolation("lifestyle entry without created_at".into()))?;

    conn.execute(
        &format!(
            "INSERT INTO lifestyle_entries ({LIFESTYLE_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                     ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32)"
        ),
        params![
            entry.id.to_string(),
            entry.name,
            entry.contact,
            entry.age,
            entry.gender,
            entry.height,
            entry.weight,
            entry.bmi,
            entry.state,
            entry.district,
            entry.city,
            entry.diet_type,
            entry.sleep,
            entry.water_intake,
            entry.smoking,
            entry.alcohol,
            entry.area_type,
            entry.fast_food_freq,
            encode_list(&entry.diabetes_symptoms),
            encode_list(&entry.bp_symptoms),
            encode_list(&entry.heart_symptoms),
            encode_list(&entry.family_history),
            encode_list(&entry.current_symptoms),
            entry.is_diabetes,
            entry.is_bp,
            entry.is_heart_disease,
            entry.diabetes_level,
            entry.bp_level,
            entry.heart_level,
            entry.submitted_by,
            entry.submitted_by_role.as_str(),
            created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Every lifestyle entry, oldest first.
pub fn get_all_lifestyle_entries(conn: &Connection) -> Result<Vec<LifestyleRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LIFESTYLE_COLUMNS} FROM lifestyle_entries ORDER BY created_at ASC, rowid ASC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(lifestyle_row_from_rusqlite(row)))?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(lifestyle_from_row(row??)?);
    }
    Ok(entries)
}

pub fn count_lifestyle_entries(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM lifestyle_entries", [], |row| row.get(0))?;
    Ok(count)
}

/// Number of lifestyle entries per submitter role.
pub fn count_lifestyle_by_role(conn: &Connection) -> Result<Vec<(SubmitterRole, i64)>, DatabaseError> {
    count_by_role(conn, "lifestyle_entries")
}

pub(super) fn count_by_role(
    conn: &Connection,
    table: &'static str,
) -> Result<Vec<(SubmitterRole, i64)>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT submitted_by_role, COUNT(*) FROM {table} GROUP BY submitted_by_role"
    ))?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(role, count)| Ok((SubmitterRole::from_str(&role)?, count)))
        .collect()
}

// Internal row type for LifestyleRecord mapping
struct LifestyleRow {
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
    diet_type: Option<String>,
    sleep: Option<f64>,
    water_intake: Option<f64>,
    smoking: Option<String>,
    alcohol: Option<String>,
    area_type: Option<String>,
    fast_food_freq: Option<String>,
    diabetes_symptoms: String,
    bp_symptoms: String,
    heart_symptoms: String,
    family_history: String,
    current_symptoms: String,
    is_diabetes: Option<f64>,
    is_bp: Option<f64>,
    is_heart_disease: Option<f64>,
    diabetes_level: Option<String>,
    bp_level: Option<String>,
    heart_level: Option<String>,
    submitted_by: Option<String>,
    submitted_by_role: String,
    created_at: String,
}

fn lifestyle_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<LifestyleRow, rusqlite::Error> {
    Ok(LifestyleRow {
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
        diet_type: row.get(11)?,
        sleep: numeric_cell(row, 12, "sleep")?,
        water_intake: numeric_cell(row, 13, "water_intake")?,
        smoking: row.get(14)?,
        alcohol: row.get(15)?,
        area_type: row.get(16)?,
        fast_food_freq: row.get(17)?,
        diabetes_symptoms: row.get(18)?,
        bp_symptoms: row.get(19)?,
        heart_symptoms: row.get(20)?,
        family_history: row.get(21)?,
        current_symptoms: row.get(22)?,
        is_diabetes: numeric_cell(row, 23, "is_diabetes")?,
        is_bp: numeric_cell(row, 24, "is_bp")?,
        is_heart_disease: numeric_cell(row, 25, "is_heart_disease")?,
        diabetes_level: row.get(26)?,
        bp_level: row.get(27)?,
        heart_level: row.get(28)?,
        submitted_by: row.get(29)?,
        submitted_by_role: row.get(30)?,
        created_at: row.get(31)?,
    })
}

fn lifestyle_from_row(row: LifestyleRow) -> Result<LifestyleRecord, DatabaseError> {
    let created_at = parse_timestamp(&row.created_at);
    if created_at.is_none() {
        tracing::warn!(id = %row.id, raw = %row.created_at, "Unparseable lifestyle created_at");
    }

    Ok(LifestyleRecord {
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
        diet_type: row.diet_type,
        sleep: row.sleep,
        water_intake: row.water_intake,
        smoking: row.smoking,
        alcohol: row.alcohol,
        area_type: row.area_type,
        fast_food_freq: row.fast_food_freq,
        diabetes_symptoms: decode_list("diabetes_symptoms", &row.diabetes_symptoms)?,
        bp_symptoms: decode_list("bp_symptoms", &row.bp_symptoms)?,
        heart_symptoms: decode_list("heart_symptoms", &row.heart_symptoms)?,
        family_history: decode_list("family_history", &row.family_history)?,
        current_symptoms: decode_list("current_symptoms", &row.current_symptoms)?,
        is_diabetes: row.is_diabetes,
        is_bp: row.is_bp,
        is_heart_disease: row.is_heart_disease,
        diabetes_level: row.diabetes_level,
        bp_level: row.bp_level,
        heart_level: row.heart_level,
        submitted_by: row.submitted_by,
        submitted_by_role: SubmitterRole::from_str(&row.submitted_by_role)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use chrono::{TimeZone, Utc};

    fn sample() -> LifestyleRecord {
        let mut entry = LifestyleRecord::new(
            SubmitterRole::HealthWorker,
            Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
        );
        entry.name = Some("Asha".into());
        entry.bmi = Some(27.4);
        entry.diet_type = Some("vegetarian".into());
        entry.fast_food_freq = Some("Rarely".into());
        entry.family_history = vec!["diabetes".into()];
        entry.is_diabetes = Some(0.42);
        entry.is_bp = Some(0.1);
        entry
    }

    #[test]
    fn insert_and_read_back() {
        let conn = open_memory_database().unwrap();
        let entry = sample();
        insert_lifestyle_entry(&conn, &entry).unwrap();

        let all = get_all_lifestyle_entries(&conn).unwrap();
        assert_eq!(all.len(), 1);
        let got = &all[0];
        assert_eq!(got.id, entry.id);
        assert_eq!(got.bmi, Some(27.4));
        assert_eq!(got.family_history, vec!["diabetes".to_string()]);
        assert_eq!(got.is_heart_disease, None);
        assert_eq!(got.submitted_by_role, SubmitterRole::HealthWorker);
        assert_eq!(got.created_at, entry.created_at);
    }

    #[test]
    fn unparseable_timestamp_reads_as_none() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO lifestyle_entries (id, submitted_by_role, created_at)
             VALUES (?1, 'citizen', 'yesterday')",
            params![uuid::Uuid::new_v4().to_string()],
        )
        .unwrap();

        let all = get_all_lifestyle_entries(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].created_at.is_none());
    }

    #[test]
    fn loosely_typed_cells_read_as_values_or_absent() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO lifestyle_entries
                 (id, age, bmi, water_intake, is_diabetes, is_bp, submitted_by_role, created_at)
             VALUES (?1, 'forty', 'overweight', '2.5', 'N/A', 0.3,
                     'citizen', '2024-06-01T10:00:00Z')",
            params![uuid::Uuid::new_v4().to_string()],
        )
        .unwrap();

        let all = get_all_lifestyle_entries(&conn).unwrap();
        assert_eq!(all.len(), 1);
        let got = &all[0];
        assert_eq!(got.age, None);
        assert_eq!(got.bmi, None);
        assert_eq!(got.water_intake, Some(2.5));
        assert_eq!(got.is_diabetes, None);
        assert_eq!(got.is_bp, Some(0.3));
    }

    #[test]
    fn counts_by_role() {
        let conn = open_memory_database().unwrap();
        insert_lifestyle_entry(&conn, &sample()).unwrap();
        insert_lifestyle_entry(&conn, &sample()).unwrap();
        let mut citizen = sample();
        citizen.submitted_by_role = SubmitterRole::Citizen;
        insert_lifestyle_entry(&conn, &citizen).unwrap();

        assert_eq!(count_lifestyle_entries(&conn).unwrap(), 3);
        let mut by_role = count_lifestyle_by_role(&conn).unwrap();
        by_role.sort_by_key(|(role, _)| role.as_str());
        assert_eq!(
            by_role,
            vec![(SubmitterRole::Citizen, 1), (SubmitterRole::HealthWorker, 2)]
        );
    }

    #[test]
    fn insert_without_timestamp_is_rejected() {
        let conn = open_memory_database().unwrap();
        let mut entry = sample();
        entry.created_at = None;
        assert!(matches!(
            insert_lifestyle_entry(&conn, &entry),
            Err(DatabaseError::ConstraintViolation(_))
        ));
    }
}
